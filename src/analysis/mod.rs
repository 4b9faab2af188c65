//! Text analysis for `words` fields: a tokenizer followed by token filters.

pub mod token;
pub mod tokenizer;
pub mod filter;
pub mod filters;
pub mod analyzer;

pub use analyzer::{Analyzer, AnalyzerRegistry};
pub use token::Token;
