pub mod types;
pub mod planner;
pub mod parser;
