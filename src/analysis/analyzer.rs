use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use rust_stemmers::Algorithm;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::ngram::NGramFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};

/// Tokenizer followed by an ordered filter chain
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: impl Into<String>, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name: name.into(),
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Token texts only, in order
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }

    /// Unicode words, lower-cased
    pub fn simple() -> Self {
        Analyzer::new("simple", Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
    }

    /// English: lower-cased, stop words removed, Snowball-stemmed
    pub fn standard_english() -> Self {
        Analyzer::new("standard", Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(StopWordFilter::english()))
            .add_filter(Box::new(StemmerFilter::new(Algorithm::English)))
    }

    pub fn ngram(min_gram: usize, max_gram: usize) -> Self {
        Analyzer::new("ngram", Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(NGramFilter::new(min_gram, max_gram)))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filters)
            .finish()
    }
}

/// Named analyzers available to `words` fields
pub struct AnalyzerRegistry {
    analyzers: RwLock<HashMap<String, Arc<Analyzer>>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        let registry = AnalyzerRegistry {
            analyzers: RwLock::new(HashMap::new()),
        };

        registry.register_defaults();
        registry
    }

    fn register_defaults(&self) {
        self.register("simple", Analyzer::simple());
        self.register("standard", Analyzer::standard_english());
        self.register("ngram", Analyzer::ngram(3, 10));
    }

    pub fn register(&self, name: &str, analyzer: Analyzer) {
        log::debug!("registering analyzer '{}'", name);
        self.analyzers.write().insert(name.to_string(), Arc::new(analyzer));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Analyzer>> {
        self.analyzers.read().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.analyzers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_lowercases_words() {
        assert_eq!(Analyzer::simple().terms("The Quick, brown FOX"), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn standard_drops_stop_words_and_stems() {
        let terms = Analyzer::standard_english().terms("The runners are running");
        assert_eq!(terms, vec!["runner", "run"]);
    }

    #[test]
    fn ngram_expands_words() {
        let terms = Analyzer::ngram(3, 4).terms("Rust");
        assert_eq!(terms, vec!["rus", "ust", "rust"]);
    }

    #[test]
    fn registry_has_defaults_and_accepts_more() {
        let registry = AnalyzerRegistry::new();
        assert_eq!(registry.names(), vec!["ngram", "simple", "standard"]);
        assert!(registry.get("missing").is_none());

        registry.register("custom", Analyzer::simple());
        assert_eq!(registry.get("custom").unwrap().name, "simple");
    }
}
