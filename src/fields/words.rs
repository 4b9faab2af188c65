use std::ops::Bound;
use std::sync::Arc;
use crate::analysis::analyzer::{Analyzer, AnalyzerRegistry};
use crate::core::config::DEFAULT_ANALYZER;
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::text::normalized_text;
use crate::fields::{range_unsupported, Field, FieldConfig, WORDS};
use crate::query::types::PredicateKind;

const SEPARATOR: u8 = 0;

fn join_terms(terms: &[String]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            bytes.push(SEPARATOR);
        }
        bytes.extend_from_slice(term.as_bytes());
    }
    bytes
}

/// Analyzed text; matches when the query terms appear in order
#[derive(Debug)]
pub struct WordsField {
    analyzer: Arc<Analyzer>,
    value: FieldValue,
    terms: Vec<String>,
    bytes: Vec<u8>,
}

impl WordsField {
    /// Reads `analyzer` from the config and resolves it in `analyzers`.
    ///
    /// Schemas fill in `Config::default_analyzer` before fields are created;
    /// a config without the key, as from a direct `FieldRegistry::create`,
    /// falls back to `DEFAULT_ANALYZER`.
    pub fn new(config: &FieldConfig, analyzers: &AnalyzerRegistry) -> Result<Self> {
        let name = match config.get("analyzer") {
            None => DEFAULT_ANALYZER,
            Some(serde_json::Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(Error::invalid_argument(format!("invalid analyzer value {other}")));
            }
        };
        let analyzer = analyzers
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("analyzer '{name}' is not registered")))?;
        Ok(Self::with_analyzer(analyzer))
    }

    pub fn with_analyzer(analyzer: Arc<Analyzer>) -> Self {
        WordsField {
            analyzer,
            value: FieldValue::Null,
            terms: Vec::new(),
            bytes: Vec::new(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn contains_in_order(&self, query: &[u8]) -> bool {
        if query.is_empty() {
            return false;
        }
        let mut stored = self.terms.iter();
        query
            .split(|b| *b == SEPARATOR)
            .all(|wanted| stored.any(|term| term.as_bytes() == wanted))
    }
}

impl Field for WordsField {
    fn kind(&self) -> &str {
        WORDS
    }

    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn process(&mut self, value: &FieldValue) -> Result<()> {
        let text = normalized_text(value)?;
        self.terms = self.analyzer.terms(&text);
        self.bytes = join_terms(&self.terms);
        self.value = FieldValue::Text(text);
        Ok(())
    }

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        let text = normalized_text(value)?;
        Ok(join_terms(&self.analyzer.terms(&text)))
    }

    fn search(&self, bytes: &[u8]) -> Result<bool> {
        Ok(self.contains_in_order(bytes))
    }

    fn search_range(&self, _min: Bound<&[u8]>, _max: Bound<&[u8]>) -> Result<bool> {
        Err(range_unsupported(WORDS))
    }

    fn supports(&self, predicate: PredicateKind) -> bool {
        matches!(predicate, PredicateKind::Match | PredicateKind::Partial)
    }

    fn to_partial_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        self.to_search_bytes(value)
    }

    fn search_partial(&self, needle: &[u8]) -> Result<bool> {
        self.search(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::error::ErrorKind;
    use crate::fields::FieldRegistry;

    fn words(analyzer: &str, text: &str) -> WordsField {
        let mut config = FieldConfig::new();
        config.insert("analyzer".into(), serde_json::json!(analyzer));
        let mut field = WordsField::new(&config, &AnalyzerRegistry::new()).unwrap();
        field.process(&FieldValue::from(text)).unwrap();
        field
    }

    fn hits(field: &WordsField, query: &str) -> bool {
        let bytes = field.to_search_bytes(&FieldValue::from(query)).unwrap();
        field.search(&bytes).unwrap()
    }

    #[test]
    fn terms_must_appear_in_order() {
        let field = words("simple", "Billy is my friend");
        assert_eq!(field.terms(), ["billy", "is", "my", "friend"]);
        assert!(hits(&field, "friend"));
        assert!(hits(&field, "Billy friend"));
        assert!(hits(&field, "billy is my friend"));
        assert!(!hits(&field, "friend billy"));
        assert!(!hits(&field, "enemy"));
    }

    #[test]
    fn empty_query_never_matches() {
        let field = words("simple", "anything at all");
        assert!(!hits(&field, ""));
        assert!(!hits(&field, "!!!"));
    }

    #[test]
    fn standard_analyzer_stems_both_sides() {
        let field = words("standard", "The runners were running fast");
        assert!(hits(&field, "runner runs"));
    }

    #[test]
    fn ngram_analyzer_finds_fragments() {
        let field = words("ngram", "Elephant");
        assert!(hits(&field, "pha"));
        assert!(!hits(&field, "xyz"));
    }

    #[test]
    fn missing_analyzer_falls_back_to_the_config_default() {
        assert_eq!(Config::default().default_analyzer, DEFAULT_ANALYZER);

        let registry = FieldRegistry::new();
        let mut field = registry.create(WORDS, &FieldConfig::new()).unwrap();
        field.process(&FieldValue::from("Hello, World")).unwrap();
        assert_eq!(field.bytes(), b"hello\0world");
    }

    #[test]
    fn unknown_analyzer_is_rejected() {
        let mut config = FieldConfig::new();
        config.insert("analyzer".into(), serde_json::json!("klingon"));
        let err = WordsField::new(&config, &AnalyzerRegistry::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn partial_uses_word_order() {
        let field = words("simple", "quick brown fox");
        let needle = field.to_partial_bytes(&FieldValue::from("quick fox")).unwrap();
        assert!(field.search_partial(&needle).unwrap());
        assert!(field.search_range(Bound::Unbounded, Bound::Unbounded).is_err());
    }
}
