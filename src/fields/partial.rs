use std::ops::Bound;
use crate::core::error::Result;
use crate::core::types::FieldValue;
use crate::fields::text::normalized_text;
use crate::fields::{contains, range_unsupported, Field, PARTIAL};
use crate::query::types::PredicateKind;

/// Text field whose match is a substring test
#[derive(Debug, Default)]
pub struct PartialField {
    value: FieldValue,
    bytes: Vec<u8>,
}

impl PartialField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Field for PartialField {
    fn kind(&self) -> &str {
        PARTIAL
    }

    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn process(&mut self, value: &FieldValue) -> Result<()> {
        let text = normalized_text(value)?;
        self.bytes = text.as_bytes().to_vec();
        self.value = FieldValue::Text(text);
        Ok(())
    }

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        Ok(normalized_text(value)?.into_bytes())
    }

    fn search(&self, bytes: &[u8]) -> Result<bool> {
        Ok(contains(&self.bytes, bytes))
    }

    fn search_range(&self, _min: Bound<&[u8]>, _max: Bound<&[u8]>) -> Result<bool> {
        Err(range_unsupported(PARTIAL))
    }

    fn supports(&self, predicate: PredicateKind) -> bool {
        matches!(predicate, PredicateKind::Match | PredicateKind::Partial)
    }

    fn search_partial(&self, needle: &[u8]) -> Result<bool> {
        self.search(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_substrings() {
        let mut field = PartialField::new();
        field.process(&FieldValue::from("Hello World")).unwrap();

        for (needle, want) in [("hello", true), ("WORLD", true), ("hello world", true), ("goodbye", false)] {
            let bytes = field.to_search_bytes(&FieldValue::from(needle)).unwrap();
            assert_eq!(field.search(&bytes).unwrap(), want, "needle {needle}");
        }
    }

    #[test]
    fn empty_string_is_stored() {
        let mut field = PartialField::new();
        field.process(&FieldValue::from("")).unwrap();
        assert!(field.bytes().is_empty());
    }
}
