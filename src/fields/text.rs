use std::ops::Bound;
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::{range_unsupported, Field, TEXT};
use crate::query::types::PredicateKind;

/// Lower-cased string form shared by the textual kinds
pub(crate) fn normalized_text(value: &FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(s) => Ok(s.to_lowercase()),
        other => Err(Error::type_mismatch("text", other.type_name())),
    }
}

/// Exact, case-insensitive string match
#[derive(Debug, Default)]
pub struct TextField {
    value: FieldValue,
    bytes: Vec<u8>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Field for TextField {
    fn kind(&self) -> &str {
        TEXT
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
        Ok(self.bytes == bytes)
    }

    fn search_range(&self, _min: Bound<&[u8]>, _max: Bound<&[u8]>) -> Result<bool> {
        Err(range_unsupported(TEXT))
    }

    fn supports(&self, predicate: PredicateKind) -> bool {
        matches!(predicate, PredicateKind::Match | PredicateKind::Partial)
    }
}
