use std::ops::Bound;
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::{range_unsupported, Field, BOOLEAN};
use crate::query::types::PredicateKind;

fn bool_bytes(value: &FieldValue) -> Result<Vec<u8>> {
    match value {
        FieldValue::Boolean(b) => Ok(vec![u8::from(*b)]),
        other => Err(Error::type_mismatch("boolean", other.type_name())),
    }
}

/// Single byte 0/1; exact match only
#[derive(Debug, Default)]
pub struct BoolField {
    value: FieldValue,
    bytes: Vec<u8>,
}

impl BoolField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Field for BoolField {
    fn kind(&self) -> &str {
        BOOLEAN
    }

    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn process(&mut self, value: &FieldValue) -> Result<()> {
        self.bytes = bool_bytes(value)?;
        self.value = value.clone();
        Ok(())
    }

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        bool_bytes(value)
    }

    fn search(&self, bytes: &[u8]) -> Result<bool> {
        if bytes.len() != 1 {
            return Err(Error::invalid_argument(format!(
                "boolean search value must be 1 byte, got {}",
                bytes.len()
            )));
        }
        Ok(self.bytes == bytes)
    }

    fn search_range(&self, _min: Bound<&[u8]>, _max: Bound<&[u8]>) -> Result<bool> {
        Err(range_unsupported(BOOLEAN))
    }

    fn supports(&self, predicate: PredicateKind) -> bool {
        predicate == PredicateKind::Match
    }
}
