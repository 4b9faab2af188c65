use std::ops::Bound;
use crate::core::error::{Error, Result};
use crate::core::types::{FieldValue, Number};
use crate::fields::{in_range, Field, NUMBER};
use crate::query::types::PredicateKind;

const SIGN: u64 = 1 << 63;

/// Width of the canonical number encoding
pub const ENCODED_LEN: usize = 16;

/// Order-preserving encoding shared by every numeric width.
///
/// Layout: `[sortable f64 bits of the nearest double][sign-flipped i64 remainder]`.
/// The remainder is the exact integer minus that double and is zero for
/// floats, so integers beyond 2^53 stay distinct and byte order equals
/// numeric order across signed, unsigned and float inputs.
pub fn encode_number(number: Number) -> Result<[u8; ENCODED_LEN]> {
    let (approx, remainder) = match number {
        Number::Float(v) if v.is_nan() => {
            return Err(Error::type_mismatch("comparable number", "NaN"));
        }
        // Folds -0.0 into 0.0
        Number::Float(v) => (if v == 0.0 { 0.0 } else { v }, 0i64),
        Number::Int(v) => {
            let approx = v as f64;
            (approx, (v as i128 - approx as i128) as i64)
        }
        Number::UInt(v) => {
            let approx = v as f64;
            (approx, (v as i128 - approx as i128) as i64)
        }
    };

    let bits = approx.to_bits();
    let sortable = if bits & SIGN != 0 { !bits } else { bits ^ SIGN };

    let mut out = [0u8; ENCODED_LEN];
    out[..8].copy_from_slice(&sortable.to_be_bytes());
    out[8..].copy_from_slice(&((remainder as u64) ^ SIGN).to_be_bytes());
    Ok(out)
}

fn expect_number(value: &FieldValue) -> Result<Number> {
    match value {
        FieldValue::Number(n) => Ok(*n),
        other => Err(Error::type_mismatch("number", other.type_name())),
    }
}

/// Integer, unsigned and float values with exact and range search
#[derive(Debug, Default)]
pub struct NumField {
    value: FieldValue,
    bytes: Vec<u8>,
}

impl NumField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Field for NumField {
    fn kind(&self) -> &str {
        NUMBER
    }

    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn process(&mut self, value: &FieldValue) -> Result<()> {
        let number = match expect_number(value)? {
            Number::Float(v) if v == 0.0 => Number::Float(0.0),
            n => n,
        };
        self.bytes = encode_number(number)?.to_vec();
        self.value = FieldValue::Number(number);
        Ok(())
    }

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        Ok(encode_number(expect_number(value)?)?.to_vec())
    }

    fn search(&self, bytes: &[u8]) -> Result<bool> {
        Ok(self.bytes == bytes)
    }

    fn search_range(&self, min: Bound<&[u8]>, max: Bound<&[u8]>) -> Result<bool> {
        Ok(in_range(&self.bytes, min, max))
    }

    fn supports(&self, _predicate: PredicateKind) -> bool {
        true
    }
}
