//! Pluggable field codecs.
//!
//! A [`Field`] converts one native value into canonical bytes and answers
//! match, partial and range predicates over that encoding. Encodings are
//! scoped to their kind: bytes produced by one kind are never compared with
//! bytes produced by another.

pub mod registry;
pub mod text;
pub mod partial;
pub mod words;
pub mod number;
pub mod boolean;
pub mod date;

use std::collections::HashMap;
use std::fmt;
use std::ops::Bound;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::query::types::PredicateKind;

pub use registry::{FieldFactory, FieldRegistry};

/// Per-field options, e.g. `{"granularity": "month"}` for dates
pub type FieldConfig = HashMap<String, serde_json::Value>;

/// Registry names of the built-in kinds
pub const TEXT: &str = "text";
pub const PARTIAL: &str = "partial";
pub const WORDS: &str = "words";
pub const NUMBER: &str = "num";
pub const BOOLEAN: &str = "bool";
pub const DATE: &str = "date";

/// Declared kind of a record member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Partial,
    Words,
    Number,
    Boolean,
    Date,
    Custom(String),
}

impl FieldKind {
    /// Name the kind is registered under
    pub fn name(&self) -> &str {
        match self {
            FieldKind::Text => TEXT,
            FieldKind::Partial => PARTIAL,
            FieldKind::Words => WORDS,
            FieldKind::Number => NUMBER,
            FieldKind::Boolean => BOOLEAN,
            FieldKind::Date => DATE,
            FieldKind::Custom(name) => name,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Partial | FieldKind::Words)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Codec and comparator for one stored value.
///
/// `search(to_search_bytes(v))` holds right after `process(v)`. For ordered
/// kinds the byte order of the canonical encoding is the natural order of
/// the values, so `search_range` never decodes.
pub trait Field: Send + Sync + fmt::Debug {
    fn kind(&self) -> &str;

    /// Value as stored, after normalization
    fn value(&self) -> &FieldValue;

    /// Canonical encoding of the stored value
    fn bytes(&self) -> &[u8];

    fn process(&mut self, value: &FieldValue) -> Result<()>;

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>>;

    fn search(&self, bytes: &[u8]) -> Result<bool>;

    /// Inclusive range check; kinds without an order fail with `UnsupportedOperation`
    fn search_range(&self, min: Bound<&[u8]>, max: Bound<&[u8]>) -> Result<bool>;

    fn supports(&self, predicate: PredicateKind) -> bool;

    /// Needle for `search_partial`: the lower-cased string form of the value
    fn to_partial_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        if !self.supports(PredicateKind::Partial) {
            return Err(Error::unsupported(format!(
                "partial search not supported for {} fields",
                self.kind()
            )));
        }
        Ok(value.to_string().to_lowercase().into_bytes())
    }

    /// Substring test over the string form of the stored value
    fn search_partial(&self, needle: &[u8]) -> Result<bool> {
        if !self.supports(PredicateKind::Partial) {
            return Err(Error::unsupported(format!(
                "partial search not supported for {} fields",
                self.kind()
            )));
        }
        let haystack = self.value().to_string().to_lowercase();
        Ok(contains(haystack.as_bytes(), needle))
    }

    fn sort_key(&self) -> String {
        self.value().to_string()
    }
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

pub(crate) fn in_range(value: &[u8], min: Bound<&[u8]>, max: Bound<&[u8]>) -> bool {
    let above_min = match min {
        Bound::Included(min) => value >= min,
        Bound::Excluded(min) => value > min,
        Bound::Unbounded => true,
    };
    let below_max = match max {
        Bound::Included(max) => value <= max,
        Bound::Excluded(max) => value < max,
        Bound::Unbounded => true,
    };
    above_min && below_max
}

pub(crate) fn range_unsupported(kind: &str) -> Error {
    Error::unsupported(format!("range search not supported for {kind} fields"))
}
