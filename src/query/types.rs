use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,   // Ascending: 0 → 9, A → Z
    Desc,  // Descending: 9 → 0, Z → A
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::invalid_query(format!("sort must be 'asc' or 'desc', got '{other}'"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one clause compares its value with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredicateKind {
    #[default]
    Match,
    Partial,
    Range,
}

impl PredicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateKind::Match => "match",
            PredicateKind::Partial => "partial",
            PredicateKind::Range => "range",
        }
    }
}

impl FromStr for PredicateKind {
    type Err = Error;

    /// Blank means match
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "match" => Ok(PredicateKind::Match),
            "partial" => Ok(PredicateKind::Partial),
            "range" => Ok(PredicateKind::Range),
            other => Err(Error::invalid_query(format!("unknown search type '{other}'"))),
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{field, type, value}` clause
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryField {
    pub field: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: FieldValue,
}

impl QueryField {
    pub fn new(field: &str, kind: PredicateKind, value: impl Into<FieldValue>) -> Self {
        QueryField {
            field: field.to_string(),
            kind: kind.as_str().to_string(),
            value: value.into(),
        }
    }
}

/// Search request in its wire shape.
///
/// `sort` and clause types stay strings so that bad values surface as
/// `InvalidQuery` during validation instead of as decode errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub limit: usize,              // 0 = use the configured default
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub sort: String,              // "" = use the configured default
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub fields: Vec<QueryField>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a match clause
    pub fn field(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.clause(QueryField::new(field, PredicateKind::Match, value))
    }

    pub fn partial(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.clause(QueryField::new(field, PredicateKind::Partial, value))
    }

    /// Inclusive range; a `Null` or zero bound is open
    pub fn range(self, field: &str, min: impl Into<FieldValue>, max: impl Into<FieldValue>) -> Self {
        let bounds = FieldValue::List(vec![min.into(), max.into()]);
        self.clause(QueryField::new(field, PredicateKind::Range, bounds))
    }

    pub fn clause(mut self, clause: QueryField) -> Self {
        self.fields.push(clause);
        self
    }

    pub fn sort_by(mut self, field: &str) -> Self {
        self.sort_by = field.to_string();
        self
    }

    pub fn asc(mut self) -> Self {
        self.sort = SortOrder::Asc.as_str().to_string();
        self
    }

    pub fn desc(mut self) -> Self {
        self.sort = SortOrder::Desc.as_str().to_string();
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
