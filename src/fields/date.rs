use std::fmt;
use std::ops::Bound;
use std::str::FromStr;
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::{in_range, Field, FieldConfig, DATE};
use crate::query::types::PredicateKind;

/// Truncation unit applied before encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "year" => Ok(Granularity::Year),
            "month" => Ok(Granularity::Month),
            "day" => Ok(Granularity::Day),
            "hour" => Ok(Granularity::Hour),
            "minute" => Ok(Granularity::Minute),
            "second" => Ok(Granularity::Second),
            other => Err(Error::invalid_argument(format!("invalid granularity '{other}'"))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
            Granularity::Second => "second",
        };
        f.write_str(name)
    }
}

impl Granularity {
    /// Start of the bucket containing `date`, in UTC
    pub fn truncate(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let (month, day, hour, minute, second) = match self {
            Granularity::Year => (1, 1, 0, 0, 0),
            Granularity::Month => (date.month(), 1, 0, 0, 0),
            Granularity::Day => (date.month(), date.day(), 0, 0, 0),
            Granularity::Hour => (date.month(), date.day(), date.hour(), 0, 0),
            Granularity::Minute => (date.month(), date.day(), date.hour(), date.minute(), 0),
            Granularity::Second => (date.month(), date.day(), date.hour(), date.minute(), date.second()),
        };
        NaiveDate::from_ymd_opt(date.year(), month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(|naive| naive.and_utc())
            .unwrap_or(date)
    }
}

/// RFC 3339 timestamps or plain `YYYY-MM-DD` dates (UTC midnight)
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Truncated Unix seconds, sign-flipped big-endian so byte order is time order
pub fn encode_date(date: DateTime<Utc>, granularity: Granularity) -> [u8; 8] {
    let seconds = granularity.truncate(date).timestamp();
    ((seconds as u64) ^ (1 << 63)).to_be_bytes()
}

/// Timestamps compared at a configured granularity
#[derive(Debug)]
pub struct DateField {
    granularity: Granularity,
    value: FieldValue,
    bytes: Vec<u8>,
}

impl DateField {
    /// Reads `granularity` from the config; defaults to day
    pub fn new(config: &FieldConfig) -> Result<Self> {
        let granularity = match config.get("granularity") {
            None => Granularity::default(),
            Some(serde_json::Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(Error::invalid_argument(format!("invalid granularity value {other}")));
            }
        };
        Ok(Self::with_granularity(granularity))
    }

    pub fn with_granularity(granularity: Granularity) -> Self {
        DateField {
            granularity,
            value: FieldValue::Null,
            bytes: Vec::new(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Dates, or text holding a date as decoded from JSON
    fn expect_date(value: &FieldValue) -> Result<DateTime<Utc>> {
        match value {
            FieldValue::Date(d) => Ok(*d),
            FieldValue::Text(raw) => parse_date(raw)
                .ok_or_else(|| Error::type_mismatch("date", &format!("text '{raw}'"))),
            other => Err(Error::type_mismatch("date", other.type_name())),
        }
    }
}

impl Field for DateField {
    fn kind(&self) -> &str {
        DATE
    }

    fn value(&self) -> &FieldValue {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn process(&mut self, value: &FieldValue) -> Result<()> {
        let date = Self::expect_date(value)?;
        self.bytes = encode_date(date, self.granularity).to_vec();
        self.value = FieldValue::Date(self.granularity.truncate(date));
        Ok(())
    }

    fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        Ok(encode_date(Self::expect_date(value)?, self.granularity).to_vec())
    }

    fn search(&self, bytes: &[u8]) -> Result<bool> {
        Ok(self.bytes == bytes)
    }

    fn search_range(&self, min: Bound<&[u8]>, max: Bound<&[u8]>) -> Result<bool> {
        Ok(in_range(&self.bytes, min, max))
    }

    fn supports(&self, predicate: PredicateKind) -> bool {
        matches!(predicate, PredicateKind::Match | PredicateKind::Range)
    }
}
