//! Field value types and their natural ordering

use crate::core::error::{Result, ViewError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// A polymorphic field value read from a record
///
/// `Null` stands for an absent value (an optional field that is not set).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a float if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two present values by their natural order
    ///
    /// Text compares lexicographically, numbers numerically (integers and
    /// floats compare as floats), dates chronologically. A `Date` compared
    /// with a `DateTime` stands for midnight UTC of that day.
    pub fn natural_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::DateTime(b)) => start_of_day(*a).cmp(b),
            (FieldValue::DateTime(a), FieldValue::Date(b)) => a.cmp(&start_of_day(*b)),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    /// Case-insensitive substring test against an already lowercased needle
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.as_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    }

    /// Key used when grouping records by this value
    pub fn facet_key(&self) -> String {
        match self {
            FieldValue::Null => "none".to_string(),
            other => other.to_string(),
        }
    }

    // Ordering between values of unrelated kinds; only reachable when a
    // record exposes inconsistent kinds for one field.
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Boolean(_) => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::Date(_) | FieldValue::DateTime(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The kind of a record field, which decides the predicates it supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text (names, emails, subjects)
    Text,
    /// A closed set of values (status, priority, category)
    Categorical,
    Boolean,
    /// Amounts and counts
    Number,
    /// Calendar dates and timestamps
    Date,
}

impl FieldKind {
    /// Interpret a raw string as a value of this kind
    ///
    /// `choices` restricts categorical values when non-empty.
    pub fn parse_value(
        self,
        field: &'static str,
        raw: &str,
        choices: &[&str],
    ) -> Result<FieldValue> {
        let raw = raw.trim();
        match self {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Categorical => {
                if !choices.is_empty() && !choices.contains(&raw) {
                    return Err(ViewError::invalid_value(
                        field,
                        raw,
                        format!("expected one of {}", choices.join(", ")),
                    ));
                }
                Ok(FieldValue::Text(raw.to_string()))
            }
            FieldKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(FieldValue::Boolean(true)),
                "false" => Ok(FieldValue::Boolean(false)),
                _ => Err(ViewError::invalid_value(field, raw, "expected true or false")),
            },
            FieldKind::Number => {
                if let Ok(i) = raw.parse::<i64>() {
                    Ok(FieldValue::Integer(i))
                } else if let Ok(f) = raw.parse::<f64>() {
                    Ok(FieldValue::Float(f))
                } else {
                    Err(ViewError::invalid_value(field, raw, "expected a number"))
                }
            }
            FieldKind::Date => {
                if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(FieldValue::Date(date))
                } else if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                    Ok(FieldValue::DateTime(dt.with_timezone(&Utc)))
                } else {
                    Err(ViewError::invalid_value(
                        field,
                        raw,
                        "expected YYYY-MM-DD or an RFC 3339 timestamp",
                    ))
                }
            }
        }
    }

    /// Interpret a JSON value (from query parameters) as a value of this kind
    pub fn parse_json(
        self,
        field: &'static str,
        value: &Value,
        choices: &[&str],
    ) -> Result<FieldValue> {
        match (self, value) {
            (_, Value::String(s)) => self.parse_value(field, s, choices),
            (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(*b)),
            (FieldKind::Number, Value::Number(n)) => n
                .as_i64()
                .map(FieldValue::Integer)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .ok_or_else(|| ViewError::invalid_value(field, n.to_string(), "expected a number")),
            (_, other) => Err(ViewError::invalid_value(
                field,
                other.to_string(),
                format!("unexpected JSON value for a {:?} field", self),
            )),
        }
    }

    /// Whether a value is of the shape this kind expects
    pub(crate) fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text | FieldKind::Categorical, FieldValue::Text(_))
                | (FieldKind::Boolean, FieldValue::Boolean(_))
                | (FieldKind::Number, FieldValue::Integer(_) | FieldValue::Float(_))
                | (FieldKind::Date, FieldValue::Date(_) | FieldValue::DateTime(_))
        )
    }
}
