use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A provider scalar that may arrive as a JSON string or a JSON number.
///
/// Providers are inconsistent about quoting: the same table can send `"win": "2"` on one
/// round and `"win": 2` on the next. Nothing about the contents is trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Text form of the value. Integral floats render without a fractional part, so
    /// `2.0` and `"2"` look the same to a code table.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Float(value) => match float_to_integer(*value) {
                Some(integer) => Cow::Owned(integer.to_string()),
                None => Cow::Owned(value.to_string()),
            },
            Self::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }

    /// Integer form of the value, if it has one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Float(value) => float_to_integer(*value),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }

    /// True for empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

fn float_to_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
