//! Defensive parsing of raw provider fields.
//!
//! None of these helpers fail loudly: a missing, blank, or malformed field comes back as
//! `None` and the calling grammar decides what that means.

use std::borrow::Cow;
use tablebook_types::FieldValue;

/// Trimmed text of a field, or `None` when absent or blank.
pub(crate) fn field_text(value: Option<&FieldValue>) -> Option<Cow<'_, str>> {
    let value = value?;
    if value.is_blank() {
        return None;
    }
    match value.as_text() {
        Cow::Borrowed(text) => Some(Cow::Borrowed(text.trim())),
        Cow::Owned(text) => Some(Cow::Owned(text.trim().to_string())),
    }
}

/// Integer value of a field.
pub(crate) fn parse_integer(value: Option<&FieldValue>) -> Option<i64> {
    value?.as_integer()
}

/// Integer value of a field that must be `>= 1`.
pub(crate) fn parse_positive(value: Option<&FieldValue>) -> Option<i64> {
    parse_integer(value).filter(|value| *value >= 1)
}

/// Trimmed text of an optional string that must not be blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Split on `delimiter`, trimming tokens and dropping empty ones.
pub(crate) fn split_tokens(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed, lowercased form used for case-insensitive label comparison.
pub(crate) fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
