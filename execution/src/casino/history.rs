//! Result history formatting.
//!
//! History rows are display-only. A row that fails to decode still produces an entry, with
//! [`HISTORY_PLACEHOLDER`] as its result.

use std::fmt::Write;

use tablebook_types::{HistoryEntry, OutcomeBody, RawRoundEvent, HISTORY_PLACEHOLDER};

use super::grammar::{DecodeOptions, Grammar};
use super::payload::field_text;

/// Which rendering of a decoded result a family shows in its history strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryStyle {
    /// Full winner label.
    Label,
    /// Short code or abbreviation.
    Short,
    /// Numeric id or value.
    Value,
}

/// Formats one raw row.
pub fn format_row(
    grammar: &Grammar,
    style: HistoryStyle,
    event: &RawRoundEvent,
    options: &DecodeOptions,
) -> HistoryEntry {
    let round_id = field_text(event.mid.as_ref()).map(|mid| mid.into_owned());
    let result = grammar
        .decode(event, options)
        .map(|body| render(grammar, style, &body))
        .unwrap_or_else(|| HISTORY_PLACEHOLDER.to_string());
    HistoryEntry { round_id, result }
}

/// Formats rows in input order.
pub fn format_rows(
    grammar: &Grammar,
    style: HistoryStyle,
    events: &[RawRoundEvent],
    options: &DecodeOptions,
) -> Vec<HistoryEntry> {
    events
        .iter()
        .map(|event| format_row(grammar, style, event, options))
        .collect()
}

fn render(grammar: &Grammar, style: HistoryStyle, body: &OutcomeBody) -> String {
    match body {
        OutcomeBody::Binary { is_win } => String::from(if *is_win { "Y" } else { "N" }),
        OutcomeBody::Winner {
            winner_id,
            winner_label,
        } => match style {
            HistoryStyle::Label => winner_label.clone(),
            HistoryStyle::Short => grammar
                .code_entry(*winner_id)
                .map(|entry| entry.short.to_string())
                .unwrap_or_else(|| abbreviate(winner_label)),
            HistoryStyle::Value => winner_id.to_string(),
        },
        OutcomeBody::Segmented {
            winner_index,
            winner_label,
            ..
        } => match style {
            HistoryStyle::Label => winner_label.clone(),
            HistoryStyle::Short => abbreviate(winner_label),
            HistoryStyle::Value => winner_index.to_string(),
        },
        OutcomeBody::Numeric { value } => value.to_string(),
        OutcomeBody::CardSet { cards } => cards.join(","),
        OutcomeBody::Digits { single, patti, .. } => match style {
            HistoryStyle::Label | HistoryStyle::Short => {
                let mut out = String::with_capacity(patti.len() + 2);
                let _ = write!(out, "{patti}-{single}");
                out
            }
            HistoryStyle::Value => single.to_string(),
        },
    }
}

/// `"Player A"` becomes `"A"`, `"Dragon"` becomes `"D"`, `"High Card"` becomes `"HC"`.
fn abbreviate(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();
    match words.last() {
        None => HISTORY_PLACEHOLDER.to_string(),
        Some(last) if words.len() > 1 && last.chars().count() <= 2 => last.to_uppercase(),
        Some(_) => words
            .iter()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect(),
    }
}
