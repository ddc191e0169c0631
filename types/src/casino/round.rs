use serde::{Deserialize, Serialize};

use super::FieldValue;

/// The untyped bundle of fields a provider emits for one round.
///
/// Only `table_id` is required. Every other field may be missing or malformed, and
/// which ones a family needs depends on its grammar.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoundEvent {
    /// Provider table/game identifier, compared case-insensitively.
    pub table_id: String,
    /// Primary result code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<FieldValue>,
    /// Natural-language winner or status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_nat: Option<FieldValue>,
    /// Delimited free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdesc: Option<String>,
    /// Delimited card tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<String>,
    /// Single-field alias some providers use instead of `cards`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    /// Round identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<FieldValue>,
}

impl RawRoundEvent {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            ..Self::default()
        }
    }

    pub fn with_win(mut self, win: impl Into<FieldValue>) -> Self {
        self.win = Some(win.into());
        self
    }

    pub fn with_win_nat(mut self, win_nat: impl Into<FieldValue>) -> Self {
        self.win_nat = Some(win_nat.into());
        self
    }

    pub fn with_rdesc(mut self, rdesc: impl Into<String>) -> Self {
        self.rdesc = Some(rdesc.into());
        self
    }

    pub fn with_cards(mut self, cards: impl Into<String>) -> Self {
        self.cards = Some(cards.into());
        self
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card = Some(card.into());
        self
    }

    pub fn with_mid(mut self, mid: impl Into<FieldValue>) -> Self {
        self.mid = Some(mid.into());
        self
    }

    /// Round id if present and not blank.
    pub fn round_id(&self) -> Option<&FieldValue> {
        self.mid.as_ref().filter(|mid| !mid.is_blank())
    }
}
