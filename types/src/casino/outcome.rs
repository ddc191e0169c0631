use serde::{Deserialize, Serialize};

use super::{Family, FieldValue};

/// Decoded, typed result of one round.
///
/// An outcome is built once per round by the family decoder and then only read: it fully
/// determines every bet verdict for that round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub family: Family,
    /// Provider round id (`mid`), passed through unchanged.
    pub round_id: FieldValue,
    pub body: OutcomeBody,
}

impl Outcome {
    pub fn new(family: Family, round_id: FieldValue, body: OutcomeBody) -> Self {
        Self {
            family,
            round_id,
            body,
        }
    }

    /// Human-readable winner label, for shapes that have one.
    pub fn winner_label(&self) -> Option<&str> {
        match &self.body {
            OutcomeBody::Winner { winner_label, .. }
            | OutcomeBody::Segmented { winner_label, .. } => Some(winner_label.as_str()),
            _ => None,
        }
    }
}

/// Decoded shapes, one per decode grammar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeBody {
    /// The round either hit or missed a single proposition.
    Binary { is_win: bool },
    /// Winner drawn from a small fixed code table.
    Winner {
        winner_id: i64,
        winner_label: String,
    },
    /// Winner taken from the first segment of a delimited description.
    Segmented {
        winner_index: i64,
        winner_label: String,
        cards: Vec<String>,
        raw_description: String,
    },
    /// A bare numeric result (meter reading, run count, digit).
    Numeric { value: i64 },
    /// Drawn card ranks with suits stripped.
    CardSet { cards: Vec<String> },
    /// Three-digit draw ("patti") plus its single digit.
    Digits {
        digits: Vec<u8>,
        single: u8,
        patti: String,
    },
}

/// Compact display summary of one historical round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_id: Option<String>,
    pub result: String,
}
