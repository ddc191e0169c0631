//! Decode grammars.
//!
//! Every family instantiates exactly one [`Grammar`]. A grammar reads only the raw fields it
//! needs and either produces an [`OutcomeBody`] or gives up with `None`. It never errors and
//! never touches its input.

use tablebook_types::{OutcomeBody, RawRoundEvent, PATTI_LEN};
use thiserror::Error;
use tracing::warn;

use super::cards::card_ranks;
use super::payload::{
    field_text, non_blank, normalize_label, parse_integer, parse_positive, split_tokens,
};

/// One row of a fixed-enumeration code table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeEntry {
    /// Provider result code carried in `win`.
    pub code: i64,
    /// Winner label bets are matched against.
    pub label: &'static str,
    /// Abbreviation shown in result history.
    pub short: &'static str,
}

impl CodeEntry {
    pub const fn new(code: i64, label: &'static str, short: &'static str) -> Self {
        Self { code, label, short }
    }
}

/// How to settle a binary round when `win` and `winNat` disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConflictPolicy {
    /// Either signal is enough to call the round a hit.
    #[default]
    PreferWin,
    /// Any miss signal settles the round as a miss.
    PreferLoss,
    /// Conflicting rounds produce no outcome.
    Reject,
}

impl ConflictPolicy {
    fn resolve(&self) -> Option<bool> {
        match self {
            Self::PreferWin => Some(true),
            Self::PreferLoss => Some(false),
            Self::Reject => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown conflict policy: {0}")]
pub struct UnknownConflictPolicy(pub String);

impl std::str::FromStr for ConflictPolicy {
    type Err = UnknownConflictPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prefer_win" => Ok(Self::PreferWin),
            "prefer_loss" => Ok(Self::PreferLoss),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownConflictPolicy(value.to_string())),
        }
    }
}

/// Options shared by every decoder in a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub binary_conflict: ConflictPolicy,
}

/// A family's result encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// `win == sentinel` or a recognized status label in `winNat`.
    BinaryCode {
        sentinel: &'static str,
        win_labels: &'static [&'static str],
        loss_labels: &'static [&'static str],
    },
    /// `win` looked up in a static code table.
    FixedCode { codes: &'static [CodeEntry] },
    /// Winner label is the first `delimiter` segment of `rdesc`; `win` is the winner index.
    Segmented {
        delimiter: char,
        card_delimiter: char,
    },
    /// `win` as an integer, shifted by `offset`, within `min..=max`.
    DirectNumeric { offset: i64, min: i64, max: i64 },
    /// Card ranks from `cards` (or `card`).
    CardSet { delimiter: char },
    /// `rdesc = "<ddd>#<d>"`.
    DigitGroup,
}

impl Grammar {
    pub fn decode(&self, event: &RawRoundEvent, options: &DecodeOptions) -> Option<OutcomeBody> {
        match *self {
            Self::BinaryCode {
                sentinel,
                win_labels,
                loss_labels,
            } => {
                let is_win = decode_binary(event, sentinel, win_labels, loss_labels, options)?;
                Some(OutcomeBody::Binary { is_win })
            }
            Self::FixedCode { codes } => {
                let code = parse_integer(event.win.as_ref())?;
                let entry = codes.iter().find(|entry| entry.code == code)?;
                Some(OutcomeBody::Winner {
                    winner_id: entry.code,
                    winner_label: entry.label.to_string(),
                })
            }
            Self::Segmented {
                delimiter,
                card_delimiter,
            } => decode_segmented(event, delimiter, card_delimiter),
            Self::DirectNumeric { offset, min, max } => {
                let value = parse_integer(event.win.as_ref())?.checked_add(offset)?;
                (min..=max)
                    .contains(&value)
                    .then_some(OutcomeBody::Numeric { value })
            }
            Self::CardSet { delimiter } => {
                let primary = non_blank(event.cards.as_deref());
                let text = primary.or_else(|| non_blank(event.card.as_deref()))?;
                let cards = card_ranks(text, delimiter);
                if cards.is_empty() {
                    return None;
                }
                Some(OutcomeBody::CardSet { cards })
            }
            Self::DigitGroup => decode_digits(event.rdesc.as_deref()?),
        }
    }

    /// Code table row for a fixed-enumeration winner id.
    pub fn code_entry(&self, code: i64) -> Option<&'static CodeEntry> {
        match *self {
            Self::FixedCode { codes } => codes.iter().find(|entry| entry.code == code),
            _ => None,
        }
    }
}

fn decode_binary(
    event: &RawRoundEvent,
    sentinel: &str,
    win_labels: &[&str],
    loss_labels: &[&str],
    options: &DecodeOptions,
) -> Option<bool> {
    let policy = options.binary_conflict;
    let code = field_text(event.win.as_ref()).map(|win| win.eq_ignore_ascii_case(sentinel));
    let status = field_text(event.win_nat.as_ref()).and_then(|status| {
        let status = normalize_label(&status);
        if win_labels.contains(&status.as_str()) {
            Some(true)
        } else if loss_labels.contains(&status.as_str()) {
            Some(false)
        } else {
            None
        }
    });
    match (code, status) {
        (None, None) => None,
        (Some(signal), None) | (None, Some(signal)) => Some(signal),
        (Some(code), Some(status)) if code == status => Some(code),
        (Some(code), Some(status)) => {
            warn!(
                win = ?event.win,
                win_nat = ?event.win_nat,
                code,
                status,
                ?policy,
                "win code and status label disagree"
            );
            policy.resolve()
        }
    }
}

fn decode_segmented(
    event: &RawRoundEvent,
    delimiter: char,
    card_delimiter: char,
) -> Option<OutcomeBody> {
    let raw_description = event.rdesc.as_deref()?;
    let winner_label = raw_description
        .split(delimiter)
        .next()
        .map(str::trim)
        .filter(|label| !label.is_empty())?;
    let winner_index = parse_positive(event.win.as_ref())?;
    let cards = event
        .cards
        .as_deref()
        .map(|cards| split_tokens(cards, card_delimiter))
        .unwrap_or_default();
    Some(OutcomeBody::Segmented {
        winner_index,
        winner_label: winner_label.to_string(),
        cards,
        raw_description: raw_description.to_string(),
    })
}

fn decode_digits(rdesc: &str) -> Option<OutcomeBody> {
    let mut segments = rdesc.split('#');
    let patti = segments.next()?.trim();
    if patti.len() != PATTI_LEN || !patti.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: Vec<u8> = patti.bytes().map(|b| b - b'0').collect();
    let derived = (digits.iter().map(|d| u32::from(*d)).sum::<u32>() % 10) as u8;

    let single = match segments.next().map(str::trim).filter(|s| !s.is_empty()) {
        None => derived,
        Some(text) => {
            let [b] = text.as_bytes() else {
                return None;
            };
            if !b.is_ascii_digit() {
                return None;
            }
            let single = b - b'0';
            if single != derived {
                warn!(rdesc, single, derived, "single digit mismatch");
            }
            single
        }
    };
    Some(OutcomeBody::Digits {
        digits,
        single,
        patti: patti.to_string(),
    })
}
