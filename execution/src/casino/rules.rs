//! Settlement rules.
//!
//! A [`MatchRule`] compares one bet selector against a decoded [`OutcomeBody`]. Rules know
//! nothing about back/lay: they report a hit, a miss, or a malformed bet, and
//! [`Evaluation::verdict`] applies the bet's side. Malformed bets lose on either side.

use tablebook_types::{OutcomeBody, PlacedBet, Proposition, Side, MAX_SINGLE_DIGIT_SELECTOR};
use tracing::{debug, error};

use super::cards::card_rank;
use super::grammar::Grammar;
use super::payload::{non_blank, normalize_label};

/// A family's settlement predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// `sr + offset` equals the winner id, winner index, or numeric value.
    ExactId { offset: i64 },
    /// `nat` equals the winner label, trimmed and case-insensitive.
    Label,
    /// `psid` equals the winner id or winner index.
    SideTeam,
    /// `nat` is Yes/No against a binary outcome.
    Proposition,
    /// `nat` is Yes/No over how many selected ranks were drawn.
    CardIntersection { selection_size: usize },
    /// `sr` is a single digit contained in the draw.
    DigitMembership,
}

/// Rule result before the bet's side is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Hit,
    Miss,
    /// The bet does not carry the selector shape this rule needs.
    Malformed,
}

impl Evaluation {
    fn from_hit(hit: bool) -> Self {
        if hit {
            Self::Hit
        } else {
            Self::Miss
        }
    }

    /// Final verdict for a bet on `side`. Lay inverts hits and misses only.
    pub fn verdict(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::Hit, Side::Back) | (Self::Miss, Side::Lay)
        )
    }
}

impl MatchRule {
    /// Whether this rule can settle outcomes produced by `grammar`.
    pub fn accepts(&self, grammar: &Grammar) -> bool {
        match grammar {
            Grammar::FixedCode { .. } | Grammar::Segmented { .. } => {
                matches!(self, Self::ExactId { .. } | Self::Label | Self::SideTeam)
            }
            Grammar::DirectNumeric { .. } => matches!(self, Self::ExactId { .. }),
            Grammar::BinaryCode { .. } => matches!(self, Self::Proposition),
            Grammar::CardSet { .. } => match self {
                Self::CardIntersection { selection_size } => *selection_size > 0,
                _ => false,
            },
            Grammar::DigitGroup => matches!(self, Self::DigitMembership),
        }
    }

    pub fn evaluate(&self, bet: &PlacedBet, body: &OutcomeBody) -> Evaluation {
        match self {
            Self::ExactId { offset } => {
                let Some(target) = numeric_target(body) else {
                    return self.incompatible(body);
                };
                match bet.sr.and_then(|sr| sr.checked_add(*offset)) {
                    Some(selector) => Evaluation::from_hit(selector == target),
                    None => Evaluation::Malformed,
                }
            }
            Self::Label => {
                let Some(label) = label_target(body) else {
                    return self.incompatible(body);
                };
                let Some(nat) = non_blank(bet.nat.as_deref()) else {
                    return Evaluation::Malformed;
                };
                Evaluation::from_hit(normalize_label(nat) == normalize_label(label))
            }
            Self::SideTeam => {
                let target = match body {
                    OutcomeBody::Winner { winner_id, .. } => *winner_id,
                    OutcomeBody::Segmented { winner_index, .. } => *winner_index,
                    _ => return self.incompatible(body),
                };
                match bet.psid {
                    Some(psid) => Evaluation::from_hit(psid == target),
                    None => Evaluation::Malformed,
                }
            }
            Self::Proposition => {
                let OutcomeBody::Binary { is_win } = body else {
                    return self.incompatible(body);
                };
                match bet.proposition() {
                    Some(Proposition::Yes) => Evaluation::from_hit(*is_win),
                    Some(Proposition::No) => Evaluation::from_hit(!*is_win),
                    None => Evaluation::Malformed,
                }
            }
            Self::CardIntersection { selection_size } => {
                let OutcomeBody::CardSet { cards } = body else {
                    return self.incompatible(body);
                };
                evaluate_card_selection(bet, cards, *selection_size)
            }
            Self::DigitMembership => {
                let OutcomeBody::Digits { digits, .. } = body else {
                    return self.incompatible(body);
                };
                let Some(sr) = bet.sr else {
                    return Evaluation::Malformed;
                };
                if sr > MAX_SINGLE_DIGIT_SELECTOR {
                    debug!(sr, "combination selectors are not settled");
                    return Evaluation::Malformed;
                }
                match u8::try_from(sr) {
                    Ok(digit) if digit >= 1 => Evaluation::from_hit(digits.contains(&digit)),
                    _ => Evaluation::Malformed,
                }
            }
        }
    }

    fn incompatible(&self, body: &OutcomeBody) -> Evaluation {
        error!(rule = ?self, ?body, "rule applied to an incompatible outcome");
        Evaluation::Malformed
    }
}

fn numeric_target(body: &OutcomeBody) -> Option<i64> {
    match body {
        OutcomeBody::Winner { winner_id, .. } => Some(*winner_id),
        OutcomeBody::Segmented { winner_index, .. } => Some(*winner_index),
        OutcomeBody::Numeric { value } => Some(*value),
        _ => None,
    }
}

fn label_target(body: &OutcomeBody) -> Option<&str> {
    match body {
        OutcomeBody::Winner { winner_label, .. } | OutcomeBody::Segmented { winner_label, .. } => {
            Some(winner_label.as_str())
        }
        _ => None,
    }
}

fn evaluate_card_selection(bet: &PlacedBet, drawn: &[String], selection_size: usize) -> Evaluation {
    let Some(proposition) = bet.proposition() else {
        return Evaluation::Malformed;
    };
    if bet.selected_cards.len() != selection_size {
        return Evaluation::Malformed;
    }
    let mut selected: Vec<&'static str> = Vec::with_capacity(selection_size);
    for token in &bet.selected_cards {
        match card_rank(token) {
            Some(rank) if !selected.contains(&rank) => selected.push(rank),
            _ => return Evaluation::Malformed,
        }
    }
    let matched = selected
        .iter()
        .filter(|rank| drawn.iter().any(|card| card == *rank))
        .count();
    match proposition {
        Proposition::Yes => Evaluation::from_hit(matched >= 1),
        Proposition::No => Evaluation::from_hit(matched == 0),
    }
}
