//! Family descriptors and the generic decode/match engine.
//!
//! Every game family is a [`FamilyDescriptor`]: the table patterns that route to it, one
//! [`Grammar`] for decoding raw rounds, one [`MatchRule`] for settling bets, and one
//! [`HistoryStyle`]. Nothing here keeps state between calls.

mod cards;
mod families;
mod grammar;
mod history;
mod payload;
mod registry;
mod rules;

pub use grammar::{CodeEntry, ConflictPolicy, DecodeOptions, Grammar, UnknownConflictPolicy};
pub use history::HistoryStyle;
pub use registry::{
    PatternKind, RegistryBuilder, RegistryError, Route, Table, TableRegistry, UnknownPatternKind,
};
pub use rules::{Evaluation, MatchRule};

use tablebook_types::{Family, HistoryEntry, Outcome, PlacedBet, RawRoundEvent};
use tracing::error;

/// Static description of one game family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyDescriptor {
    pub family: Family,
    pub name: &'static str,
    /// Built-in routes, matched against lowercased table ids.
    pub tables: &'static [(PatternKind, &'static str)],
    pub grammar: Grammar,
    pub rule: MatchRule,
    pub history: HistoryStyle,
}

impl FamilyDescriptor {
    /// Decodes a raw round, or returns `None` when it is not settleable yet.
    pub fn decode(&self, event: &RawRoundEvent, options: &DecodeOptions) -> Option<Outcome> {
        let round_id = event.round_id()?.clone();
        let body = self.grammar.decode(event, options)?;
        Some(Outcome::new(self.family, round_id, body))
    }

    /// Rule result for `bet`, before its side is applied.
    pub fn evaluate(&self, bet: &PlacedBet, outcome: &Outcome) -> Evaluation {
        if outcome.family != self.family {
            error!(
                expected = %self.family,
                actual = %outcome.family,
                "outcome settled by the wrong family"
            );
            return Evaluation::Malformed;
        }
        self.rule.evaluate(bet, &outcome.body)
    }

    /// Whether `bet` wins against `outcome`.
    pub fn matches(&self, bet: &PlacedBet, outcome: &Outcome) -> bool {
        self.evaluate(bet, outcome).verdict(bet.side)
    }

    pub fn history(&self, events: &[RawRoundEvent], options: &DecodeOptions) -> Vec<HistoryEntry> {
        history::format_rows(&self.grammar, self.history, events, options)
    }
}

#[cfg(test)]
mod integration_tests;
