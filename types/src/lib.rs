//! Common types used throughout tablebook.
//!
//! Everything here is plain data: the untyped round fields a provider hands us, the bet
//! records an external settlement job loads, and the decoded outcome that ties the two
//! together. Decoding and matching live in `tablebook-execution`.

pub mod casino;

pub use casino::{
    Family, FieldValue, HistoryEntry, Outcome, OutcomeBody, PlacedBet, Proposition, RawRoundEvent,
    Side, UnknownFamily, UnknownProposition, CARD_RANKS, HISTORY_PLACEHOLDER,
    MAX_SINGLE_DIGIT_SELECTOR, PATTI_LEN,
};
