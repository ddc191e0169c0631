//! Tablebook execution layer.
//!
//! This crate turns raw provider rounds into typed outcomes and settles placed bets against
//! them. Every game family is a static descriptor consumed by one generic decoder and one
//! generic matcher.
//!
//! ## Determinism requirements
//! - Decoding the same raw round twice yields equal outcomes.
//! - Matching never depends on anything but the bet and the outcome.
//! - Avoid iteration order of hash-based collections influencing outputs.
//!
//! The primary entrypoints are [`TableRegistry`] and [`settle_round`].
//!
//! ## Settling a round (example)
//! ```rust
//! use tablebook_execution::{settle_round, TableRegistry};
//! use tablebook_types::{PlacedBet, RawRoundEvent};
//!
//! let registry = TableRegistry::default();
//! let event = RawRoundEvent::new("card32eu").with_win("2").with_mid("1209");
//! let bets = vec![
//!     PlacedBet::new().with_nat("player 9"),
//!     PlacedBet::new().with_nat("player 8"),
//! ];
//! let settlement = settle_round(&registry, &event, &bets).unwrap();
//! assert_eq!(settlement.won_count(), 1);
//! ```

pub mod casino;
pub mod settle;

#[cfg(test)]
mod determinism_tests;

pub use casino::{
    ConflictPolicy, DecodeOptions, FamilyDescriptor, PatternKind, RegistryBuilder, RegistryError,
    Table, TableRegistry, UnknownConflictPolicy, UnknownPatternKind,
};
#[cfg(feature = "parallel")]
pub use settle::settle_round_parallel;
pub use settle::{format_history, settle_round, RoundSettlement, SettleError, Verdict};
