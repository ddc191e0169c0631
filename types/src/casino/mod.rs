//! Casino domain types.
//!
//! Defines the raw round fields, placed bets, game families, and decoded outcomes shared by
//! the execution layer and the settler.

mod bet;
mod constants;
mod family;
mod field;
mod outcome;
mod round;

pub use bet::*;
pub use constants::*;
pub use family::*;
pub use field::*;
pub use outcome::*;
pub use round::*;
