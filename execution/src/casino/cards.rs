//! Shared playing-card helpers.
//!
//! Providers send cards as a rank followed by a suit marker, e.g. `QHH`, `10DD`, `ASS`.
//! Settlement only cares about ranks, so tokens are reduced to one of
//! `A 2 3 4 5 6 7 8 9 10 J Q K`. `T` is accepted as an alias for `10`.

use tablebook_types::CARD_RANKS;
use tracing::debug;

use super::payload::split_tokens;

/// Returns the canonical rank for a card token, stripping any alphabetic suit marker.
pub(crate) fn card_rank(token: &str) -> Option<&'static str> {
    let token = token.trim().to_ascii_uppercase();
    let (rank, suit) = if let Some(suit) = token.strip_prefix("10") {
        ("10", suit)
    } else {
        let mut chars = token.chars();
        let first = chars.next()?;
        let rank = match first {
            'T' => "10",
            'A' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9' | 'J' | 'Q' | 'K' => {
                &token[..first.len_utf8()]
            }
            _ => return None,
        };
        (rank, chars.as_str())
    };
    if !suit.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    CARD_RANKS
        .iter()
        .copied()
        .find(|candidate| *candidate == rank)
}

/// Splits a card list and reduces every token to its rank. Unrecognized tokens are skipped.
pub(crate) fn card_ranks(text: &str, delimiter: char) -> Vec<String> {
    split_tokens(text, delimiter)
        .into_iter()
        .filter_map(|token| {
            let rank = card_rank(&token);
            if rank.is_none() {
                debug!(token = %token, "skipping unrecognized card token");
            }
            rank.map(str::to_string)
        })
        .collect()
}
