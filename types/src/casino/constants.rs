/// Shown in history rows whose round could not be decoded.
pub const HISTORY_PLACEHOLDER: &str = "-";

/// Number of digits in a patti draw.
pub const PATTI_LEN: usize = 3;

/// Largest bet selector that names a single digit; anything above is a combination.
pub const MAX_SINGLE_DIGIT_SELECTOR: i64 = 9;

/// Card ranks in display order. `10` is the only two-character rank.
pub const CARD_RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];
