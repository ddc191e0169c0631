use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Whether a bet backs an outcome or lays against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Back,
    Lay,
}

impl Side {
    pub fn is_lay(&self) -> bool {
        matches!(self, Self::Lay)
    }
}

/// Yes/No proposition carried in a bet's `nat` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Proposition {
    Yes,
    No,
}

/// Error returned when a `nat` value is neither Yes nor No.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("not a yes/no proposition: {0}")]
pub struct UnknownProposition(pub String);

impl FromStr for Proposition {
    type Err = UnknownProposition;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("yes") {
            Ok(Self::Yes)
        } else if value.eq_ignore_ascii_case("no") {
            Ok(Self::No)
        } else {
            Err(UnknownProposition(value.to_string()))
        }
    }
}

/// A bet record as loaded by the external settlement job.
///
/// Which selector matters depends on the table's family: `nat` for label matching,
/// `sr` for numeric indexes, `psid` for team/side ids, `selected_cards` for card sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBet {
    /// Caller's identifier, echoed back in verdicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sr: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_cards: Vec<String>,
    #[serde(default)]
    pub side: Side,
}

impl PlacedBet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_nat(mut self, nat: impl Into<String>) -> Self {
        self.nat = Some(nat.into());
        self
    }

    pub fn with_sr(mut self, sr: i64) -> Self {
        self.sr = Some(sr);
        self
    }

    pub fn with_psid(mut self, psid: i64) -> Self {
        self.psid = Some(psid);
        self
    }

    pub fn with_selected_cards<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_cards = cards.into_iter().map(Into::into).collect();
        self
    }

    pub fn as_lay(mut self) -> Self {
        self.side = Side::Lay;
        self
    }

    pub fn as_back(mut self) -> Self {
        self.side = Side::Back;
        self
    }

    /// Yes/No proposition parsed from `nat`, if it holds one.
    pub fn proposition(&self) -> Option<Proposition> {
        self.nat.as_deref().and_then(|nat| nat.parse().ok())
    }
}
