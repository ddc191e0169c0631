use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Game families: every table maps to exactly one, and each family has one result
/// grammar and one settlement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "teen20")]
    Teen20,
    #[serde(rename = "teen")]
    TeenOneDay,
    #[serde(rename = "dt20")]
    DragonTiger20,
    #[serde(rename = "dt6")]
    DragonTigerOneDay,
    #[serde(rename = "dtl20")]
    DragonTigerLion,
    #[serde(rename = "lucky7")]
    Lucky7,
    #[serde(rename = "ab20")]
    AndarBahar,
    #[serde(rename = "card32")]
    Card32,
    #[serde(rename = "btable")]
    BollywoodTable,
    #[serde(rename = "aaa")]
    AmarAkbarAnthony,
    #[serde(rename = "queen")]
    CasinoQueen,
    #[serde(rename = "race20")]
    Race20,
    #[serde(rename = "superover")]
    SuperOver,
    #[serde(rename = "cmatch20")]
    CricketMatch20,
    #[serde(rename = "cmeter")]
    CasinoMeter,
    #[serde(rename = "ballbyball")]
    BallByBall,
    #[serde(rename = "baccarat")]
    Baccarat,
    #[serde(rename = "29baccarat")]
    Baccarat29,
    #[serde(rename = "poker20")]
    Poker20,
    #[serde(rename = "poker6")]
    Poker6,
    #[serde(rename = "poker")]
    PokerOneDay,
    #[serde(rename = "3cardj")]
    ThreeCardJudgement,
    #[serde(rename = "worli")]
    Worli,
    #[serde(rename = "kbc")]
    Kbc,
    #[serde(rename = "dum10")]
    DusKaDum,
}

impl Family {
    pub const ALL: [Family; 25] = [
        Family::Teen20,
        Family::TeenOneDay,
        Family::DragonTiger20,
        Family::DragonTigerOneDay,
        Family::DragonTigerLion,
        Family::Lucky7,
        Family::AndarBahar,
        Family::Card32,
        Family::BollywoodTable,
        Family::AmarAkbarAnthony,
        Family::CasinoQueen,
        Family::Race20,
        Family::SuperOver,
        Family::CricketMatch20,
        Family::CasinoMeter,
        Family::BallByBall,
        Family::Baccarat,
        Family::Baccarat29,
        Family::Poker20,
        Family::Poker6,
        Family::PokerOneDay,
        Family::ThreeCardJudgement,
        Family::Worli,
        Family::Kbc,
        Family::DusKaDum,
    ];

    /// Stable lowercase code, also used in configuration files.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Teen20 => "teen20",
            Self::TeenOneDay => "teen",
            Self::DragonTiger20 => "dt20",
            Self::DragonTigerOneDay => "dt6",
            Self::DragonTigerLion => "dtl20",
            Self::Lucky7 => "lucky7",
            Self::AndarBahar => "ab20",
            Self::Card32 => "card32",
            Self::BollywoodTable => "btable",
            Self::AmarAkbarAnthony => "aaa",
            Self::CasinoQueen => "queen",
            Self::Race20 => "race20",
            Self::SuperOver => "superover",
            Self::CricketMatch20 => "cmatch20",
            Self::CasinoMeter => "cmeter",
            Self::BallByBall => "ballbyball",
            Self::Baccarat => "baccarat",
            Self::Baccarat29 => "29baccarat",
            Self::Poker20 => "poker20",
            Self::Poker6 => "poker6",
            Self::PokerOneDay => "poker",
            Self::ThreeCardJudgement => "3cardj",
            Self::Worli => "worli",
            Self::Kbc => "kbc",
            Self::DusKaDum => "dum10",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Teen20 => "Teen Patti 20-20",
            Self::TeenOneDay => "Teen Patti One Day",
            Self::DragonTiger20 => "20-20 Dragon Tiger",
            Self::DragonTigerOneDay => "1 Day Dragon Tiger",
            Self::DragonTigerLion => "Dragon Tiger Lion",
            Self::Lucky7 => "Lucky 7",
            Self::AndarBahar => "Andar Bahar",
            Self::Card32 => "32 Cards",
            Self::BollywoodTable => "Bollywood Casino",
            Self::AmarAkbarAnthony => "Amar Akbar Anthony",
            Self::CasinoQueen => "Casino Queen",
            Self::Race20 => "Race 20-20",
            Self::SuperOver => "Super Over",
            Self::CricketMatch20 => "Cricket 20-20",
            Self::CasinoMeter => "Casino Meter",
            Self::BallByBall => "Ball by Ball",
            Self::Baccarat => "Baccarat",
            Self::Baccarat29 => "29 Card Baccarat",
            Self::Poker20 => "Poker 20-20",
            Self::Poker6 => "Poker 6 Players",
            Self::PokerOneDay => "Poker One Day",
            Self::ThreeCardJudgement => "3 Cards Judgement",
            Self::Worli => "Worli Matka",
            Self::Kbc => "Kaun Banega Crorepati",
            Self::DusKaDum => "Dus Ka Dum",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a family code is not recognized.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown family code: {0}")]
pub struct UnknownFamily(pub String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownFamily(value.to_string()))
    }
}
