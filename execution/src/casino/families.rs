//! Built-in family descriptors.
//!
//! One entry per [`Family`]. Adding a family means adding a variant and a descriptor here;
//! decoding, matching and history all run through the generic engine.

use tablebook_types::Family;

use super::grammar::{CodeEntry, Grammar};
use super::history::HistoryStyle;
use super::registry::PatternKind;
use super::rules::MatchRule;
use super::FamilyDescriptor;

const WIN_LABELS: &[&str] = &["win", "won"];
const LOSS_LABELS: &[&str] = &["lose", "lost", "loss"];

const BINARY: Grammar = Grammar::BinaryCode {
    sentinel: "0",
    win_labels: WIN_LABELS,
    loss_labels: LOSS_LABELS,
};

const HASH_SEGMENTS: Grammar = Grammar::Segmented {
    delimiter: '#',
    card_delimiter: ',',
};

const PAREN_SEGMENTS: Grammar = Grammar::Segmented {
    delimiter: '(',
    card_delimiter: ',',
};

const TEEN20_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Player A", "A"),
    CodeEntry::new(3, "Player B", "B"),
];

const TEEN_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Player A", "A"),
    CodeEntry::new(2, "Player B", "B"),
];

const DT20_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Dragon", "D"),
    CodeEntry::new(2, "Tiger", "T"),
    CodeEntry::new(3, "Tie", "TIE"),
];

const DT6_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Dragon", "D"),
    CodeEntry::new(2, "Tiger", "T"),
];

const LUCKY7_CODES: &[CodeEntry] = &[
    CodeEntry::new(0, "Tie", "T"),
    CodeEntry::new(1, "Low Card", "L"),
    CodeEntry::new(2, "High Card", "H"),
];

const ANDAR_BAHAR_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Andar", "A"),
    CodeEntry::new(2, "Bahar", "B"),
];

const CARD32_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Player 8", "8"),
    CodeEntry::new(2, "Player 9", "9"),
    CodeEntry::new(3, "Player 10", "10"),
    CodeEntry::new(4, "Player 11", "11"),
];

const BOLLYWOOD_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Don", "A"),
    CodeEntry::new(2, "Amar Akbar Anthony", "B"),
    CodeEntry::new(3, "Sahib Bibi Aur Ghulam", "C"),
    CodeEntry::new(4, "Dharam Veer", "D"),
    CodeEntry::new(5, "Kis Kisko Pyaar Karoon", "E"),
    CodeEntry::new(6, "Ghulam", "F"),
];

const AAA_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Amar", "A"),
    CodeEntry::new(2, "Akbar", "B"),
    CodeEntry::new(3, "Anthony", "C"),
];

const QUEEN_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Total 0", "0"),
    CodeEntry::new(2, "Total 1", "1"),
    CodeEntry::new(3, "Total 2", "2"),
    CodeEntry::new(4, "Total 3", "3"),
];

const RACE20_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "K Spade", "S"),
    CodeEntry::new(2, "K Heart", "H"),
    CodeEntry::new(3, "K Club", "C"),
    CodeEntry::new(4, "K Diamond", "D"),
];

const SUPER_OVER_CODES: &[CodeEntry] = &[
    CodeEntry::new(1, "Team A", "A"),
    CodeEntry::new(2, "Team B", "B"),
];

pub(crate) static BUILTIN: [FamilyDescriptor; 25] = [
    FamilyDescriptor {
        family: Family::Teen20,
        name: "Teen Patti 20-20",
        tables: &[(PatternKind::Exact, "teen20")],
        grammar: Grammar::FixedCode {
            codes: TEEN20_CODES,
        },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::TeenOneDay,
        name: "Teen Patti One Day",
        tables: &[(PatternKind::Exact, "teen")],
        grammar: Grammar::FixedCode { codes: TEEN_CODES },
        rule: MatchRule::SideTeam,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::DragonTiger20,
        name: "20-20 Dragon Tiger",
        tables: &[(PatternKind::Exact, "dt20")],
        grammar: Grammar::FixedCode { codes: DT20_CODES },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::DragonTigerOneDay,
        name: "1 Day Dragon Tiger",
        tables: &[(PatternKind::Exact, "dt6")],
        grammar: Grammar::FixedCode { codes: DT6_CODES },
        rule: MatchRule::SideTeam,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::DragonTigerLion,
        name: "Dragon Tiger Lion",
        tables: &[(PatternKind::Exact, "dtl20")],
        grammar: Grammar::Segmented {
            delimiter: '#',
            card_delimiter: '|',
        },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::Lucky7,
        name: "Lucky 7",
        tables: &[(PatternKind::Prefix, "lucky7")],
        grammar: Grammar::FixedCode {
            codes: LUCKY7_CODES,
        },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::AndarBahar,
        name: "Andar Bahar",
        tables: &[(PatternKind::Exact, "ab20"), (PatternKind::Exact, "abj")],
        grammar: Grammar::FixedCode {
            codes: ANDAR_BAHAR_CODES,
        },
        rule: MatchRule::SideTeam,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::Card32,
        name: "32 Cards",
        tables: &[(PatternKind::Prefix, "card32")],
        grammar: Grammar::FixedCode {
            codes: CARD32_CODES,
        },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::BollywoodTable,
        name: "Bollywood Casino",
        tables: &[(PatternKind::Exact, "btable")],
        grammar: Grammar::FixedCode {
            codes: BOLLYWOOD_CODES,
        },
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::AmarAkbarAnthony,
        name: "Amar Akbar Anthony",
        tables: &[(PatternKind::Exact, "aaa")],
        grammar: Grammar::FixedCode { codes: AAA_CODES },
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::CasinoQueen,
        name: "Casino Queen",
        tables: &[(PatternKind::Exact, "queen")],
        grammar: Grammar::FixedCode { codes: QUEEN_CODES },
        // Bets carry the total (0..=3); win codes start at 1.
        rule: MatchRule::ExactId { offset: 1 },
        history: HistoryStyle::Label,
    },
    FamilyDescriptor {
        family: Family::Race20,
        name: "Race 20-20",
        tables: &[(PatternKind::Exact, "race20")],
        grammar: Grammar::FixedCode {
            codes: RACE20_CODES,
        },
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::SuperOver,
        name: "Super Over",
        tables: &[(PatternKind::Prefix, "superover")],
        grammar: Grammar::FixedCode {
            codes: SUPER_OVER_CODES,
        },
        rule: MatchRule::SideTeam,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::CricketMatch20,
        name: "Cricket 20-20",
        tables: &[(PatternKind::Exact, "cmatch20")],
        grammar: Grammar::DirectNumeric {
            offset: 0,
            min: 2,
            max: 10,
        },
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Value,
    },
    FamilyDescriptor {
        family: Family::CasinoMeter,
        name: "Casino Meter",
        tables: &[(PatternKind::Exact, "cmeter")],
        grammar: Grammar::DirectNumeric {
            offset: 0,
            min: 0,
            max: 9999,
        },
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Value,
    },
    FamilyDescriptor {
        family: Family::BallByBall,
        name: "Ball by Ball",
        tables: &[(PatternKind::Exact, "ballbyball")],
        // win 1 is a dot ball.
        grammar: Grammar::DirectNumeric {
            offset: -1,
            min: 0,
            max: 7,
        },
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Value,
    },
    FamilyDescriptor {
        family: Family::Baccarat,
        name: "Baccarat",
        tables: &[(PatternKind::Contains, "baccarat")],
        grammar: HASH_SEGMENTS,
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::Baccarat29,
        name: "29 Card Baccarat",
        tables: &[(PatternKind::Exact, "29baccarat")],
        grammar: HASH_SEGMENTS,
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Label,
    },
    FamilyDescriptor {
        family: Family::Poker20,
        name: "Poker 20-20",
        tables: &[(PatternKind::Exact, "poker20")],
        grammar: PAREN_SEGMENTS,
        rule: MatchRule::Label,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::Poker6,
        name: "Poker 6 Players",
        tables: &[(PatternKind::Exact, "poker6")],
        grammar: PAREN_SEGMENTS,
        rule: MatchRule::ExactId { offset: 0 },
        history: HistoryStyle::Label,
    },
    FamilyDescriptor {
        family: Family::PokerOneDay,
        name: "Poker One Day",
        tables: &[(PatternKind::Exact, "poker")],
        grammar: HASH_SEGMENTS,
        rule: MatchRule::SideTeam,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::ThreeCardJudgement,
        name: "3 Cards Judgement",
        tables: &[(PatternKind::Exact, "3cardj")],
        grammar: Grammar::CardSet { delimiter: ',' },
        rule: MatchRule::CardIntersection { selection_size: 3 },
        history: HistoryStyle::Value,
    },
    FamilyDescriptor {
        family: Family::Worli,
        name: "Worli Matka",
        tables: &[(PatternKind::Contains, "worli")],
        grammar: Grammar::DigitGroup,
        rule: MatchRule::DigitMembership,
        history: HistoryStyle::Label,
    },
    FamilyDescriptor {
        family: Family::Kbc,
        name: "Kaun Banega Crorepati",
        tables: &[(PatternKind::Exact, "kbc")],
        grammar: BINARY,
        rule: MatchRule::Proposition,
        history: HistoryStyle::Short,
    },
    FamilyDescriptor {
        family: Family::DusKaDum,
        name: "Dus Ka Dum",
        tables: &[(PatternKind::Exact, "dum10")],
        grammar: BINARY,
        rule: MatchRule::Proposition,
        history: HistoryStyle::Short,
    },
];
