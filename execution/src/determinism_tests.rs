//! Property tests for decode determinism and settlement invariants.
//!
//! 1. **Determinism**: decoding the same raw round twice yields equal outcomes.
//! 2. **Idempotence**: matching the same bet against the same outcome twice agrees.
//! 3. **Exclusivity**: in exclusive-winner families at most one selector wins a round.
//! 4. **Back/lay duality**: for well-formed bets, lay wins exactly when back loses.
//! 5. **Card threshold**: an under-sized card selection never wins.

#[cfg(test)]
mod tests {
    use crate::casino::{
        DecodeOptions, Evaluation, FamilyDescriptor, Grammar, MatchRule, TableRegistry,
    };
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tablebook_types::{
        Family, FieldValue, Outcome, OutcomeBody, PlacedBet, RawRoundEvent, Side, CARD_RANKS,
    };

    const STATUS_LABELS: &[&str] = &["win", "Won", "lost", "LOSE", "pending", " "];
    const CARD_TOKENS: &[&str] = &["QHH", "10DD", "KSS", "2CC", "ASS", "7hh", "??", ""];
    const BET_LABELS: &[&str] = &[
        "Yes", "no", "Player A", "player 9", "Dragon", "Tie", "Team B", "K Heart",
    ];
    const WINNER_LABELS: &[&str] = &["Player A", "Player B", "Banker", "Lion", "Tiger"];

    fn builtin(family: Family) -> &'static FamilyDescriptor {
        TableRegistry::builtin(family).expect("every family has a built-in descriptor")
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Generators
    // ─────────────────────────────────────────────────────────────────────────────

    fn arb_family() -> impl Strategy<Value = Family> {
        prop::sample::select(Family::ALL.to_vec())
    }

    fn arb_field() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            (-2i64..12).prop_map(FieldValue::Integer),
            any::<i64>().prop_map(FieldValue::Integer),
            (-2i64..12).prop_map(|v| FieldValue::Float(v as f64)),
            "[ 0-9]{0,3}".prop_map(FieldValue::Text),
            prop::sample::select(STATUS_LABELS).prop_map(FieldValue::from),
        ]
    }

    fn arb_rdesc() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9]{3}(#[0-9])?",
            "[A-Za-z ]{0,10}#[A-Za-z ]{0,10}",
            "[A-Za-z ]{0,10}\\([A-Za-z ]{0,8}\\)",
            ".{0,12}",
        ]
    }

    fn arb_cards() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(CARD_TOKENS), 0..6)
            .prop_map(|tokens| tokens.join(","))
    }

    fn arb_event() -> impl Strategy<Value = RawRoundEvent> {
        (
            prop::option::of(arb_field()),
            prop::option::of(arb_field()),
            prop::option::of(arb_rdesc()),
            prop::option::of(arb_cards()),
            prop::option::of(arb_cards()),
            prop::option::of("[a-z0-9]{0,6}".prop_map(FieldValue::Text)),
        )
            .prop_map(|(win, win_nat, rdesc, cards, card, mid)| RawRoundEvent {
                table_id: "any".to_string(),
                win,
                win_nat,
                rdesc,
                cards,
                card,
                mid,
            })
    }

    fn arb_rank() -> impl Strategy<Value = String> {
        prop::sample::select(CARD_RANKS.to_vec()).prop_map(str::to_string)
    }

    fn arb_side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Back), Just(Side::Lay)]
    }

    fn arb_nat() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(BET_LABELS).prop_map(str::to_string),
            "[a-z ]{0,6}",
        ]
    }

    fn arb_bet() -> impl Strategy<Value = PlacedBet> {
        (
            prop::option::of(arb_nat()),
            prop::option::of(-2i64..14),
            prop::option::of(-1i64..6),
            prop::collection::vec(arb_rank(), 0..5),
            arb_side(),
        )
            .prop_map(|(nat, sr, psid, selected_cards, side)| PlacedBet {
                id: None,
                nat,
                sr,
                psid,
                sid: None,
                selected_cards,
                side,
            })
    }

    fn winner_body((winner_id, winner_label): (i64, String)) -> OutcomeBody {
        OutcomeBody::Winner {
            winner_id,
            winner_label,
        }
    }

    fn segmented_body((winner_index, winner_label): (i64, String)) -> OutcomeBody {
        OutcomeBody::Segmented {
            winner_index,
            raw_description: winner_label.clone(),
            winner_label,
            cards: Vec::new(),
        }
    }

    fn card_set_body(cards: Vec<String>) -> OutcomeBody {
        OutcomeBody::CardSet { cards }
    }

    fn digits_body(digits: Vec<u8>) -> OutcomeBody {
        let single = (digits.iter().map(|d| u32::from(*d)).sum::<u32>() % 10) as u8;
        let patti = digits.iter().map(|d| char::from(b'0' + d)).collect();
        OutcomeBody::Digits {
            digits,
            single,
            patti,
        }
    }

    fn arb_body() -> impl Strategy<Value = OutcomeBody> {
        prop_oneof![
            any::<bool>().prop_map(|is_win| OutcomeBody::Binary { is_win }),
            (0i64..7, "[A-Za-z ]{1,8}").prop_map(winner_body),
            (1i64..7, "[A-Za-z ]{1,8}").prop_map(segmented_body),
            (0i64..12).prop_map(|value| OutcomeBody::Numeric { value }),
            prop::collection::vec(arb_rank(), 1..6).prop_map(card_set_body),
            prop::collection::vec(0u8..10, 3).prop_map(digits_body),
        ]
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Selector domains
    // ─────────────────────────────────────────────────────────────────────────────

    fn flip(bet: &PlacedBet) -> PlacedBet {
        let mut flipped = bet.clone();
        flipped.side = match bet.side {
            Side::Back => Side::Lay,
            Side::Lay => Side::Back,
        };
        flipped
    }

    /// One bet per selector value a family can name, for fixed-code tables.
    fn selector_domain(descriptor: &FamilyDescriptor) -> Vec<PlacedBet> {
        let Grammar::FixedCode { codes } = descriptor.grammar else {
            return Vec::new();
        };
        codes
            .iter()
            .filter_map(|entry| match descriptor.rule {
                MatchRule::Label => Some(PlacedBet::new().with_nat(entry.label)),
                MatchRule::SideTeam => Some(PlacedBet::new().with_psid(entry.code)),
                MatchRule::ExactId { offset } => {
                    Some(PlacedBet::new().with_sr(entry.code - offset))
                }
                _ => None,
            })
            .collect()
    }

    /// Distinct selectors covering every winner a segmented round in these tests can name.
    fn segmented_domain(descriptor: &FamilyDescriptor) -> Vec<PlacedBet> {
        match descriptor.rule {
            MatchRule::SideTeam => (-1i64..10)
                .map(|id| PlacedBet::new().with_psid(id))
                .collect(),
            MatchRule::ExactId { offset } => (-1i64..10)
                .map(|id| PlacedBet::new().with_sr(id - offset))
                .collect(),
            MatchRule::Label => WINNER_LABELS
                .iter()
                .map(|label| PlacedBet::new().with_nat(*label))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Selector values around `win` plus the numeric bounds of every direct-numeric family.
    fn numeric_domain(win: i64) -> BTreeSet<i64> {
        let mut domain: BTreeSet<i64> = (-2i64..14).collect();
        domain.extend(win.saturating_sub(2)..=win.saturating_add(2));
        domain.extend([9_998, 9_999, 10_000]);
        domain
    }

    fn count_wins(descriptor: &FamilyDescriptor, bets: &[PlacedBet], outcome: &Outcome) -> usize {
        bets.iter()
            .filter(|bet| descriptor.matches(bet, outcome))
            .count()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_decode_is_deterministic(family in arb_family(), event in arb_event()) {
            let descriptor = builtin(family);
            let options = DecodeOptions::default();
            let first = descriptor.decode(&event, &options);
            let second = descriptor.decode(&event, &options);
            prop_assert_eq!(&first, &second);
            if let Some(outcome) = first {
                prop_assert_eq!(outcome.family, family);
                prop_assert!(event.round_id().is_some());
            }
        }

        #[test]
        fn prop_matching_is_idempotent(
            family in arb_family(),
            body in arb_body(),
            bet in arb_bet(),
        ) {
            let descriptor = builtin(family);
            let outcome = Outcome::new(family, FieldValue::from("r1"), body);
            let first = descriptor.matches(&bet, &outcome);
            prop_assert_eq!(first, descriptor.matches(&bet, &outcome));
        }

        #[test]
        fn prop_back_lay_duality(family in arb_family(), body in arb_body(), bet in arb_bet()) {
            let descriptor = builtin(family);
            let outcome = Outcome::new(family, FieldValue::from("r1"), body);
            let flipped = flip(&bet);
            let back = descriptor.matches(&bet, &outcome);
            let lay = descriptor.matches(&flipped, &outcome);
            if descriptor.evaluate(&bet, &outcome) == Evaluation::Malformed {
                prop_assert!(!back);
                prop_assert!(!lay);
            } else {
                prop_assert_eq!(lay, !back);
            }
        }

        #[test]
        fn prop_fixed_code_winner_is_exclusive(family in arb_family(), win in -1i64..8) {
            let descriptor = builtin(family);
            let bets = selector_domain(descriptor);
            let event = RawRoundEvent::new(family.code()).with_win(win).with_mid("r1");
            if let Some(outcome) = descriptor.decode(&event, &DecodeOptions::default()) {
                let winners = count_wins(descriptor, &bets, &outcome);
                prop_assert!(winners <= 1, "{} selectors won on {}", winners, family);
                if !bets.is_empty() {
                    prop_assert_eq!(winners, 1);
                }
            }
        }

        #[test]
        fn prop_numeric_winner_is_exclusive(
            family in prop::sample::select(vec![
                Family::CricketMatch20,
                Family::CasinoMeter,
                Family::BallByBall,
            ]),
            win in prop_oneof![-2i64..12, 9_990i64..10_002],
        ) {
            let descriptor = builtin(family);
            let bets: Vec<PlacedBet> = numeric_domain(win)
                .into_iter()
                .map(|sr| PlacedBet::new().with_sr(sr))
                .collect();
            let event = RawRoundEvent::new(family.code()).with_win(win).with_mid("r1");
            if let Some(outcome) = descriptor.decode(&event, &DecodeOptions::default()) {
                prop_assert_eq!(count_wins(descriptor, &bets, &outcome), 1);
            }
        }

        #[test]
        fn prop_segmented_winner_is_exclusive(
            family in prop::sample::select(vec![
                Family::Baccarat29,
                Family::Poker6,
                Family::PokerOneDay,
                Family::Baccarat,
                Family::Poker20,
            ]),
            win in -1i64..9,
            label in prop::sample::select(WINNER_LABELS),
            detail in "[A-Za-z ]{0,8}",
        ) {
            let descriptor = builtin(family);
            let bets = segmented_domain(descriptor);
            let Grammar::Segmented { delimiter, .. } = descriptor.grammar else {
                panic!("{family} should decode segmented descriptions");
            };
            let rdesc = format!("{label}{delimiter}{detail}");
            let event = RawRoundEvent::new(family.code())
                .with_win(win)
                .with_rdesc(rdesc)
                .with_mid("r1");
            if let Some(outcome) = descriptor.decode(&event, &DecodeOptions::default()) {
                prop_assert_eq!(count_wins(descriptor, &bets, &outcome), 1);
            }
        }

        #[test]
        fn prop_undersized_card_selection_never_wins(
            drawn in prop::collection::vec(arb_rank(), 1..6),
            selected in prop::collection::vec(arb_rank(), 0..3),
            side in arb_side(),
        ) {
            let descriptor = builtin(Family::ThreeCardJudgement);
            let outcome = Outcome::new(
                Family::ThreeCardJudgement,
                FieldValue::from("r1"),
                OutcomeBody::CardSet { cards: drawn },
            );
            let mut bet = PlacedBet::new().with_nat("Yes").with_selected_cards(selected);
            bet.side = side;
            prop_assert!(!descriptor.matches(&bet, &outcome));
        }
    }
}
