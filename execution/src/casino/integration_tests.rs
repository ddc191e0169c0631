//! End-to-end settlement scenarios: resolve a table id, decode a raw round, match bets.

use super::{ConflictPolicy, DecodeOptions, TableRegistry};
use tablebook_types::{Family, HistoryEntry, OutcomeBody, PlacedBet, RawRoundEvent};

fn settle(registry: &TableRegistry, event: &RawRoundEvent, bets: &[PlacedBet]) -> Vec<bool> {
    let table = registry
        .resolve(&event.table_id)
        .unwrap_or_else(|| panic!("{} should resolve", event.table_id));
    let outcome = table
        .decode(event)
        .unwrap_or_else(|| panic!("{event:?} should decode"));
    bets.iter()
        .map(|bet| table.matches(bet, &outcome))
        .collect()
}

#[test]
fn test_fixed_enumeration_label_match() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("card32").with_win("2").with_mid("1");
    let table = registry.resolve("card32").unwrap();
    let outcome = table.decode(&event).unwrap();
    assert_eq!(outcome.winner_label(), Some("Player 9"));
    let nine = PlacedBet::new().with_nat("player 9");
    let eight = PlacedBet::new().with_nat("player 8");
    assert!(table.matches(&nine, &outcome));
    assert!(!table.matches(&eight, &outcome));
}

#[test]
fn test_binary_code_yes_wins() {
    let registry = TableRegistry::new();
    for table_id in ["kbc", "dum10"] {
        let event = RawRoundEvent::new(table_id).with_win("0").with_mid("7");
        let table = registry.resolve(table_id).unwrap();
        let outcome = table.decode(&event).unwrap();
        assert_eq!(outcome.body, OutcomeBody::Binary { is_win: true });
        assert!(table.matches(&PlacedBet::new().with_nat("Yes"), &outcome));
        assert!(table.matches(&PlacedBet::new().with_nat(" yes "), &outcome));
        assert!(!table.matches(&PlacedBet::new().with_nat("No"), &outcome));
    }
}

#[test]
fn test_segmented_description_exact_id() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("29baccarat")
        .with_win("1")
        .with_rdesc("Player A#Player A(High Baccarat)~(A:5|B:2)")
        .with_mid("r9");
    let table = registry.resolve("29baccarat").unwrap();
    let outcome = table.decode(&event).unwrap();
    assert_eq!(outcome.winner_label(), Some("Player A"));
    assert_eq!(
        settle(
            &registry,
            &event,
            &[PlacedBet::new().with_sr(1), PlacedBet::new().with_sr(2)]
        ),
        vec![true, false]
    );
}

#[test]
fn test_card_set_proposition() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("3cardj")
        .with_cards("QHH,10DD,KSS")
        .with_mid("c1");
    let table = registry.resolve("3cardj").unwrap();
    let outcome = table.decode(&event).unwrap();
    assert_eq!(
        outcome.body,
        OutcomeBody::CardSet {
            cards: vec!["Q".to_string(), "10".to_string(), "K".to_string()]
        }
    );
    let yes = |cards: [&str; 3]| PlacedBet::new().with_nat("Yes").with_selected_cards(cards);
    assert!(table.matches(&yes(["Q", "10", "K"]), &outcome));
    assert!(!table.matches(&yes(["2", "3", "4"]), &outcome));
    let short = PlacedBet::new()
        .with_nat("Yes")
        .with_selected_cards(["Q", "10"]);
    assert!(!table.matches(&short, &outcome));
}

#[test]
fn test_digit_group_membership() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("worli2").with_rdesc("378#8").with_mid(1);
    let table = registry.resolve("worli2").unwrap();
    let outcome = table.decode(&event).unwrap();
    assert_eq!(
        outcome.body,
        OutcomeBody::Digits {
            digits: vec![3, 7, 8],
            single: 8,
            patti: "378".to_string(),
        }
    );
    assert!(table.matches(&PlacedBet::new().with_sr(8), &outcome));
    assert!(!table.matches(&PlacedBet::new().with_sr(10), &outcome));
    let lay_ten = PlacedBet::new().with_sr(10).as_lay();
    assert!(!table.matches(&lay_ten, &outcome));
}

#[test]
fn test_every_family_settles_a_winning_bet() {
    let registry = TableRegistry::new();
    let win = |table_id: &str, code: &str| RawRoundEvent::new(table_id).with_win(code);
    let nat = |label: &str| PlacedBet::new().with_nat(label);
    let sr = |sr: i64| PlacedBet::new().with_sr(sr);
    let psid = |psid: i64| PlacedBet::new().with_psid(psid);
    let cases: Vec<(RawRoundEvent, PlacedBet)> = vec![
        (win("teen20", "3"), nat("Player B")),
        (win("teen", "2"), psid(2)),
        (win("dt20", "3"), nat("tie")),
        (RawRoundEvent::new("dt6").with_win(1), psid(1)),
        (
            win("dtl20", "3")
                .with_rdesc("Lion#Lion Red|Lion Odd")
                .with_cards("KHH|5DD|QSS"),
            nat("Lion"),
        ),
        (win("lucky7b", "0"), nat("Tie")),
        (win("abj", "2"), psid(2)),
        (win("card32eu", "4"), nat("Player 11")),
        (win("btable", "6"), sr(6)),
        (win("aaa", "2"), sr(2)),
        (win("queen", "1"), sr(0)),
        (win("race20", "2"), nat("k heart")),
        (win("superover", "1"), psid(1)),
        (win("cmatch20", "10"), sr(10)),
        (win("cmeter", "1234"), sr(1234)),
        (win("ballbyball", "1"), sr(0)),
        (
            win("baccarat2", "2")
                .with_rdesc("Banker#Banker Pair")
                .with_cards("KHH,5DD,2SS,9CC"),
            nat("banker"),
        ),
        (
            win("29baccarat", "2").with_rdesc("Player B#Player B(Low Baccarat)"),
            sr(2),
        ),
        (
            win("poker20", "11").with_rdesc("Player B(Two Pair)#Pair: 8"),
            nat("Player B"),
        ),
        (win("poker6", "4").with_rdesc("Player 4 (Flush)"), sr(4)),
        (win("poker", "1").with_rdesc("Player A#Straight"), psid(1)),
        (
            RawRoundEvent::new("3cardj").with_card("2SS,9HH,JDD"),
            nat("no").with_selected_cards(["A", "K", "Q"]),
        ),
        (RawRoundEvent::new("worli").with_rdesc("260"), sr(6)),
        (RawRoundEvent::new("kbc").with_win_nat("Lost"), nat("No")),
        (RawRoundEvent::new("dum10").with_win(0), nat("Yes")),
    ];
    assert_eq!(cases.len(), Family::ALL.len());

    let mut covered = Vec::new();
    for (event, bet) in cases {
        let event = event.with_mid("round-1");
        let table = registry.resolve(&event.table_id).unwrap();
        covered.push(table.family());
        let verdicts = settle(&registry, &event, &[bet.clone(), bet.as_lay()]);
        let table_id = &event.table_id;
        assert_eq!(verdicts, [true, false], "back/lay on {table_id}");
    }
    covered.sort();
    let mut all = Family::ALL.to_vec();
    all.sort();
    assert_eq!(covered, all);
}

#[test]
fn test_binary_conflict_policy_is_configurable() {
    let event = RawRoundEvent::new("kbc")
        .with_win("2")
        .with_win_nat("win")
        .with_mid("k9");
    let yes = PlacedBet::new().with_nat("Yes");

    let default = TableRegistry::new();
    assert_eq!(settle(&default, &event, &[yes.clone()]), vec![true]);

    let prefer_loss = TableRegistry::builder()
        .options(DecodeOptions {
            binary_conflict: ConflictPolicy::PreferLoss,
        })
        .build()
        .unwrap();
    assert_eq!(settle(&prefer_loss, &event, &[yes]), vec![false]);

    let reject = TableRegistry::builder()
        .options(DecodeOptions {
            binary_conflict: ConflictPolicy::Reject,
        })
        .build()
        .unwrap();
    assert!(reject.resolve("kbc").unwrap().decode(&event).is_none());
}

#[test]
fn test_outcome_from_another_family_never_wins() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("dt20").with_win("1").with_mid("1");
    let outcome = registry.resolve("dt20").unwrap().decode(&event).unwrap();
    let other = registry.resolve("dt6").unwrap();
    assert!(!other.matches(&PlacedBet::new().with_psid(1), &outcome));
    let lay_two = PlacedBet::new().with_psid(2).as_lay();
    assert!(!other.matches(&lay_two, &outcome));
}

#[test]
fn test_decoding_does_not_touch_input() {
    let registry = TableRegistry::new();
    let event = RawRoundEvent::new("poker20")
        .with_win("11")
        .with_rdesc(" Player A (Full House)")
        .with_mid(77);
    let before = event.clone();
    let table = registry.resolve("poker20").unwrap();
    let first = table.decode(&event);
    assert_eq!(event, before);
    assert_eq!(first, table.decode(&event));
}

#[test]
fn test_history_through_registry() {
    let registry = TableRegistry::new();
    let rows = vec![
        RawRoundEvent::new("queen").with_win("4").with_mid("q1"),
        RawRoundEvent::new("queen").with_mid("q2"),
        RawRoundEvent::new("queen").with_win("1").with_mid(3),
    ];
    let entries = registry.resolve("queen").unwrap().history(&rows);
    assert_eq!(
        entries,
        vec![
            HistoryEntry {
                round_id: Some("q1".to_string()),
                result: "Total 3".to_string()
            },
            HistoryEntry {
                round_id: Some("q2".to_string()),
                result: "-".to_string()
            },
            HistoryEntry {
                round_id: Some("3".to_string()),
                result: "Total 0".to_string()
            },
        ]
    );
}
