use handhistory::Chips;
use handhistory::convert::*;
use handhistory::hand::*;
use handhistory::render::*;
use rust_decimal_macros::dec;

const TRANSCRIPT: &str = include_str!("data/everleaf.txt");

fn hands() -> Vec<Result<HandAccumulator, ConvertError>> {
    Converter::new(Everleaf).convert_all(TRANSCRIPT)
}

fn hand(i: usize) -> HandAccumulator {
    hands().remove(i).unwrap()
}

fn conserved(hand: &HandAccumulator) -> bool {
    let starting = hand.players().iter().map(Player::starting).sum::<Chips>();
    let ending = hand.players().iter().map(Player::stack).sum::<Chips>();
    starting == ending + hand.ledger().total()
}

fn reconciled(hand: &HandAccumulator) -> bool {
    let pots = hand.pots().unwrap().iter().sum::<Chips>();
    let returned = hand.returned().unwrap().values().sum::<Chips>();
    let rake = hand.rake().unwrap();
    pots + returned == hand.ledger().total()
        && pots == hand.total_pot().unwrap()
        && hand.total_collected() + rake == pots
}

#[test]
fn batch_tally() {
    let results = hands();
    assert_eq!(results.len(), 5);
    let tally = results.iter().collect::<Tally>();
    assert_eq!(
        tally,
        Tally {
            clean: 3,
            partial: 1,
            failed: 1
        }
    );
    assert_eq!(
        results[4].as_ref().err(),
        Some(&ConvertError::UnsupportedGame(Game::Stud))
    );
}

#[test]
fn every_hand_conserves_chips() {
    for hand in hands().iter().flatten() {
        assert!(conserved(hand), "hand {}", hand.info().id);
        assert!(reconciled(hand), "hand {}", hand.info().id);
    }
}

#[test]
fn uncalled_bet_and_rake() {
    let hand = hand(0);
    assert_eq!(hand.info().id, "55208539");
    assert_eq!(hand.info().max_seats, 10);
    assert_eq!(hand.hero(), Some("dogge"));
    assert_eq!(hand.validity(), Validity::Clean);
    assert_eq!(hand.pots().unwrap(), &[dec!(19)]);
    assert_eq!(hand.returned().unwrap().get("BadBeatBox"), Some(&dec!(10)));
    assert_eq!(hand.rake().unwrap(), dec!(0.45));
    assert_eq!(hand.stack("BadBeatBox"), Some(dec!(79.97)));
    assert_eq!(hand.stack("EricBlade"), Some(dec!(64.96)));
    let raise = hand
        .actions(Segment::Preflop)
        .iter()
        .find_map(|a| match a.play() {
            Play::Raise(raise) => Some(*raise),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        (raise.call(), raise.raise_by(), raise.raise_to()),
        (dec!(0.50), dec!(3), dec!(4))
    );
}

#[test]
fn all_in_side_pot_showdown() {
    let hand = hand(1);
    assert_eq!(hand.game().currency, Currency::Eur);
    assert_eq!(hand.info().table, "Casino Lyon Vert 58");
    assert_eq!(hand.info().max_seats, 6);
    assert_eq!(hand.pots().unwrap(), &[dec!(120), dec!(120)]);
    assert!(hand.returned().unwrap().is_empty());
    assert_eq!(hand.collected().get("alpha"), Some(&dec!(237)));
    assert_eq!(hand.rake().unwrap(), dec!(3));
    assert!(hand.has_shown("charlie"));
    assert_eq!(hand.hole_cards("bravo").len(), 2);
    assert_eq!(hand.board_cards().count(), 5);
    assert!(hand.actions(Segment::Flop).iter().all(Action::is_all_in));
    assert!(hand.actions(Segment::Preflop)[0].is_all_in());
}

#[test]
fn cp1252_transcript_reads_like_utf8() {
    let bytes = include_bytes!("data/everleaf_cp1252.txt");
    assert!(std::str::from_utf8(bytes).is_err());
    let text = Converter::<Everleaf>::decode(bytes);
    let results = Converter::new(Everleaf).convert_all(&text);
    assert_eq!(results.len(), 1);
    let hand = results.into_iter().next().unwrap().unwrap();
    assert_eq!(hand.info().id, "3732225");
    assert_eq!(hand.game().currency, Currency::Eur);
    assert_eq!(hand.pots().unwrap(), &[dec!(120), dec!(120)]);
    assert_eq!(hand.validity(), Validity::Clean);
}

#[test]
fn tournament_walk() {
    let hand = hand(2);
    assert_eq!(hand.game().currency, Currency::Chips);
    assert_eq!(hand.info().table, "2");
    assert_eq!(hand.pots().unwrap(), &[dec!(20)]);
    assert!(hand.returned().unwrap().is_empty());
    assert!(hand.issues().is_empty());
    assert_eq!(hand.posted()[0], (None, Blind::Small));
    assert_eq!(hand.hero(), None);
}

#[test]
fn malformed_flop_is_dropped() {
    let hand = hand(3);
    assert_eq!(hand.validity(), Validity::Partial);
    assert_eq!(hand.issues().len(), 1);
    assert!(matches!(
        hand.issues()[0],
        HandError::MalformedSegment(Segment::Flop, _)
    ));
    assert!(hand.board(Segment::Flop).is_empty());
    assert!(hand.actions(Segment::Flop).is_empty());
    assert_eq!(hand.board(Segment::Turn).len(), 1);
    assert_eq!(hand.returned().unwrap().get("randy888"), Some(&dec!(1)));
    assert_eq!(hand.pots().unwrap(), &[dec!(2)]);
}

#[test]
fn stars_text() {
    let text = Stars.render(&hand(0)).unwrap();
    let expected = [
        "PokerStars Game #55208539: Hold'em No Limit ($0.50/$1 USD) - 2008/09/01 13:35:01 UTC",
        "Table 'Speed Kuala' 10-max Seat #1 is the button",
        "Seat 1: BadBeatBox ($98.97 in chips)",
        "EricBlade: posts small blind $0.50",
        "randy888: posts big blind $1",
        "*** HOLE CARDS ***",
        "Dealt to dogge [4d Kh]",
        "EricBlade: raises $3 to $4",
        "*** FLOP *** [5s 5c 9s]",
        "*** TURN *** [5s 5c 9s] [Jd]",
        "Uncalled bet ($10) returned to BadBeatBox",
        "BadBeatBox collected $18.55 from pot",
        "Total pot $19 | Rake $0.45",
        "Board [5s 5c 9s Jd]",
        "Seat 1: BadBeatBox collected ($18.55)",
        "Seat 3: EricBlade folded",
        "Seat 8: dogge folded",
    ];
    for line in expected {
        assert!(text.lines().any(|l| l == line), "missing {:?} in\n{}", line, text);
    }
}

#[test]
fn stars_text_side_pots() {
    let text = Stars.render(&hand(1)).unwrap();
    let expected = [
        "charlie: raises €39 to €40 and is all-in",
        "alpha: bets €60 and is all-in",
        "*** RIVER *** [2c 7h Td Js] [3d]",
        "Total pot €240 Main pot €120. Side pot €120. | Rake €3",
        "Seat 1: alpha showed [Ah Ad] and won (€237)",
        "Seat 2: bravo showed [Kc Kd]",
    ];
    for line in expected {
        assert!(text.lines().any(|l| l == line), "missing {:?} in\n{}", line, text);
    }
}

#[test]
fn json_round_trips_amounts() {
    let json = Json.render(&hand(2)).unwrap();
    let value = serde_json::from_str::<serde_json::Value>(&json).unwrap();
    assert_eq!(value["total"], "20");
    assert_eq!(value["game"]["currency"], "T$");
    assert_eq!(value["info"]["id"], "75065769");
}
