use super::error::ConvertError;
use super::reader::Reader;
use crate::Chips;
use crate::DEFAULT_MAX_SEATS;
use crate::MAX_SEATS;
use crate::hand::*;
use chrono::NaiveDateTime;
use regex::Captures;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// `$ 1.50 USD`, `€0.50`, or bare tournament chips `20`
const AMOUNT: &str = r"(?:\$|€)?\s*(?P<amount>[.\d]+)(?:\s+(?:USD|EUR))?";

static GAME_INFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^(?:Blinds\s+)?(?P<currency>\$|€)?\s*(?P<sb>[.\d]+)/\s*(?:\$|€)?\s*(?P<bb>[.\d]+)\s+",
        r"(?:(?P<limit>NL|PL)\s+)?(?P<game>Hold'em|Omaha|7 Card Stud)",
    ))
    .expect("game info pattern")
});
static HAND_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Game #(?P<id>\d+)").expect("hand id pattern"));
static STARTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<started>\d{4}/\d\d/\d\d - \d\d:\d\d:\d\d)").expect("start time pattern")
});
static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Table (?P<table>.+?)\s*$").expect("table pattern"));
static BUTTON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Seat (?P<seat>\d+) is the button").expect("button pattern")
});
static SEAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^Seat (?P<seat>\d+): (?P<name>.+?) \(\s*",
        r"(?:(?:\$|€)?\s*(?P<cash>[.\d]+)(?:\s+(?:USD|EUR))?|new player|All-in)\s*\)\s*$",
    ))
    .expect("seat pattern")
});
static BOARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[\s*(?P<cards>[^\]]*?)\s*\]").expect("board pattern"));

/// Lines that open each betting segment, in the order they are dealt.
const MARKERS: [(Segment, &str); 4] = [
    (Segment::Preflop, "** Dealing down cards **"),
    (Segment::Flop, "** Dealing Flop **"),
    (Segment::Turn, "** Dealing Turn **"),
    (Segment::River, "** Dealing River **"),
];

/// Everleaf Gaming ring and tournament hands, hold'em and omaha.
#[derive(Debug, Clone, Copy, Default)]
pub struct Everleaf;

impl Reader for Everleaf {
    fn site(&self) -> &'static str {
        "Everleaf"
    }

    fn game_type(&self, text: &str) -> Result<GameType, ConvertError> {
        let m = GAME_INFO.captures(text).ok_or(ConvertError::UnrecognizedGame)?;
        let currency = match m.name("currency").map(|c| c.as_str()) {
            Some("€") => Currency::Eur,
            Some(_) => Currency::Usd,
            None => Currency::Chips,
        };
        let limit = match m.name("limit").map(|l| l.as_str()) {
            Some("NL") => Limit::NoLimit,
            Some("PL") => Limit::PotLimit,
            _ => Limit::FixedLimit,
        };
        let game = match &m["game"] {
            "Hold'em" => Game::Holdem,
            "Omaha" => Game::Omaha,
            _ => Game::Stud,
        };
        let sb = Chips::from_str(&m["sb"]).map_err(|_| ConvertError::UnrecognizedGame)?;
        let bb = Chips::from_str(&m["bb"]).map_err(|_| ConvertError::UnrecognizedGame)?;
        Ok(GameType {
            game,
            limit,
            currency,
            sb,
            bb,
        })
    }

    fn read(&self, text: &str) -> Result<HandAccumulator, ConvertError> {
        let game = self.game_type(text)?;
        if game.variant() != Variant::Flop {
            return Err(ConvertError::UnsupportedGame(game.game));
        }
        let mut hand = HandAccumulator::new(game);
        read_hand_info(&mut hand, text)?;
        read_player_stacks(&mut hand, text);
        read_button(&mut hand, text);
        if hand.players().is_empty() {
            log::warn!("hand {} has nobody dealt in", hand.info().id);
            hand.finalize()?;
            return Ok(hand);
        }
        let patterns = Patterns::new(hand.players().iter().map(Player::name))
            .map_err(|e| ConvertError::Pattern(e.to_string()))?;
        mark_segments(&mut hand, text);
        read_community_cards(&mut hand);
        patterns.read_blinds(&mut hand, text);
        patterns.read_hero_cards(&mut hand, text);
        patterns.read_showdown(&mut hand, text);
        for (segment, _) in MARKERS {
            if let Some(span) = hand.span(segment).map(str::to_string) {
                patterns.read_actions(&mut hand, segment, &span);
            }
        }
        patterns.read_collected(&mut hand, text);
        hand.finalize()?;
        log::debug!(
            "{} hand {} read with {} actions",
            self.site(),
            hand.info().id,
            hand.log().len()
        );
        Ok(hand)
    }
}

fn read_hand_info(hand: &mut HandAccumulator, text: &str) -> Result<(), ConvertError> {
    let id = HAND_ID
        .captures(text)
        .map(|m| m["id"].to_string())
        .ok_or(ConvertError::MissingHandInfo)?;
    let started = STARTED
        .captures(text)
        .and_then(|m| NaiveDateTime::parse_from_str(&m["started"], "%Y/%m/%d - %H:%M:%S").ok())
        .ok_or(ConvertError::MissingHandInfo)?
        .and_utc();
    let table = TABLE
        .captures(text)
        .map(|m| m["table"].to_string())
        .unwrap_or_default();
    hand.set_hand_info(&id, &table, DEFAULT_MAX_SEATS, started);
    Ok(())
}

/// Everleaf deals 2, 6, and 10 handed without saying which; any seat past
/// six means a ten seat table.
fn read_player_stacks(hand: &mut HandAccumulator, text: &str) {
    let mut max_seats = DEFAULT_MAX_SEATS;
    for m in SEAT.captures_iter(text) {
        let Ok(seat) = m["seat"].parse::<usize>() else {
            continue;
        };
        let stack = match m.name("cash") {
            Some(cash) => match Chips::from_str(cash.as_str()) {
                Ok(stack) => Some(stack),
                Err(_) => {
                    hand.flag(HandError::MalformedAmount(format!("seat {} stack {}", seat, cash.as_str())));
                    None
                }
            },
            None => None,
        };
        hand.add_player(seat, &m["name"], stack);
        if seat > DEFAULT_MAX_SEATS {
            max_seats = MAX_SEATS;
        }
    }
    if max_seats != hand.info().max_seats {
        let info = hand.info().clone();
        hand.set_hand_info(&info.id, &info.table, max_seats, info.started);
    }
}

fn read_button(hand: &mut HandAccumulator, text: &str) {
    if let Some(seat) = BUTTON
        .captures(text)
        .and_then(|m| m["seat"].parse::<usize>().ok())
    {
        hand.set_button(seat);
    }
}

/// Cuts the text at each dealing marker. A marker that is missing means
/// the hand never got that far.
fn mark_segments(hand: &mut HandAccumulator, text: &str) {
    let mut found = MARKERS
        .iter()
        .filter_map(|(segment, marker)| {
            text.find(marker)
                .map(|start| (*segment, start, start + marker.len()))
        })
        .collect::<Vec<_>>();
    found.sort_by_key(|(_, start, _)| *start);
    let spans = found
        .iter()
        .enumerate()
        .map(|(i, (segment, _, end))| {
            let stop = found.get(i + 1).map(|(_, next, _)| *next).unwrap_or(text.len());
            (*segment, &text[*end..stop.max(*end)])
        })
        .collect::<Vec<_>>();
    hand.declare_segments(spans);
}

/// Community segments open with their bracketed cards; anything else is
/// rejected along with the betting in it.
fn read_community_cards(hand: &mut HandAccumulator) {
    let community = hand.game().variant().community().collect::<Vec<_>>();
    for segment in community {
        let Some(span) = hand.span(segment).map(str::to_string) else {
            continue;
        };
        let cards = BOARD
            .captures(&span)
            .and_then(|m| m.name("cards"))
            .map(|cards| split_cards(cards.as_str()))
            .unwrap_or_default();
        if cards.len() == segment.n_revealed() {
            hand.set_community_cards(segment, &cards);
        } else {
            hand.reject_segment(
                segment,
                &format!("expected {} board cards, found {}", segment.n_revealed(), cards.len()),
            );
        }
    }
}

fn split_cards(cards: &str) -> Vec<&str> {
    cards
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

/// A malformed number drops the callback it belongs to.
fn amount(hand: &mut HandAccumulator, m: &Captures) -> Option<Chips> {
    let text = m.name("amount")?.as_str();
    match Chips::from_str(text) {
        Ok(amount) => Some(amount),
        Err(_) => {
            hand.flag(HandError::MalformedAmount(text.to_string()));
            None
        }
    }
}

/// Patterns anchored on the names actually seated in one hand.
struct Patterns {
    small: Regex,
    big: Regex,
    both: Regex,
    hero: Regex,
    action: Regex,
    shows: Regex,
    wins: Regex,
}

impl Patterns {
    /// Longer names go first so one name that prefixes another cannot
    /// steal its lines.
    fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        let mut names = names.into_iter().collect::<Vec<_>>();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let player = format!(
            "(?P<name>{})",
            names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|")
        );
        let posts = |blind: &str| format!(r"(?m)^{}: posts {} \[\s*{}\s*\]", player, blind, AMOUNT);
        Ok(Self {
            small: Regex::new(&posts("small blind"))?,
            big: Regex::new(&posts("big blind"))?,
            both: Regex::new(&posts("both blinds"))?,
            hero: Regex::new(&format!(r"(?m)^Dealt to {} \[\s*(?P<cards>.*?)\s*\]", player))?,
            action: Regex::new(&format!(
                r"(?m)^{}(?P<kind>: bets| checks| raises| calls| folds)(?:\s\[\s*{}\s*\])?",
                player, AMOUNT
            ))?,
            shows: Regex::new(&format!(r"(?m)^{} shows \[\s*(?P<cards>.*?)\s*\]", player))?,
            wins: Regex::new(&format!(
                r"(?m)^{} wins {}(?:.*?\[\s*(?P<cards>.*?)\s*\])?",
                player, AMOUNT
            ))?,
        })
    }

    fn read_blinds(&self, hand: &mut HandAccumulator, text: &str) {
        match self.small.captures(text) {
            Some(m) => {
                let posted = amount(hand, &m);
                hand.add_blind(Some(&m["name"]), Blind::Small, posted);
            }
            None => hand.add_blind(None, Blind::Small, None),
        }
        for m in self.big.captures_iter(text) {
            let posted = amount(hand, &m);
            hand.add_blind(Some(&m["name"]), Blind::Big, posted);
        }
        for m in self.both.captures_iter(text) {
            let posted = amount(hand, &m);
            hand.add_blind(Some(&m["name"]), Blind::Both, posted);
        }
    }

    /// No hero line means the hand was observed, not played.
    fn read_hero_cards(&self, hand: &mut HandAccumulator, text: &str) {
        match self.hero.captures(text) {
            Some(m) => {
                hand.set_hero(&m["name"]);
                hand.add_hole_cards(&m["name"], &split_cards(&m["cards"]));
            }
            None => log::debug!("hand {} not involved", hand.info().id),
        }
    }

    fn read_showdown(&self, hand: &mut HandAccumulator, text: &str) {
        for m in self.shows.captures_iter(text) {
            hand.add_shown_cards(&m["name"], Some(&split_cards(&m["cards"])), None);
        }
    }

    /// Everleaf prints everything a raiser puts in, call included.
    fn read_actions(&self, hand: &mut HandAccumulator, segment: Segment, span: &str) {
        for m in self.action.captures_iter(span) {
            let name = &m["name"];
            match &m["kind"] {
                ": bets" => {
                    if let Some(bet) = amount(hand, &m) {
                        hand.add_bet(segment, name, bet);
                    }
                }
                " calls" => {
                    let call = amount(hand, &m);
                    hand.add_call(segment, name, call);
                }
                " raises" => match amount(hand, &m) {
                    Some(total) => hand.add_call_and_raise_total(segment, name, total),
                    None => hand.flag(HandError::MalformedAmount(format!(
                        "{} raises without an amount",
                        name
                    ))),
                },
                " checks" => hand.add_check(segment, name),
                " folds" => hand.add_fold(segment, name),
                other => log::debug!("unhandled action {:?} by {}", other, name),
            }
        }
    }

    /// Win lines carry the amount collected and, at showdown, the best
    /// five cards mixed from hole and board.
    fn read_collected(&self, hand: &mut HandAccumulator, text: &str) {
        for m in self.wins.captures_iter(text) {
            let name = &m["name"];
            if let Some(won) = amount(hand, &m) {
                hand.add_collect_pot(name, won);
            }
            if let Some(cards) = m.name("cards") {
                hand.add_shown_cards(name, None, Some(&split_cards(cards.as_str())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EUR: &str = "Everleaf Gaming Game #3732225
***** Hand history for game #3732225 *****
Blinds  €0.50/ €1 NL Hold'em - 2009/01/11 - 16:09:40
Table Casino Lyon Vert 58
Seat 3 is the button
Total number of players: 6";

    const USD: &str = "Everleaf Gaming Game #55198191
***** Hand history for game #55198191 *****
Blinds $0.50/$1 NL Hold'em - 2008/09/01 - 10:02:11
Table Speed Kuala
Seat 8 is the button
Total number of players: 10";

    const TOURNEY: &str = "Everleaf Gaming Game #75065769
***** Hand history for game #75065769 *****
Blinds 10/20 NL Hold'em - 2009/02/25 - 17:30:32
Table 2
Seat 1 is the button
Total number of players: 10";

    #[test]
    fn euro_ring_game() {
        let game = Everleaf.game_type(EUR).unwrap();
        assert_eq!(game.game, Game::Holdem);
        assert_eq!(game.limit, Limit::NoLimit);
        assert_eq!(game.currency, Currency::Eur);
        assert_eq!(game.sb, dec!(0.50));
        assert_eq!(game.bb, dec!(1));
        assert_eq!(game.sb.to_string(), "0.50");
    }

    #[test]
    fn dollar_ring_game() {
        let game = Everleaf.game_type(USD).unwrap();
        assert_eq!(game.currency, Currency::Usd);
        assert_eq!((game.sb, game.bb), (dec!(0.50), dec!(1)));
    }

    #[test]
    fn tournament_chips() {
        let game = Everleaf.game_type(TOURNEY).unwrap();
        assert_eq!(game.currency, Currency::Chips);
        assert_eq!((game.sb, game.bb), (dec!(10), dec!(20)));
    }

    #[test]
    fn limit_and_omaha_and_stud() {
        let omaha = Everleaf
            .game_type("Blinds $0.50/$1 PL Omaha - 2008/12/07 - 21:59:48")
            .unwrap();
        assert_eq!((omaha.game, omaha.limit), (Game::Omaha, Limit::PotLimit));
        let stud = Everleaf
            .game_type("$0.25/$0.50 7 Card Stud - 2008/12/05 - 21:43:59")
            .unwrap();
        assert_eq!((stud.game, stud.limit), (Game::Stud, Limit::FixedLimit));
        assert_eq!(
            Everleaf.read("$0.25/$0.50 7 Card Stud - 2008/12/05 - 21:43:59").err(),
            Some(ConvertError::UnsupportedGame(Game::Stud))
        );
    }

    #[test]
    fn header_is_required() {
        assert_eq!(
            Everleaf.game_type("Seat 1: nobody ( $ 10 USD )").err(),
            Some(ConvertError::UnrecognizedGame)
        );
        assert_eq!(
            Everleaf.read("Blinds $0.50/$1 NL Hold'em").err(),
            Some(ConvertError::MissingHandInfo)
        );
    }

    #[test]
    fn hand_info_and_seats() {
        let text = format!(
            "{}\nSeat 1: Hero ( $ 25 USD )\nSeat 8: a player ( $ 100.25 USD )\nSeat 9: newbie ( new player )\nSeat 10: gone ( All-in )",
            USD
        );
        let hand = Everleaf.read(&text).unwrap();
        assert_eq!(hand.info().id, "55198191");
        assert_eq!(hand.info().table, "Speed Kuala");
        assert_eq!(hand.info().max_seats, 10);
        assert_eq!(hand.info().button, Some(8));
        assert_eq!(
            hand.info().started.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2008-09-01 10:02:11"
        );
        assert_eq!(hand.players().len(), 2);
        assert_eq!(hand.stack("a player"), Some(dec!(100.25)));
        assert_eq!(hand.stack("newbie"), None);
    }

    #[test]
    fn names_that_prefix_each_other() {
        let patterns = Patterns::new(["bob", "bobby"]).unwrap();
        let m = patterns.action.captures("bobby folds").unwrap();
        assert_eq!(&m["name"], "bobby");
        let m = patterns.action.captures("bob calls [$ 2 USD]").unwrap();
        assert_eq!((&m["name"], &m["amount"]), ("bob", "2"));
    }
}
