use super::action::Action;
use super::action::Play;
use super::action::Post;
use super::error::HandError;
use super::error::Validity;
use super::game::GameType;
use super::history::ActionLog;
use super::info::HandInfo;
use super::ledger::Commit;
use super::ledger::MoneyLedger;
use super::player::Player;
use super::pot::PotEngine;
use super::raise::Convention;
use super::segment::Segment;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Which blind a post covers, as printed by the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Blind {
    Small,
    Big,
    Both,
}

/// Stud cards dealt to one player on one street.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dealt {
    pub open: Vec<Card>,
    pub closed: Vec<Card>,
}

/// Reconstructs one hand from reader callbacks.
///
/// Callbacks arrive in a fixed order: hand info, stacks, segment spans,
/// forced bets, cards, voluntary actions per segment, pot collection. Each
/// monetary callback is checked against the roster, canonicalized by the
/// [`MoneyLedger`], recorded in the [`ActionLog`], and fed to the
/// [`PotEngine`]. A callback that fails is dropped and recorded as an
/// issue; the hand carries on and is marked [`Validity::Partial`].
///
/// [`HandAccumulator::finalize`] settles the pot exactly once. Afterwards
/// the hand no longer changes and can be shared across renderers.
#[derive(Debug, Clone)]
pub struct HandAccumulator {
    game: GameType,
    info: HandInfo,
    ledger: MoneyLedger,
    log: ActionLog,
    pot: PotEngine,
    spans: BTreeMap<Segment, String>,
    board: BTreeMap<Segment, Vec<Card>>,
    holes: BTreeMap<String, Vec<Card>>,
    dealt: BTreeMap<String, BTreeMap<Segment, Dealt>>,
    posted: Vec<(Option<String>, Blind)>,
    shown: BTreeSet<String>,
    collected: Vec<(String, Chips)>,
    hero: Option<String>,
    rake: Option<Chips>,
    issues: Vec<HandError>,
    validity: Validity,
}

impl HandAccumulator {
    pub fn new(game: GameType) -> Self {
        Self {
            game,
            info: HandInfo::default(),
            ledger: MoneyLedger::new(),
            log: ActionLog::new(),
            pot: PotEngine::new(),
            spans: BTreeMap::new(),
            board: BTreeMap::new(),
            holes: BTreeMap::new(),
            dealt: BTreeMap::new(),
            posted: Vec::new(),
            shown: BTreeSet::new(),
            collected: Vec::new(),
            hero: None,
            rake: None,
            issues: Vec::new(),
            validity: Validity::Clean,
        }
    }

    // ============================================================================
    // CALLBACKS: HAND STRUCTURE
    // ============================================================================

    pub fn set_hand_info(&mut self, id: &str, table: &str, max_seats: usize, started: DateTime<Utc>) {
        if self.sealed() {
            return;
        }
        self.info.id = id.to_string();
        self.info.table = table.to_string();
        self.info.max_seats = max_seats;
        self.info.started = started;
    }
    pub fn set_button(&mut self, seat: Position) {
        if self.sealed() {
            return;
        }
        self.info.button = Some(seat);
    }
    /// Seats a player. Without a starting stack the player sat out and is
    /// left off the roster.
    pub fn add_player(&mut self, seat: Position, name: &str, stack: Option<Chips>) {
        if self.sealed() {
            return;
        }
        match stack {
            None => log::debug!("seat {} {} has no stack, not dealt in", seat, name),
            Some(stack) if self.ledger.seat(seat, name, stack) => self.pot.seat(name),
            Some(_) => log::warn!("seat {} {} already seated, ignored", seat, name),
        }
    }
    /// Keeps the raw text of each segment for readers to scan later.
    pub fn declare_segments<S: Into<String>>(&mut self, spans: impl IntoIterator<Item = (Segment, S)>) {
        if self.sealed() {
            return;
        }
        for (segment, span) in spans {
            if self.playable(segment) {
                self.spans.insert(segment, span.into());
            }
        }
    }
    /// A segment whose text did not have the expected shape is left empty.
    pub fn reject_segment(&mut self, segment: Segment, reason: &str) {
        if self.sealed() {
            return;
        }
        self.spans.remove(&segment);
        self.board.remove(&segment);
        self.mark(HandError::MalformedSegment(segment, reason.to_string()));
    }
    /// Records an error a reader recovered from on its own. A settled hand
    /// only notes the late call.
    pub fn flag(&mut self, error: HandError) {
        if self.sealed() {
            return;
        }
        self.mark(error);
    }

    // ============================================================================
    // CALLBACKS: FORCED BETS
    // ============================================================================

    /// Posts a blind. No player means the blind was missing from the hand.
    pub fn add_blind(&mut self, player: Option<&str>, blind: Blind, amount: Option<Chips>) {
        if self.sealed() {
            return;
        }
        let Some(player) = player else {
            log::debug!("no {:?} blind posted", blind);
            self.posted.push((None, blind));
            return;
        };
        if !self.known(player) {
            return;
        }
        let Some(amount) = amount else {
            self.mark(HandError::MalformedAmount(format!(
                "{} posts {:?} blind without an amount",
                player, blind
            )));
            return;
        };
        let variant = self.game.variant();
        let (result, post) = match blind {
            Blind::Small => (
                self.ledger.post_blind(variant.opening(), player, amount, false),
                Post::SmallBlind,
            ),
            Blind::Big => (
                self.ledger.post_blind(variant.opening(), player, amount, true),
                Post::BigBlind,
            ),
            Blind::Both => (
                self.ledger.post_both_blinds(
                    variant.forced(),
                    variant.opening(),
                    player,
                    amount,
                    self.game.bb,
                ),
                Post::BothBlinds,
            ),
        };
        if self.commit(variant.forced(), player, result, |amount| Play::Post { post, amount }) {
            self.posted.push((Some(player.to_string()), blind));
        }
    }
    pub fn add_ante(&mut self, player: &str, amount: Chips) {
        if self.sealed() || !self.known(player) {
            return;
        }
        let forced = self.game.variant().forced();
        let result = self.ledger.post_ante(forced, player, amount);
        self.commit(forced, player, result, |amount| Play::Post {
            post: Post::Ante,
            amount,
        });
    }
    pub fn add_bring_in(&mut self, player: &str, amount: Chips) {
        if self.sealed() || !self.known(player) {
            return;
        }
        let opening = self.game.variant().opening();
        let result = self.ledger.post_bring_in(opening, player, amount);
        self.commit(opening, player, result, |amount| Play::Post {
            post: Post::BringIn,
            amount,
        });
    }

    // ============================================================================
    // CALLBACKS: CARDS
    // ============================================================================

    pub fn set_community_cards(&mut self, segment: Segment, codes: &[&str]) {
        if self.sealed() {
            return;
        }
        if !self.playable(segment) {
            return;
        }
        if !segment.is_community() {
            self.mark(HandError::MalformedSegment(
                segment,
                "no community cards on this segment".to_string(),
            ));
            return;
        }
        if let Some(cards) = self.cards(codes) {
            log::debug!("board {}: {:?}", segment, codes);
            self.board.insert(segment, cards);
        }
    }
    pub fn set_hero(&mut self, player: &str) {
        if self.sealed() || !self.known(player) {
            return;
        }
        self.hero = Some(player.to_string());
    }
    pub fn add_hole_cards(&mut self, player: &str, codes: &[&str]) {
        if self.sealed() || !self.known(player) {
            return;
        }
        if let Some(cards) = self.cards(codes) {
            self.hole(player, cards);
        }
    }
    /// Cards a player turned over, either directly or as a summary that
    /// mixes hole and board cards. Only the direct form marks the player
    /// as having shown.
    pub fn add_shown_cards(
        &mut self,
        player: &str,
        cards: Option<&[&str]>,
        hole_and_board: Option<&[&str]>,
    ) {
        if self.sealed() || !self.known(player) {
            return;
        }
        if let Some(codes) = cards {
            if let Some(cards) = self.cards(codes) {
                self.shown.insert(player.to_string());
                self.hole(player, cards);
            }
        } else if let Some(codes) = hole_and_board {
            if let Some(cards) = self.cards(codes) {
                let board = self.board_cards().collect::<BTreeSet<_>>();
                let hole = cards.into_iter().filter(|c| !board.contains(c)).collect();
                self.hole(player, hole);
            }
        }
    }
    /// Stud street deal: face-up and face-down cards for one player.
    pub fn add_player_cards(&mut self, player: &str, segment: Segment, open: &[&str], closed: &[&str]) {
        if self.sealed() || !self.known(player) || !self.playable(segment) {
            return;
        }
        let (Some(open), Some(closed)) = (self.cards(open), self.cards(closed)) else {
            return;
        };
        self.dealt
            .entry(player.to_string())
            .or_default()
            .insert(segment, Dealt { open, closed });
    }

    // ============================================================================
    // CALLBACKS: VOLUNTARY ACTION
    // ============================================================================

    pub fn add_check(&mut self, segment: Segment, player: &str) {
        if !self.admits(segment, player) {
            return;
        }
        let stack = self.stack(player).unwrap_or_default();
        self.log.record(Action::new(segment, player, Play::Check, stack));
    }
    pub fn add_fold(&mut self, segment: Segment, player: &str) {
        if !self.admits(segment, player) {
            return;
        }
        let stack = self.stack(player).unwrap_or_default();
        self.pot.fold(player);
        self.log.record(Action::new(segment, player, Play::Fold, stack));
    }
    pub fn add_call(&mut self, segment: Segment, player: &str, amount: Option<Chips>) {
        if !self.admits(segment, player) {
            return;
        }
        let result = self.ledger.call(segment, player, amount);
        self.commit(segment, player, result, |amount| Play::Call { amount });
    }
    pub fn add_bet(&mut self, segment: Segment, player: &str, amount: Chips) {
        if !self.admits(segment, player) {
            return;
        }
        let result = self.ledger.bet(segment, player, amount);
        self.commit(segment, player, result, |amount| Play::Bet { amount });
    }
    pub fn add_raise_by(&mut self, segment: Segment, player: &str, amount: Chips) {
        self.raise(segment, player, Convention::By(amount));
    }
    pub fn add_raise_to(&mut self, segment: Segment, player: &str, amount: Chips) {
        self.raise(segment, player, Convention::To(amount));
    }
    pub fn add_call_and_raise_total(&mut self, segment: Segment, player: &str, amount: Chips) {
        self.raise(segment, player, Convention::Total(amount));
    }
    fn raise(&mut self, segment: Segment, player: &str, convention: Convention) {
        if !self.admits(segment, player) {
            return;
        }
        let result = self.ledger.raise(segment, player, convention);
        if let Some((raise, commit)) = self.accept(result) {
            self.pot.add(player, commit.amount);
            self.log
                .record(Action::new(segment, player, Play::Raise(raise), commit.stack));
        }
    }

    // ============================================================================
    // CALLBACKS: SETTLEMENT
    // ============================================================================

    pub fn add_collect_pot(&mut self, player: &str, amount: Chips) {
        if self.sealed() || !self.known(player) {
            return;
        }
        if amount < Chips::ZERO {
            self.mark(HandError::MalformedAmount(format!("{} collects {}", player, amount)));
            return;
        }
        self.collected.push((player.to_string(), amount));
    }
    pub fn set_rake(&mut self, amount: Chips) {
        if self.sealed() {
            return;
        }
        self.rake = Some(amount);
    }
    /// Settles the pot. A second call fails and leaves the first result.
    pub fn finalize(&mut self) -> Result<(), HandError> {
        match self.pot.finalize() {
            Ok(()) => {
                let total = self.pot.total().unwrap_or_default();
                if self.total_collected() > total {
                    self.mark(HandError::MalformedAmount(format!(
                        "{} collected from a pot of {}",
                        self.total_collected(),
                        total
                    )));
                }
                log::debug!(
                    "hand {} settled: {} committed, {} collected, {:?} pots",
                    self.info.id,
                    self.ledger.total(),
                    self.total_collected(),
                    self.pot.pots().unwrap_or_default(),
                );
                Ok(())
            }
            Err(e) => {
                log::error!("hand {}: {}", self.info.id, e);
                self.issues.push(e.clone());
                Err(e)
            }
        }
    }

    // ============================================================================
    // ACCESSORS
    // ============================================================================

    pub fn game(&self) -> &GameType {
        &self.game
    }
    pub fn info(&self) -> &HandInfo {
        &self.info
    }
    pub fn segments(&self) -> &'static [Segment] {
        self.game.variant().segments()
    }
    pub fn span(&self, segment: Segment) -> Option<&str> {
        self.spans.get(&segment).map(String::as_str)
    }
    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.ledger.player(name)
    }
    pub fn stack(&self, name: &str) -> Option<Chips> {
        self.ledger.stack(name)
    }
    pub fn ledger(&self) -> &MoneyLedger {
        &self.ledger
    }
    pub fn log(&self) -> &ActionLog {
        &self.log
    }
    pub fn actions(&self, segment: Segment) -> &[Action] {
        self.log.segment(segment)
    }
    pub fn board(&self, segment: Segment) -> &[Card] {
        self.board
            .get(&segment)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
    /// every board card, in the order dealt
    pub fn board_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.board.values().flatten().copied()
    }
    pub fn hole_cards(&self, name: &str) -> &[Card] {
        self.holes.get(name).map(Vec::as_slice).unwrap_or_default()
    }
    pub fn dealt(&self, name: &str, segment: Segment) -> Option<&Dealt> {
        self.dealt.get(name).and_then(|streets| streets.get(&segment))
    }
    pub fn posted(&self) -> &[(Option<String>, Blind)] {
        &self.posted
    }
    pub fn hero(&self) -> Option<&str> {
        self.hero.as_deref()
    }
    pub fn is_involved(&self) -> bool {
        self.hero.is_some()
    }
    pub fn has_shown(&self, name: &str) -> bool {
        self.shown.contains(name)
    }
    pub fn has_folded(&self, name: &str) -> bool {
        self.ledger.contains(name) && !self.pot.is_contender(name)
    }
    /// collections in the order the room printed them
    pub fn collections(&self) -> &[(String, Chips)] {
        &self.collected
    }
    /// collected amount per player
    pub fn collected(&self) -> BTreeMap<&str, Chips> {
        self.collected
            .iter()
            .fold(BTreeMap::new(), |mut acc, (name, amount)| {
                *acc.entry(name.as_str()).or_default() += *amount;
                acc
            })
    }
    pub fn total_collected(&self) -> Chips {
        self.collected.iter().map(|(_, amount)| *amount).sum()
    }
    pub fn is_finalized(&self) -> bool {
        self.pot.is_finalized()
    }
    pub fn total_pot(&self) -> Result<Chips, HandError> {
        self.pot.total()
    }
    pub fn pots(&self) -> Result<&[Chips], HandError> {
        self.pot.pots()
    }
    pub fn returned(&self) -> Result<&BTreeMap<String, Chips>, HandError> {
        self.pot.returned()
    }
    /// set by the reader, or whatever the pot held beyond what was collected
    pub fn rake(&self) -> Result<Chips, HandError> {
        let total = self.pot.total()?;
        Ok(self.rake.unwrap_or(total - self.total_collected()))
    }
    pub fn issues(&self) -> &[HandError] {
        &self.issues
    }
    pub fn validity(&self) -> Validity {
        self.validity
    }

    // ============================================================================
    // GUARDS
    // ============================================================================

    /// after finalize nothing may change
    fn sealed(&mut self) -> bool {
        if self.pot.is_finalized() {
            log::warn!("hand {}: {}", self.info.id, HandError::AlreadyFinalized);
            self.issues.push(HandError::AlreadyFinalized);
            true
        } else {
            false
        }
    }
    fn mark(&mut self, error: HandError) {
        log::warn!("hand {}: {}", self.info.id, error);
        self.validity = Validity::Partial;
        self.issues.push(error);
    }
    fn known(&mut self, player: &str) -> bool {
        if self.ledger.contains(player) {
            true
        } else {
            self.mark(HandError::UnknownPlayer(player.to_string()));
            false
        }
    }
    fn playable(&mut self, segment: Segment) -> bool {
        if self.game.variant().contains(segment) {
            true
        } else {
            self.mark(HandError::MalformedSegment(
                segment,
                format!("not played in {}", self.game.game),
            ));
            false
        }
    }
    fn admits(&mut self, segment: Segment, player: &str) -> bool {
        if self.sealed() || !self.playable(segment) || !self.known(player) {
            return false;
        }
        if segment.is_forced() {
            self.mark(HandError::MalformedSegment(
                segment,
                format!("{} acts voluntarily during forced bets", player),
            ));
            return false;
        }
        true
    }
    fn accept<T>(&mut self, result: Result<T, HandError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.mark(e);
                None
            }
        }
    }
    fn commit(
        &mut self,
        logged: Segment,
        player: &str,
        result: Result<Commit, HandError>,
        play: impl FnOnce(Chips) -> Play,
    ) -> bool {
        match self.accept(result) {
            Some(commit) => {
                self.pot.add(player, commit.amount);
                self.log
                    .record(Action::new(logged, player, play(commit.amount), commit.stack));
                true
            }
            None => false,
        }
    }
    fn cards(&mut self, codes: &[&str]) -> Option<Vec<Card>> {
        let parsed = crate::cards::parse(codes.iter().copied());
        self.accept(parsed.map_err(HandError::MalformedCard))
    }
    fn hole(&mut self, player: &str, cards: Vec<Card>) {
        let hole = self.holes.entry(player.to_string()).or_default();
        for card in cards {
            if !hole.contains(&card) {
                hole.push(card);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::game::Currency;
    use crate::hand::game::Game;
    use crate::hand::game::Limit;
    use rust_decimal_macros::dec;

    fn holdem(sb: Chips, bb: Chips) -> HandAccumulator {
        HandAccumulator::new(GameType {
            game: Game::Holdem,
            limit: Limit::NoLimit,
            currency: Currency::Usd,
            sb,
            bb,
        })
    }

    fn conserved(hand: &HandAccumulator) -> bool {
        let starting = hand.players().iter().map(Player::starting).sum::<Chips>();
        let ending = hand.players().iter().map(Player::stack).sum::<Chips>();
        starting == ending + hand.ledger().total()
    }

    #[test]
    fn walk_to_big_blind() {
        let mut hand = holdem(dec!(10), dec!(20));
        hand.add_player(1, "sb", Some(dec!(1000)));
        hand.add_player(2, "bb", Some(dec!(1000)));
        hand.add_player(3, "utg", Some(dec!(1000)));
        hand.add_blind(None, Blind::Small, None);
        hand.add_blind(Some("bb"), Blind::Big, Some(dec!(20)));
        hand.add_fold(Segment::Preflop, "utg");
        hand.add_fold(Segment::Preflop, "sb");
        hand.add_collect_pot("bb", dec!(20));
        hand.finalize().unwrap();
        assert_eq!(hand.pots().unwrap(), &[dec!(20)]);
        assert!(hand.returned().unwrap().is_empty());
        assert_eq!(hand.rake().unwrap(), dec!(0));
        assert!(hand.issues().is_empty());
        assert_eq!(hand.validity(), Validity::Clean);
        assert_eq!(hand.posted()[0], (None, Blind::Small));
    }

    #[test]
    fn three_way_all_in_with_side_pot() {
        let mut hand = holdem(dec!(0.50), dec!(1));
        hand.add_player(1, "alice", Some(dec!(100)));
        hand.add_player(2, "bob", Some(dec!(100)));
        hand.add_player(4, "carol", Some(dec!(40)));
        hand.add_blind(Some("alice"), Blind::Small, Some(dec!(0.50)));
        hand.add_blind(Some("bob"), Blind::Big, Some(dec!(1)));
        hand.add_raise_to(Segment::Preflop, "carol", dec!(40));
        hand.add_call(Segment::Preflop, "alice", Some(dec!(39.50)));
        hand.add_call(Segment::Preflop, "bob", None);
        hand.add_bet(Segment::Flop, "alice", dec!(60));
        hand.add_call(Segment::Flop, "bob", Some(dec!(60)));
        hand.finalize().unwrap();
        assert_eq!(hand.pots().unwrap(), &[dec!(120), dec!(120)]);
        assert_eq!(hand.total_pot().unwrap(), dec!(240));
        let preflop = hand.actions(Segment::Preflop);
        assert!(preflop[0].is_all_in());
        assert!(!preflop[1].is_all_in());
        assert!(hand.actions(Segment::Flop).iter().all(Action::is_all_in));
        assert!(conserved(&hand));
    }

    #[test]
    fn uncalled_bet_goes_back() {
        let mut hand = holdem(dec!(10), dec!(20));
        hand.add_player(1, "a", Some(dec!(500)));
        hand.add_player(2, "b", Some(dec!(500)));
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(20)));
        hand.add_raise_to(Segment::Preflop, "a", dec!(50));
        hand.add_fold(Segment::Preflop, "b");
        hand.add_collect_pot("a", dec!(40));
        hand.finalize().unwrap();
        assert_eq!(hand.returned().unwrap().get("a"), Some(&dec!(30)));
        assert_eq!(hand.pots().unwrap(), &[dec!(40)]);
        assert!(hand.has_folded("b"));
        assert!(!hand.has_folded("a"));
    }

    #[test]
    fn unknown_player_is_dropped_and_hand_continues() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.add_player(2, "b", Some(dec!(100)));
        hand.add_player(3, "sitting out", None);
        hand.add_blind(Some("a"), Blind::Small, Some(dec!(1)));
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(2)));
        hand.add_raise_by(Segment::Preflop, "ghost", dec!(6));
        hand.add_fold(Segment::Preflop, "sitting out");
        hand.add_call(Segment::Preflop, "a", None);
        hand.add_check(Segment::Preflop, "b");
        hand.finalize().unwrap();
        assert_eq!(
            hand.issues(),
            &[
                HandError::UnknownPlayer("ghost".to_string()),
                HandError::UnknownPlayer("sitting out".to_string()),
            ]
        );
        assert_eq!(hand.validity(), Validity::Partial);
        assert_eq!(hand.pots().unwrap(), &[dec!(4)]);
        assert_eq!(hand.actions(Segment::Preflop).len(), 2);
        assert!(conserved(&hand));
    }

    #[test]
    fn pot_protocol_is_enforced() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.add_player(2, "b", Some(dec!(100)));
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(2)));
        hand.add_call(Segment::Preflop, "a", None);
        assert_eq!(hand.pots(), Err(HandError::NotFinalized));
        assert_eq!(hand.rake(), Err(HandError::NotFinalized));
        assert_eq!(hand.finalize(), Ok(()));
        assert_eq!(hand.finalize(), Err(HandError::AlreadyFinalized));
        hand.add_bet(Segment::Flop, "a", dec!(10));
        assert_eq!(hand.stack("a"), Some(dec!(98)));
        assert!(hand.actions(Segment::Flop).is_empty());
        assert_eq!(hand.pots().unwrap(), &[dec!(4)]);
    }

    #[test]
    fn settled_hand_ignores_late_rejections() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.add_player(2, "b", Some(dec!(100)));
        hand.declare_segments([(Segment::Flop, "[ 2c, 7h, Td ]")]);
        hand.set_community_cards(Segment::Flop, &["2c", "7h", "td"]);
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(2)));
        hand.add_call(Segment::Preflop, "a", None);
        hand.add_collect_pot("b", dec!(4));
        hand.finalize().unwrap();
        hand.reject_segment(Segment::Flop, "late");
        hand.flag(HandError::UnknownPlayer("z".to_string()));
        assert_eq!(hand.board(Segment::Flop).len(), 3);
        assert!(hand.span(Segment::Flop).is_some());
        assert_eq!(hand.validity(), Validity::Clean);
        assert_eq!(
            hand.issues(),
            &[HandError::AlreadyFinalized, HandError::AlreadyFinalized]
        );
    }

    #[test]
    fn forced_segments_take_no_voluntary_action() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.add_bet(Segment::Blinds, "a", dec!(5));
        hand.add_fold(Segment::Blinds, "a");
        assert_eq!(hand.stack("a"), Some(dec!(100)));
        assert!(hand.actions(Segment::Blinds).is_empty());
        assert_eq!(hand.issues().len(), 2);
        assert!(!hand.has_folded("a"));
    }

    #[test]
    fn over_collection_is_flagged() {
        let mut hand = holdem(dec!(0.50), dec!(1));
        hand.add_player(1, "a", Some(dec!(50)));
        hand.add_player(2, "b", Some(dec!(50)));
        hand.add_blind(Some("a"), Blind::Small, Some(dec!(0.50)));
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(1)));
        hand.add_call(Segment::Preflop, "a", None);
        hand.add_collect_pot("b", dec!(2.05));
        hand.finalize().unwrap();
        assert_eq!(hand.validity(), Validity::Partial);
        assert!(matches!(hand.issues(), [HandError::MalformedAmount(_)]));
        assert_eq!(hand.rake().unwrap(), dec!(-0.05));
    }

    #[test]
    fn both_blinds_count_small_as_dead() {
        let mut hand = holdem(dec!(0.50), dec!(1));
        hand.add_player(1, "a", Some(dec!(50)));
        hand.add_player(2, "b", Some(dec!(50)));
        hand.add_player(3, "c", Some(dec!(50)));
        hand.add_blind(Some("a"), Blind::Small, Some(dec!(0.50)));
        hand.add_blind(Some("b"), Blind::Big, Some(dec!(1)));
        hand.add_blind(Some("c"), Blind::Both, Some(dec!(1.50)));
        hand.add_call_and_raise_total(Segment::Preflop, "c", dec!(2));
        let raise = *hand.actions(Segment::Preflop)[0].play();
        match raise {
            Play::Raise(raise) => {
                assert_eq!(raise.call(), dec!(0));
                assert_eq!(raise.raise_to(), dec!(3));
            }
            other => panic!("expected a raise, got {:?}", other),
        }
        assert_eq!(hand.actions(Segment::Blinds).len(), 3);
        assert_eq!(hand.stack("c"), Some(dec!(46.50)));
    }

    #[test]
    fn shown_cards_subtract_the_board() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.add_player(2, "b", Some(dec!(100)));
        hand.set_community_cards(Segment::Flop, &["2c", "7h", "td"]);
        hand.set_community_cards(Segment::Turn, &["JS"]);
        hand.add_shown_cards("a", None, Some(&["ah", "kd", "2c", "7h", "Td"]));
        hand.add_shown_cards("b", Some(&["qc", "qd"]), None);
        assert_eq!(
            hand.hole_cards("a").iter().map(Card::to_string).collect::<Vec<_>>(),
            vec!["Ah", "Kd"]
        );
        assert!(!hand.has_shown("a"));
        assert!(hand.has_shown("b"));
        assert_eq!(
            hand.board_cards().map(|c| c.to_string()).collect::<Vec<_>>(),
            vec!["2c", "7h", "Td", "Js"]
        );
    }

    #[test]
    fn malformed_cards_and_segments_are_flagged() {
        let mut hand = holdem(dec!(1), dec!(2));
        hand.add_player(1, "a", Some(dec!(100)));
        hand.declare_segments([(Segment::Preflop, "..."), (Segment::Flop, "[ 2c, 7h ]")]);
        hand.reject_segment(Segment::Flop, "expected three cards");
        hand.set_community_cards(Segment::Preflop, &["2c"]);
        hand.add_hole_cards("a", &["Zz", "Ah"]);
        hand.add_call(Segment::Fifth, "a", Some(dec!(1)));
        assert_eq!(hand.span(Segment::Preflop), Some("..."));
        assert_eq!(hand.span(Segment::Flop), None);
        assert!(hand.hole_cards("a").is_empty());
        assert_eq!(hand.issues().len(), 4);
        assert!(hand.issues().iter().all(|e| !e.is_fatal()));
        assert_eq!(hand.validity(), Validity::Partial);
    }

    #[test]
    fn stud_antes_and_bring_in() {
        let mut hand = HandAccumulator::new(GameType {
            game: Game::Stud,
            limit: Limit::FixedLimit,
            currency: Currency::Usd,
            sb: dec!(0.25),
            bb: dec!(0.50),
        });
        hand.add_player(1, "a", Some(dec!(10)));
        hand.add_player(2, "b", Some(dec!(10)));
        hand.add_ante("a", dec!(0.05));
        hand.add_ante("b", dec!(0.05));
        hand.add_player_cards("a", Segment::Third, &["9c"], &["2d", "3h"]);
        hand.add_bring_in("a", dec!(0.10));
        hand.add_raise_to(Segment::Third, "b", dec!(0.25));
        hand.add_call(Segment::Third, "a", None);
        hand.add_bet(Segment::Fourth, "a", dec!(0.25));
        hand.add_fold(Segment::Fourth, "b");
        hand.finalize().unwrap();
        assert_eq!(hand.actions(Segment::Antes).len(), 2);
        assert_eq!(hand.actions(Segment::Third).len(), 3);
        assert_eq!(hand.ledger().committed(Segment::Third, "a"), dec!(0.25));
        assert_eq!(hand.returned().unwrap().get("a"), Some(&dec!(0.25)));
        assert_eq!(hand.pots().unwrap(), &[dec!(0.60)]);
        assert_eq!(hand.dealt("a", Segment::Third).unwrap().open.len(), 1);
        assert!(conserved(&hand));
    }

    #[test]
    fn finished_hand_is_shareable() {
        fn shareable<T: Send + Sync>() {}
        shareable::<HandAccumulator>();
    }
}
