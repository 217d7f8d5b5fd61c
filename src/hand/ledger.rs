use super::error::HandError;
use super::player::Player;
use super::raise::Convention;
use super::raise::Raise;
use super::segment::Segment;
use crate::Chips;
use crate::Position;
use std::collections::BTreeMap;

/// Result of moving chips from a stack into the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub amount: Chips,
    pub stack: Chips,
    pub all_in: bool,
}

/// Per-player, per-segment record of money put in the pot.
///
/// Owns the roster and every stack. Each segment tracks `last`, the bet a
/// caller must match, and each player's list of contributions, so that any
/// of the three raise conventions reduces to the same [`Raise`].
///
/// Nothing is mutated when an operation fails.
#[derive(Debug, Clone, Default)]
pub struct MoneyLedger {
    players: Vec<Player>,
    bets: BTreeMap<Segment, BTreeMap<String, Vec<Chips>>>,
    last: BTreeMap<Segment, Chips>,
}

impl MoneyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats a player. A name seated twice keeps its first seat.
    pub fn seat(&mut self, seat: Position, name: &str, stack: Chips) -> bool {
        if self.contains(name) {
            false
        } else {
            self.players.push(Player::new(seat, name, stack));
            true
        }
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.player(name).is_some()
    }
    pub fn stack(&self, name: &str) -> Option<Chips> {
        self.player(name).map(Player::stack)
    }
    /// the bet a caller must match in this segment
    pub fn last_bet(&self, segment: Segment) -> Chips {
        self.last.get(&segment).copied().unwrap_or_default()
    }
    /// amounts the player put in during this segment, in order
    pub fn commitments(&self, segment: Segment, name: &str) -> &[Chips] {
        self.bets
            .get(&segment)
            .and_then(|bets| bets.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
    /// Bc: what the player already has in front of them this segment
    pub fn committed(&self, segment: Segment, name: &str) -> Chips {
        self.commitments(segment, name).iter().sum()
    }
    /// everything committed by everyone, across every segment
    pub fn total(&self) -> Chips {
        self.bets
            .values()
            .flat_map(BTreeMap::values)
            .flatten()
            .sum()
    }

    /// Calls the current bet. Without an amount, calls whatever is owed,
    /// capped by the stack.
    pub fn call(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Option<Chips>,
    ) -> Result<Commit, HandError> {
        let amount = match amount {
            Some(amount) => amount,
            None => {
                let stack = self.require(name)?.stack();
                let owed = self.last_bet(segment) - self.committed(segment, name);
                owed.min(stack)
            }
        };
        Self::positive(amount)?;
        self.commit(segment, name, amount)
    }

    /// Opens the betting in a segment.
    pub fn bet(&mut self, segment: Segment, name: &str, amount: Chips) -> Result<Commit, HandError> {
        Self::positive(amount)?;
        let commit = self.commit(segment, name, amount)?;
        let total = self.committed(segment, name);
        self.last.insert(segment, total);
        Ok(commit)
    }

    pub fn raise_by(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Chips,
    ) -> Result<(Raise, Commit), HandError> {
        self.raise(segment, name, Convention::By(amount))
    }
    pub fn raise_to(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Chips,
    ) -> Result<(Raise, Commit), HandError> {
        self.raise(segment, name, Convention::To(amount))
    }
    pub fn call_and_raise_total(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Chips,
    ) -> Result<(Raise, Commit), HandError> {
        self.raise(segment, name, Convention::Total(amount))
    }

    /// The one path every raise convention goes through.
    pub fn raise(
        &mut self,
        segment: Segment,
        name: &str,
        convention: Convention,
    ) -> Result<(Raise, Commit), HandError> {
        self.require(name)?;
        let bp = self.last_bet(segment);
        let bc = self.committed(segment, name);
        let raise = Raise::from((convention, bp, bc));
        if raise.call() < Chips::ZERO || raise.raise_by() <= Chips::ZERO {
            return Err(HandError::MalformedAmount(format!(
                "{} raises {:?} facing {} with {} in",
                name, convention, bp, bc
            )));
        }
        let commit = self.commit(segment, name, raise.added())?;
        self.last.insert(segment, raise.raise_to());
        Ok((raise, commit))
    }

    /// Posts a blind. A live blind sets the bet to match; a small blind does not.
    pub fn post_blind(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Chips,
        live: bool,
    ) -> Result<Commit, HandError> {
        Self::positive(amount)?;
        let commit = self.commit(segment, name, amount)?;
        if live {
            self.establish(segment, name);
        }
        Ok(commit)
    }

    /// Posts small and big blind at once. The dead small part lands in
    /// `dead` so it never counts toward calls in `live`.
    pub fn post_both_blinds(
        &mut self,
        dead: Segment,
        live: Segment,
        name: &str,
        amount: Chips,
        big: Chips,
    ) -> Result<Commit, HandError> {
        Self::positive(amount)?;
        let stack = self.require(name)?.stack();
        if amount > stack {
            return Err(Self::overdrawn(name, stack, amount));
        }
        let small = (amount - big).max(Chips::ZERO);
        let big = amount - small;
        if small > Chips::ZERO {
            self.commit(dead, name, small)?;
        }
        let commit = self.commit(live, name, big)?;
        self.establish(live, name);
        Ok(Commit { amount, ..commit })
    }

    /// Antes are dead money: committed, never matched.
    pub fn post_ante(&mut self, segment: Segment, name: &str, amount: Chips) -> Result<Commit, HandError> {
        Self::positive(amount)?;
        self.commit(segment, name, amount)
    }

    /// The bring-in is the first bet of third street.
    pub fn post_bring_in(
        &mut self,
        segment: Segment,
        name: &str,
        amount: Chips,
    ) -> Result<Commit, HandError> {
        self.post_blind(segment, name, amount, true)
    }

    fn establish(&mut self, segment: Segment, name: &str) {
        let total = self.committed(segment, name);
        let last = self.last.entry(segment).or_default();
        *last = (*last).max(total);
    }

    fn commit(&mut self, segment: Segment, name: &str, amount: Chips) -> Result<Commit, HandError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| HandError::UnknownPlayer(name.to_string()))?;
        if amount > player.stack() {
            return Err(Self::overdrawn(name, player.stack(), amount));
        }
        player.debit(amount);
        let stack = player.stack();
        self.bets
            .entry(segment)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(amount);
        log::debug!("{} puts {} in on {}, {} behind", name, amount, segment, stack);
        Ok(Commit {
            amount,
            stack,
            all_in: stack.is_zero(),
        })
    }

    fn require(&self, name: &str) -> Result<&Player, HandError> {
        self.player(name)
            .ok_or_else(|| HandError::UnknownPlayer(name.to_string()))
    }

    fn positive(amount: Chips) -> Result<(), HandError> {
        if amount > Chips::ZERO {
            Ok(())
        } else {
            Err(HandError::MalformedAmount(amount.to_string()))
        }
    }

    fn overdrawn(name: &str, stack: Chips, amount: Chips) -> HandError {
        HandError::Overdrawn {
            player: name.to_string(),
            stack,
            amount,
        }
    }
}
