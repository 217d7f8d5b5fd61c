use super::renderer::Render;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use crate::hand::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One seat of a finished hand.
#[derive(Debug, Clone, Serialize)]
pub struct SeatSummary<'a> {
    pub seat: Position,
    pub name: &'a str,
    pub starting: Chips,
    pub ending: Chips,
    pub committed: Chips,
    pub collected: Chips,
    pub cards: &'a [Card],
    pub folded: bool,
    pub showed: bool,
}

/// Read-only snapshot of a finished hand, shaped for serialization.
/// Amounts serialize as strings so their scale survives.
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a> {
    pub info: &'a HandInfo,
    pub game: &'a GameType,
    pub validity: Validity,
    pub hero: Option<&'a str>,
    pub seats: Vec<SeatSummary<'a>>,
    pub actions: Vec<&'a Action>,
    pub board: Vec<Card>,
    pub total: Chips,
    pub pots: &'a [Chips],
    pub returned: &'a BTreeMap<String, Chips>,
    pub rake: Chips,
    pub issues: Vec<String>,
}

impl<'a> TryFrom<&'a HandAccumulator> for Summary<'a> {
    type Error = HandError;
    fn try_from(hand: &'a HandAccumulator) -> Result<Self, Self::Error> {
        let collected = hand.collected();
        let seats = hand
            .players()
            .iter()
            .map(|p| SeatSummary {
                seat: p.seat(),
                name: p.name(),
                starting: p.starting(),
                ending: p.stack(),
                committed: p.committed(),
                collected: collected.get(p.name()).copied().unwrap_or_default(),
                cards: hand.hole_cards(p.name()),
                folded: hand.has_folded(p.name()),
                showed: hand.has_shown(p.name()),
            })
            .collect();
        Ok(Self {
            info: hand.info(),
            game: hand.game(),
            validity: hand.validity(),
            hero: hand.hero(),
            seats,
            actions: hand.log().iter().collect(),
            board: hand.board_cards().collect(),
            total: hand.total_pot()?,
            pots: hand.pots()?,
            returned: hand.returned()?,
            rake: hand.rake()?,
            issues: hand.issues().iter().map(HandError::to_string).collect(),
        })
    }
}

/// Pretty-printed JSON of the [`Summary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Render for Json {
    fn render(&self, hand: &HandAccumulator) -> anyhow::Result<String> {
        let summary = Summary::try_from(hand)?;
        Ok(serde_json::to_string_pretty(&summary)?)
    }
}
