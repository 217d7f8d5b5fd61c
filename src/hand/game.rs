use super::segment::Variant;
use crate::Chips;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Holdem,
    Omaha,
    Stud,
    Razz,
}

impl Game {
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Holdem | Self::Omaha => Variant::Flop,
            Self::Stud | Self::Razz => Variant::Stud,
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Holdem => write!(f, "Hold'em"),
            Self::Omaha => write!(f, "Omaha"),
            Self::Stud => write!(f, "7 Card Stud"),
            Self::Razz => write!(f, "Razz"),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoLimit => write!(f, "No Limit"),
            Self::PotLimit => write!(f, "Pot Limit"),
            Self::FixedLimit => write!(f, "Limit"),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    /// tournament or play chips; rooms print no symbol
    #[serde(rename = "T$")]
    Chips,
}

impl Currency {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Chips => "",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Chips => write!(f, "T$"),
        }
    }
}

/// Game, betting structure, currency, and stakes of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameType {
    pub game: Game,
    pub limit: Limit,
    pub currency: Currency,
    pub sb: Chips,
    pub bb: Chips,
}

impl GameType {
    pub fn variant(&self) -> Variant {
        self.game.variant()
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.game, self.limit)
    }
}
