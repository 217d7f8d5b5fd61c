use super::rank::Rank;
use super::suit::Suit;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

/// str isomorphism
/// two characters, rank then suit: "Ts", "ah", "2C"
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => Ok(Self {
                rank: Rank::try_from(r)?,
                suit: Suit::try_from(u)?,
            }),
            _ => Err(format!("invalid card code: {:?}", s)),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// cards travel as their normalized two-character code
impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
