use super::segment::Segment;
use crate::Chips;
use serde::Serialize;

/// Errors raised while reconstructing a single hand.
///
/// Everything except the two pot-protocol variants is recoverable: the
/// offending callback is dropped and the hand carries on as [`Validity::Partial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    UnknownPlayer(String),
    Overdrawn {
        player: String,
        stack: Chips,
        amount: Chips,
    },
    MalformedAmount(String),
    MalformedCard(String),
    MalformedSegment(Segment, String),
    NotFinalized,
    AlreadyFinalized,
}

impl HandError {
    /// caller broke the finalize protocol; the hand cannot be trusted
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotFinalized | Self::AlreadyFinalized)
    }
}

impl std::fmt::Display for HandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlayer(name) => write!(f, "unknown player: {}", name),
            Self::Overdrawn {
                player,
                stack,
                amount,
            } => write!(f, "{} cannot put in {} from a stack of {}", player, amount, stack),
            Self::MalformedAmount(s) => write!(f, "malformed amount: {}", s),
            Self::MalformedCard(s) => write!(f, "malformed card: {}", s),
            Self::MalformedSegment(segment, s) => write!(f, "malformed {} segment: {}", segment, s),
            Self::NotFinalized => write!(f, "pot queried before finalize"),
            Self::AlreadyFinalized => write!(f, "hand already finalized"),
        }
    }
}

impl std::error::Error for HandError {}

/// Whether a hand was reconstructed without dropping anything.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    #[default]
    Clean,
    Partial,
}
