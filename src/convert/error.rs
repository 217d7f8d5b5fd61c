use crate::hand::Game;
use crate::hand::HandError;

/// Reasons a single hand could not be converted at all.
///
/// Recoverable problems never show up here; they stay on the hand as
/// issues and mark it partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// no recognizable stakes and game header
    UnrecognizedGame,
    /// the reader knows the game but cannot read it
    UnsupportedGame(Game),
    /// hand number or start time missing
    MissingHandInfo,
    /// player names could not be turned into line patterns
    Pattern(String),
    /// the hand broke the pot protocol
    Hand(HandError),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedGame => write!(f, "unrecognized game header"),
            Self::UnsupportedGame(game) => write!(f, "unsupported game: {}", game),
            Self::MissingHandInfo => write!(f, "missing hand number or start time"),
            Self::Pattern(e) => write!(f, "player pattern: {}", e),
            Self::Hand(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hand(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HandError> for ConvertError {
    fn from(e: HandError) -> Self {
        Self::Hand(e)
    }
}
