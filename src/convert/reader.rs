use super::error::ConvertError;
use crate::hand::GameType;
use crate::hand::HandAccumulator;

/// Reader defines how one poker room's transcript is turned into a hand.
/// Implementations drive the [`HandAccumulator`] callbacks in order and
/// finalize the pot before handing the hand back.
pub trait Reader: Send + Sync {
    /// room name, for logs
    fn site(&self) -> &'static str;
    /// stakes, game, and currency from the hand header
    fn game_type(&self, text: &str) -> Result<GameType, ConvertError>;
    /// one hand of text in, one finalized hand out
    fn read(&self, text: &str) -> Result<HandAccumulator, ConvertError>;
}
