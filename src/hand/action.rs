use super::raise::Raise;
use super::segment::Segment;
use crate::Chips;
use serde::Serialize;

/// Which forced bet a post covers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Post {
    SmallBlind,
    BigBlind,
    /// small and big together; the small part is dead
    BothBlinds,
    Ante,
    BringIn,
}

/// What a player did, with the amounts that go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Play {
    Fold,
    Check,
    Bet { amount: Chips },
    Call { amount: Chips },
    Raise(Raise),
    Post { post: Post, amount: Chips },
}

impl Play {
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Fold | Self::Check)
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fold => "folds",
            Self::Check => "checks",
            Self::Bet { .. } => "bets",
            Self::Call { .. } => "calls",
            Self::Raise(_) => "raises",
            Self::Post { .. } => "posts",
        }
    }
}

/// One entry of the action log. Immutable once recorded: `stack` and
/// `all_in` describe the player right after this action and are never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    segment: Segment,
    player: String,
    play: Play,
    stack: Chips,
    all_in: bool,
}

impl Action {
    pub fn new(segment: Segment, player: &str, play: Play, stack: Chips) -> Self {
        Self {
            segment,
            player: player.to_string(),
            play,
            stack,
            all_in: stack.is_zero(),
        }
    }
    pub fn segment(&self) -> Segment {
        self.segment
    }
    pub fn player(&self) -> &str {
        &self.player
    }
    pub fn play(&self) -> &Play {
        &self.play
    }
    /// stack left behind after acting
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.player, self.play.label())?;
        match self.play {
            Play::Raise(raise) => write!(f, " {} to {}", raise.raise_by(), raise.raise_to())?,
            Play::Post { amount, .. } | Play::Bet { amount } | Play::Call { amount } => {
                write!(f, " {}", amount)?
            }
            Play::Fold | Play::Check => {}
        }
        if self.all_in {
            write!(f, " (all-in)")?;
        }
        Ok(())
    }
}
