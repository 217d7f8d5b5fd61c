use crate::Chips;
use crate::Position;
use serde::Serialize;

/// A seated player and the money they brought to the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    seat: Position,
    name: String,
    starting: Chips,
    stack: Chips,
}

impl Player {
    pub fn new(seat: Position, name: &str, starting: Chips) -> Self {
        Self {
            seat,
            name: name.to_string(),
            starting,
            stack: starting,
        }
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn starting(&self) -> Chips {
        self.starting
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// everything this player has put in across the hand
    pub fn committed(&self) -> Chips {
        self.starting - self.stack
    }
    pub fn is_all_in(&self) -> bool {
        self.stack.is_zero()
    }
    /// only the ledger moves money, and only after checking the stack covers it
    pub(super) fn debit(&mut self, amount: Chips) {
        self.stack -= amount;
    }
}
