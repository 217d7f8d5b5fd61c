pub mod accumulator;
pub use accumulator::*;

pub mod action;
pub use action::*;

pub mod error;
pub use error::*;

pub mod game;
pub use game::*;

pub mod history;
pub use history::*;

pub mod info;
pub use info::*;

pub mod ledger;
pub use ledger::*;

pub mod player;
pub use player::*;

pub mod pot;
pub use pot::*;

pub mod raise;
pub use raise::*;

pub mod segment;
pub use segment::*;
