pub mod card;
pub use card::*;

pub mod rank;
pub use rank::*;

pub mod suit;
pub use suit::*;

/// Parses a list of card codes, failing on the first bad one.
pub fn parse<'a>(codes: impl IntoIterator<Item = &'a str>) -> Result<Vec<Card>, String> {
    codes.into_iter().map(Card::try_from).collect()
}
