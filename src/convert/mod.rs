pub mod converter;
pub use converter::*;

pub mod error;
pub use error::*;

pub mod everleaf;
pub use everleaf::*;

pub mod reader;
pub use reader::*;
