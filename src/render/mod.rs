pub mod renderer;
pub use renderer::*;

pub mod stars;
pub use stars::*;

pub mod summary;
pub use summary::*;
