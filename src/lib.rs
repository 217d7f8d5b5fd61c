//! Hand history conversion with exact monetary accounting.
//!
//! Raw transcripts from a poker room are read into a [`hand::HandAccumulator`],
//! which reconstructs every stack, every betting action, and the final pot
//! distribution including side pots. Renderers then format the finished hand.
//!
//! ## Module Organization
//!
//! - [`cards`] - Card primitives and two-character code parsing
//! - [`hand`] - Ledger, action log, pot engine, and the hand accumulator
//! - [`convert`] - Room readers and the batch converter
//! - [`render`] - PokerStars-style text and JSON output
pub mod cards;
pub mod convert;
pub mod hand;
pub mod render;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Currency amounts. Exact decimal, scale preserved from the input text.
pub type Chips = rust_decimal::Decimal;
/// Seat number as printed by the room (1-based).
pub type Position = usize;

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Seat count assumed when the room does not print one.
pub const DEFAULT_MAX_SEATS: usize = 6;
/// Largest table any supported room deals.
pub const MAX_SEATS: usize = 10;
/// Directory for timestamped log files written by the CLI.
pub const LOG_DIRECTORY: &str = "logs";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Writes DEBUG level to file, `level` to terminal.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all(LOG_DIRECTORY).context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("{}/{}.log", LOG_DIRECTORY, time))
            .context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
