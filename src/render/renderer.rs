use crate::hand::HandAccumulator;

/// Render defines how a finished hand is written out.
/// Renderers only read; the hand must already be finalized.
pub trait Render: Send + Sync {
    fn render(&self, hand: &HandAccumulator) -> anyhow::Result<String>;
}
