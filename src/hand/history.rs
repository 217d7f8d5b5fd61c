use super::action::Action;
use super::segment::Segment;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Append-only record of every action, grouped by segment in the order
/// the actions were supplied.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: BTreeMap<Segment, Vec<Action>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn record(&mut self, action: Action) {
        log::debug!("{}: {}", action.segment(), action);
        self.actions.entry(action.segment()).or_default().push(action);
    }
    pub fn segment(&self, segment: Segment) -> &[Action] {
        self.actions
            .get(&segment)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
    /// names of everyone who acted in the segment
    pub fn actors(&self, segment: Segment) -> BTreeSet<&str> {
        self.segment(segment).iter().map(Action::player).collect()
    }
    /// every action, segments in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values().flatten()
    }
    pub fn len(&self) -> usize {
        self.actions.values().map(Vec::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
