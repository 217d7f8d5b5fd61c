use crate::DEFAULT_MAX_SEATS;
use crate::Position;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

/// Identity of a hand as printed in its header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandInfo {
    pub id: String,
    pub table: String,
    pub max_seats: usize,
    pub started: DateTime<Utc>,
    pub button: Option<Position>,
}

impl Default for HandInfo {
    fn default() -> Self {
        Self {
            id: String::new(),
            table: String::new(),
            max_seats: DEFAULT_MAX_SEATS,
            started: DateTime::<Utc>::default(),
            button: None,
        }
    }
}
