use std::fmt;

use serde::{Deserialize, Serialize};

/// Points earned in a game session.
///
/// Only [`crate::MatchResolver`] adds to the score.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Score(u64);
impl Score {
    /// Score at the start of a session.
    pub const ZERO: Score = Score(0);

    /// Returns the number of points.
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }
}
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
