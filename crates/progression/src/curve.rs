//! The experience-to-level curve.

use serde::{Deserialize, Serialize};

/// Experience required to advance past each level.
///
/// The table is injected data: entry `level - 1` holds the experience needed
/// to leave `level`. The stored-experience invariant (`exp < curve(level)`
/// below the cap) is enforced by the callers, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpCurve {
    to_next: Vec<i32>,
}

impl ExpCurve {
    pub fn new(to_next: Vec<i32>) -> Self {
        Self { to_next }
    }

    /// Experience required to advance past `level`.
    ///
    /// Levels beyond the table saturate to the last entry so a misconfigured
    /// cap cannot index out of bounds.
    pub fn exp_to_next(&self, level: u8) -> i32 {
        let index = usize::from(level.max(1)) - 1;
        match self.to_next.get(index) {
            Some(&exp) => exp,
            None => *self.to_next.last().unwrap_or(&i32::MAX),
        }
    }

    /// A flat curve, handy for tools and tests.
    pub fn uniform(levels: u8, exp: i32) -> Self {
        Self::new(vec![exp; usize::from(levels)])
    }
}
