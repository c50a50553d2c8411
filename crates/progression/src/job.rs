//! Job identifiers and the track/line queries derived from them.
//!
//! Jobs are plain numeric ids owned by external data; this module only
//! decodes the structure the progression rules depend on: the growth-table
//! track, the class line (casters lose less experience on death), the novice
//! flag (no SP, no death loss), and the advanced family (separate level cap
//! and elevated early AP rate).

use serde::{Deserialize, Serialize};

use crate::config::ProgressionConfig;

/// A job-track identifier.
///
/// The advanced family occupies ids 1000..2000; within a family, the hundreds
/// digit selects the line and the trailing digits the advancement step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job(pub u16);

/// Coarse class lineage, used for the death-loss base rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum JobLine {
    Novice,
    Warrior,
    Caster,
    Archer,
    Rogue,
    Corsair,
}

impl Job {
    /// Growth-table row selector: the hundreds digit within the family.
    pub fn track(self) -> u8 {
        ((self.0 % 1000) / 100) as u8
    }

    pub fn line(self) -> JobLine {
        match self.track() {
            0 => JobLine::Novice,
            1 => JobLine::Warrior,
            2 => JobLine::Caster,
            3 => JobLine::Archer,
            4 => JobLine::Rogue,
            _ => JobLine::Corsair,
        }
    }

    /// Entry-track jobs earn no SP on level-up and skip death loss.
    pub fn is_novice(self) -> bool {
        self.0 % 1000 == 0
    }

    /// The advanced family has its own level cap and AP schedule.
    pub fn is_advanced_track(self) -> bool {
        (1000..2000).contains(&self.0)
    }

    pub fn max_level(self, config: &ProgressionConfig) -> u8 {
        if self.is_advanced_track() {
            config.advanced_max_level
        } else {
            config.standard_max_level
        }
    }
}
