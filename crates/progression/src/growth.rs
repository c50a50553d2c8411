//! Per-job-track HP/MP growth formulas.
//!
//! Capacity growth is rolled, not fixed: each job track defines a `(min, max)`
//! range for HP and MP, in two variants, one for leveling up and one for
//! spending an ability point on capacity directly. The intelligence-scaled MP
//! bonus is applied on top by [`GrowthFormula::roll`].

use serde::{Deserialize, Serialize};

use crate::rng::RngSource;

/// Which formula variant to use for a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthVariant {
    /// Rolled once per level gained.
    LevelUp,
    /// Rolled when an ability point is spent on HP/MP capacity.
    Allocation,
}

/// One `(min, max)` growth range pair plus the INT scaling factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthFormula {
    pub hp_min: i16,
    pub hp_max: i16,
    pub mp_min: i16,
    pub mp_max: i16,
    /// Multiplier for the `effective_int * m / 200` MP bonus.
    pub mp_int_multiplier: i16,
}

/// The rolled outcome of one growth event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthRoll {
    pub hp: i16,
    pub mp: i16,
}

impl GrowthFormula {
    /// Roll HP and MP gains, folding in the intelligence bonus.
    pub fn roll(&self, rng: &mut dyn RngSource, effective_int: i16) -> GrowthRoll {
        let hp = rng.range_inclusive(i32::from(self.hp_min), i32::from(self.hp_max));
        let mut mp = rng.range_inclusive(i32::from(self.mp_min), i32::from(self.mp_max));
        mp += i32::from(effective_int) * i32::from(self.mp_int_multiplier) / 200;
        GrowthRoll {
            hp: hp.clamp(0, i32::from(i16::MAX)) as i16,
            mp: mp.clamp(0, i32::from(i16::MAX)) as i16,
        }
    }
}

/// Both variants for one job track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub level_up: GrowthFormula,
    pub allocation: GrowthFormula,
}

impl GrowthRow {
    pub fn variant(&self, variant: GrowthVariant) -> &GrowthFormula {
        match variant {
            GrowthVariant::LevelUp => &self.level_up,
            GrowthVariant::Allocation => &self.allocation,
        }
    }
}

/// Growth rows indexed by job track.
///
/// Injected data, like the experience curve. Unknown tracks fall back to row
/// zero so a data gap degrades to novice growth instead of a crash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthTable {
    rows: Vec<GrowthRow>,
}

impl GrowthTable {
    pub fn new(rows: Vec<GrowthRow>) -> Self {
        debug_assert!(!rows.is_empty(), "growth table needs at least one row");
        Self { rows }
    }

    pub fn row(&self, track: u8) -> &GrowthRow {
        self.rows.get(usize::from(track)).unwrap_or(&self.rows[0])
    }

    pub fn formula(&self, track: u8, variant: GrowthVariant) -> &GrowthFormula {
        self.row(track).variant(variant)
    }
}
