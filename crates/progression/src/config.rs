use serde::{Deserialize, Serialize};

/// Balance constants and tunable parameters for the progression engine.
///
/// None of these numbers are decided here; the host loads them from its data
/// files and hands the resulting config to every live character. The defaults
/// below exist so tests and tools can build a working config without a loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Cap on each base primary attribute (STR/DEX/INT/LUK).
    pub attribute_cap: i16,
    /// Lower bound for base HP capacity.
    pub capacity_hp_floor: i16,
    /// Absolute ceiling for HP capacity, effective values included.
    pub capacity_hp_ceiling: i16,
    /// Lower bound for base MP capacity.
    pub capacity_mp_floor: i16,
    /// Absolute ceiling for MP capacity, effective values included.
    pub capacity_mp_ceiling: i16,
    /// HP a dead-on-load character is normalized to.
    pub revive_hp: i16,
    pub fame_floor: i16,
    pub fame_ceiling: i16,
    /// AP granted per level on the standard tracks.
    pub ap_per_level: i16,
    /// AP granted per level on the advanced track, at or below the cutoff.
    pub advanced_ap_per_level: i16,
    /// Last level at which the advanced track earns the elevated AP rate.
    pub advanced_ap_cutoff: u8,
    /// SP granted per level (novice tracks earn none).
    pub sp_per_level: i16,
    /// Most levels a single experience grant may resolve.
    pub max_levels_per_gain: u8,
    /// Level cap for the standard job families.
    pub standard_max_level: u8,
    /// Level cap for the advanced job family.
    pub advanced_max_level: u8,
    pub death_loss: DeathLossConfig,
}

/// Rates for experience loss on death. See [`crate::loss::loss_rate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeathLossConfig {
    /// Flat rate used in maps flagged as reduced-loss.
    pub reduced_rate: f64,
    /// Base rate for the caster line before the luck division.
    pub caster_rate: f64,
    /// Base rate for every other line before the luck division.
    pub standard_rate: f64,
    /// Offset added after dividing the base rate by effective luck.
    pub luck_offset: f64,
}

impl ProgressionConfig {
    /// HP floor; a character at exactly this value is dead.
    pub const MIN_HP: i16 = 0;
    /// MP floor.
    pub const MIN_MP: i16 = 0;

    pub const DEFAULT_ATTRIBUTE_CAP: i16 = 999;
    pub const DEFAULT_CAPACITY_HP_FLOOR: i16 = 1;
    pub const DEFAULT_CAPACITY_HP_CEILING: i16 = 30_000;
    pub const DEFAULT_CAPACITY_MP_FLOOR: i16 = 1;
    pub const DEFAULT_CAPACITY_MP_CEILING: i16 = 30_000;
    pub const DEFAULT_REVIVE_HP: i16 = 50;
    pub const DEFAULT_FAME_FLOOR: i16 = -30_000;
    pub const DEFAULT_FAME_CEILING: i16 = 30_000;
    pub const DEFAULT_AP_PER_LEVEL: i16 = 5;
    pub const DEFAULT_ADVANCED_AP_PER_LEVEL: i16 = 6;
    pub const DEFAULT_ADVANCED_AP_CUTOFF: u8 = 70;
    pub const DEFAULT_SP_PER_LEVEL: i16 = 3;
    pub const DEFAULT_MAX_LEVELS_PER_GAIN: u8 = 1;
    pub const DEFAULT_STANDARD_MAX_LEVEL: u8 = 200;
    pub const DEFAULT_ADVANCED_MAX_LEVEL: u8 = 120;

    pub fn new() -> Self {
        Self {
            attribute_cap: Self::DEFAULT_ATTRIBUTE_CAP,
            capacity_hp_floor: Self::DEFAULT_CAPACITY_HP_FLOOR,
            capacity_hp_ceiling: Self::DEFAULT_CAPACITY_HP_CEILING,
            capacity_mp_floor: Self::DEFAULT_CAPACITY_MP_FLOOR,
            capacity_mp_ceiling: Self::DEFAULT_CAPACITY_MP_CEILING,
            revive_hp: Self::DEFAULT_REVIVE_HP,
            fame_floor: Self::DEFAULT_FAME_FLOOR,
            fame_ceiling: Self::DEFAULT_FAME_CEILING,
            ap_per_level: Self::DEFAULT_AP_PER_LEVEL,
            advanced_ap_per_level: Self::DEFAULT_ADVANCED_AP_PER_LEVEL,
            advanced_ap_cutoff: Self::DEFAULT_ADVANCED_AP_CUTOFF,
            sp_per_level: Self::DEFAULT_SP_PER_LEVEL,
            max_levels_per_gain: Self::DEFAULT_MAX_LEVELS_PER_GAIN,
            standard_max_level: Self::DEFAULT_STANDARD_MAX_LEVEL,
            advanced_max_level: Self::DEFAULT_ADVANCED_MAX_LEVEL,
            death_loss: DeathLossConfig::default(),
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeathLossConfig {
    pub const DEFAULT_REDUCED_RATE: f64 = 0.01;
    pub const DEFAULT_CASTER_RATE: f64 = 0.08;
    pub const DEFAULT_STANDARD_RATE: f64 = 0.2;
    pub const DEFAULT_LUCK_OFFSET: f64 = 0.05;
}

impl Default for DeathLossConfig {
    fn default() -> Self {
        Self {
            reduced_rate: Self::DEFAULT_REDUCED_RATE,
            caster_rate: Self::DEFAULT_CASTER_RATE,
            standard_rate: Self::DEFAULT_STANDARD_RATE,
            luck_offset: Self::DEFAULT_LUCK_OFFSET,
        }
    }
}
