//! Deterministic character-progression math and data types.
//!
//! `progression` defines the canonical rules for bonus aggregation, effective
//! stat computation, the experience curve, per-job-track growth formulas, and
//! the stat-update wire mask. Everything here is pure, synchronous CPU work;
//! the live-character layer in `channel-runtime` drives these APIs from each
//! session's serialized event stream.
pub mod config;
pub mod curve;
pub mod error;
pub mod growth;
pub mod job;
pub mod loss;
pub mod rng;
pub mod stats;
pub mod update;

pub use config::{DeathLossConfig, ProgressionConfig};
pub use curve::ExpCurve;
pub use error::ErrorSeverity;
pub use growth::{GrowthFormula, GrowthRoll, GrowthRow, GrowthTable, GrowthVariant};
pub use job::{Job, JobLine};
pub use loss::{exp_loss, loss_rate};
pub use rng::{Pcg32, RngSource};
pub use stats::{
    BonusSet, EquipSlotBonus, aggregate_equips, attribute_buff_bonus, capacity_buff_bonus,
    effective_capacity, saturate_stat,
};
pub use update::{StatFields, StatUpdate, StatValue};
