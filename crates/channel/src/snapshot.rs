//! Persistence snapshot of the character stats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use progression::{EquipSlotBonus, Job};

/// The persisted field set, loaded at character load and written back at
/// save/logout.
///
/// Transient buff percentages are deliberately absent: buffs do not survive
/// logout, so a freshly loaded character always starts with empty buff
/// aggregates and rebuilds its equip aggregate from `equip_slots`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub level: u8,
    pub job: Job,
    pub fame: i16,
    pub exp: i32,
    pub ap: i16,
    pub sp: i16,
    /// HP/MP-capacity points spent, for the anti-cheat refund gate.
    pub vital_points: i16,
    pub strength: i16,
    pub dexterity: i16,
    pub intelligence: i16,
    pub luck: i16,
    pub hp: i16,
    pub max_hp: i16,
    pub mp: i16,
    pub max_mp: i16,
    /// Per-slot stat contributions of worn equipment.
    pub equip_slots: BTreeMap<i16, EquipSlotBonus>,
}
