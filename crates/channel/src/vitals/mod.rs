//! The authoritative per-character vitals and progression state.
//!
//! One [`PlayerVitals`] exists per online character, owned by that
//! character's session processing context. All public mutators run inside
//! the owning context's serialized event stream; nothing here blocks or
//! races. Submodules split the mutator surface by responsibility:
//!
//! - [`bonuses`]: aggregate recomputation and equipment/buff sources
//! - [`controller`]: HP/MP lifecycle, clamping, the death cascade
//! - [`leveling`]: experience accrual, allocation, experience loss on death

mod bonuses;
mod controller;
mod leveling;

use std::collections::BTreeMap;
use std::sync::Arc;

use progression::{
    BonusSet, EquipSlotBonus, Job, Pcg32, ProgressionConfig, StatValue, effective_capacity,
    saturate_stat,
};

use crate::context::ChannelContext;
use crate::error::Result;
use crate::session::SessionHandle;
use crate::snapshot::VitalsSnapshot;

/// Server-side model of one character's combat vitals and progression.
pub struct PlayerVitals {
    session: SessionHandle,
    ctx: Arc<ChannelContext>,
    rng: Pcg32,

    level: u8,
    job: Job,
    fame: i16,
    exp: i32,

    ap: i16,
    sp: i16,
    vital_points: i16,

    strength: i16,
    dexterity: i16,
    intelligence: i16,
    luck: i16,

    hp: i16,
    max_hp: i16,
    mp: i16,
    max_mp: i16,

    attribute_buff_percent: i16,
    capacity_buff_hp_percent: i16,
    capacity_buff_mp_percent: i16,

    equip_bonus: BonusSet,
    buff_bonus: BonusSet,
    equip_slots: BTreeMap<i16, EquipSlotBonus>,
}

impl PlayerVitals {
    /// Construct from a persisted snapshot at character load.
    ///
    /// Dead-on-load characters are normalized to the configured minimum
    /// positive HP rather than left at 0, and the equip aggregate is rebuilt
    /// from the snapshot's slot map without re-clamping current values.
    pub fn from_snapshot(
        session: SessionHandle,
        ctx: Arc<ChannelContext>,
        snapshot: VitalsSnapshot,
        rng_seed: u64,
    ) -> Result<Self> {
        let revive_hp = ctx.config.revive_hp;
        let mut vitals = Self {
            session,
            ctx,
            rng: Pcg32::new(rng_seed),
            level: snapshot.level,
            job: snapshot.job,
            fame: snapshot.fame,
            exp: snapshot.exp,
            ap: snapshot.ap,
            sp: snapshot.sp,
            vital_points: snapshot.vital_points,
            strength: snapshot.strength,
            dexterity: snapshot.dexterity,
            intelligence: snapshot.intelligence,
            luck: snapshot.luck,
            hp: snapshot.hp,
            max_hp: snapshot.max_hp,
            mp: snapshot.mp,
            max_mp: snapshot.max_mp,
            attribute_buff_percent: 0,
            capacity_buff_hp_percent: 0,
            capacity_buff_mp_percent: 0,
            equip_bonus: BonusSet::none(),
            buff_bonus: BonusSet::none(),
            equip_slots: snapshot.equip_slots,
        };
        if vitals.is_dead() {
            vitals.hp = revive_hp;
        }
        vitals.recompute_bonuses(true, true)?;
        Ok(vitals)
    }

    /// Serialize the persisted field set for the persistence collaborator.
    pub fn snapshot(&self) -> VitalsSnapshot {
        VitalsSnapshot {
            level: self.level,
            job: self.job,
            fame: self.fame,
            exp: self.exp,
            ap: self.ap,
            sp: self.sp,
            vital_points: self.vital_points,
            strength: self.strength,
            dexterity: self.dexterity,
            intelligence: self.intelligence,
            luck: self.luck,
            hp: self.hp,
            max_hp: self.max_hp,
            mp: self.mp,
            max_mp: self.max_mp,
            equip_slots: self.equip_slots.clone(),
        }
    }

    /// Dead is a derived predicate, not stored state.
    pub fn is_dead(&self) -> bool {
        self.hp == ProgressionConfig::MIN_HP
    }

    // ===== identity / progression =====

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn job(&self) -> Job {
        self.job
    }

    pub fn fame(&self) -> i16 {
        self.fame
    }

    pub fn exp(&self) -> i32 {
        self.exp
    }

    pub fn ap(&self) -> i16 {
        self.ap
    }

    pub fn sp(&self) -> i16 {
        self.sp
    }

    /// HP/MP-capacity points spent through allocation.
    pub fn vital_points(&self) -> i16 {
        self.vital_points
    }

    // ===== base attributes =====

    pub fn strength(&self) -> i16 {
        self.strength
    }

    pub fn dexterity(&self) -> i16 {
        self.dexterity
    }

    pub fn intelligence(&self) -> i16 {
        self.intelligence
    }

    pub fn luck(&self) -> i16 {
        self.luck
    }

    // ===== effective attributes (bonus-inclusive, saturated) =====

    pub fn effective_strength(&self) -> i16 {
        saturate_stat(
            i32::from(self.strength) + self.buff_bonus.strength + self.equip_bonus.strength,
        )
    }

    pub fn effective_dexterity(&self) -> i16 {
        saturate_stat(
            i32::from(self.dexterity) + self.buff_bonus.dexterity + self.equip_bonus.dexterity,
        )
    }

    pub fn effective_intelligence(&self) -> i16 {
        saturate_stat(
            i32::from(self.intelligence)
                + self.buff_bonus.intelligence
                + self.equip_bonus.intelligence,
        )
    }

    pub fn effective_luck(&self) -> i16 {
        saturate_stat(i32::from(self.luck) + self.buff_bonus.luck + self.equip_bonus.luck)
    }

    // ===== vitals =====

    pub fn hp(&self) -> i16 {
        self.hp
    }

    pub fn mp(&self) -> i16 {
        self.mp
    }

    /// Base HP capacity, bonuses excluded.
    pub fn base_max_hp(&self) -> i16 {
        self.max_hp
    }

    pub fn base_max_mp(&self) -> i16 {
        self.max_mp
    }

    pub fn effective_max_hp(&self) -> i16 {
        effective_capacity(
            self.max_hp,
            self.equip_bonus.hp,
            self.buff_bonus.hp,
            self.ctx.config.capacity_hp_ceiling,
        )
    }

    pub fn effective_max_mp(&self) -> i16 {
        effective_capacity(
            self.max_mp,
            self.equip_bonus.mp,
            self.buff_bonus.mp,
            self.ctx.config.capacity_mp_ceiling,
        )
    }

    // ===== aggregates =====

    pub fn equip_bonus(&self) -> &BonusSet {
        &self.equip_bonus
    }

    pub fn buff_bonus(&self) -> &BonusSet {
        &self.buff_bonus
    }

    /// Write the session-connect stat block in its fixed field sequence.
    ///
    /// Capacity fields here are base values; the client applies buff and
    /// equip visuals separately.
    pub fn write_connect_snapshot(&self, out: &mut Vec<StatValue>) {
        out.push(StatValue::Level(self.level));
        out.push(StatValue::Job(self.job.0));
        out.push(StatValue::Stat(self.strength));
        out.push(StatValue::Stat(self.dexterity));
        out.push(StatValue::Stat(self.intelligence));
        out.push(StatValue::Stat(self.luck));
        out.push(StatValue::Health(self.hp));
        out.push(StatValue::Health(self.max_hp));
        out.push(StatValue::Health(self.mp));
        out.push(StatValue::Health(self.max_mp));
        out.push(StatValue::Stat(self.ap));
        out.push(StatValue::Stat(self.sp));
        out.push(StatValue::Exp(self.exp));
        out.push(StatValue::Fame(self.fame));
    }
}
