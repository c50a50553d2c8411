//! Stat-update wire contract.
//!
//! Every committed change to a persisted field is reported as a bitmask of
//! changed fields followed by the new values for exactly those fields, in the
//! same fixed bit order. Existing clients depend on this order; do not
//! reorder the flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Which persisted character fields changed.
    ///
    /// Bit positions are the canonical wire order. Serde impls come from the
    /// bitflags `serde` feature.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StatFields: u16 {
        const LEVEL  = 1 << 0;
        const JOB    = 1 << 1;
        const STR    = 1 << 2;
        const DEX    = 1 << 3;
        const INT    = 1 << 4;
        const LUK    = 1 << 5;
        const MAX_HP = 1 << 6;
        const HP     = 1 << 7;
        const MAX_MP = 1 << 8;
        const MP     = 1 << 9;
        const AP     = 1 << 10;
        const SP     = 1 << 11;
        const EXP    = 1 << 12;
        const FAME   = 1 << 13;
    }
}

/// One value in a stat-update payload, typed at wire width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatValue {
    Level(u8),
    Job(u16),
    Stat(i16),
    Health(i16),
    Exp(i32),
    Fame(i16),
}

/// A batch of changed fields and their new values.
///
/// Mirrors the canonical order: set the fields you changed, then
/// [`StatUpdate::fields`] and [`StatUpdate::values`] derive the mask and the
/// ordered payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatUpdate {
    pub level: Option<u8>,
    pub job: Option<u16>,
    pub strength: Option<i16>,
    pub dexterity: Option<i16>,
    pub intelligence: Option<i16>,
    pub luck: Option<i16>,
    pub max_hp: Option<i16>,
    pub hp: Option<i16>,
    pub max_mp: Option<i16>,
    pub mp: Option<i16>,
    pub ap: Option<i16>,
    pub sp: Option<i16>,
    pub exp: Option<i32>,
    pub fame: Option<i16>,
}

impl StatUpdate {
    pub fn fields(&self) -> StatFields {
        let mut fields = StatFields::empty();
        if self.level.is_some() {
            fields |= StatFields::LEVEL;
        }
        if self.job.is_some() {
            fields |= StatFields::JOB;
        }
        if self.strength.is_some() {
            fields |= StatFields::STR;
        }
        if self.dexterity.is_some() {
            fields |= StatFields::DEX;
        }
        if self.intelligence.is_some() {
            fields |= StatFields::INT;
        }
        if self.luck.is_some() {
            fields |= StatFields::LUK;
        }
        if self.max_hp.is_some() {
            fields |= StatFields::MAX_HP;
        }
        if self.hp.is_some() {
            fields |= StatFields::HP;
        }
        if self.max_mp.is_some() {
            fields |= StatFields::MAX_MP;
        }
        if self.mp.is_some() {
            fields |= StatFields::MP;
        }
        if self.ap.is_some() {
            fields |= StatFields::AP;
        }
        if self.sp.is_some() {
            fields |= StatFields::SP;
        }
        if self.exp.is_some() {
            fields |= StatFields::EXP;
        }
        if self.fame.is_some() {
            fields |= StatFields::FAME;
        }
        fields
    }

    /// The changed values in canonical bit order.
    pub fn values(&self) -> Vec<StatValue> {
        let mut out = Vec::new();
        if let Some(v) = self.level {
            out.push(StatValue::Level(v));
        }
        if let Some(v) = self.job {
            out.push(StatValue::Job(v));
        }
        if let Some(v) = self.strength {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.dexterity {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.intelligence {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.luck {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.max_hp {
            out.push(StatValue::Health(v));
        }
        if let Some(v) = self.hp {
            out.push(StatValue::Health(v));
        }
        if let Some(v) = self.max_mp {
            out.push(StatValue::Health(v));
        }
        if let Some(v) = self.mp {
            out.push(StatValue::Health(v));
        }
        if let Some(v) = self.ap {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.sp {
            out.push(StatValue::Stat(v));
        }
        if let Some(v) = self.exp {
            out.push(StatValue::Exp(v));
        }
        if let Some(v) = self.fame {
            out.push(StatValue::Fame(v));
        }
        out
    }

    // Single-field constructors for the common mutator paths.

    pub fn of_level(level: u8) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    pub fn of_job(job: u16) -> Self {
        Self {
            job: Some(job),
            ..Self::default()
        }
    }

    pub fn of_hp(hp: i16) -> Self {
        Self {
            hp: Some(hp),
            ..Self::default()
        }
    }

    pub fn of_mp(mp: i16) -> Self {
        Self {
            mp: Some(mp),
            ..Self::default()
        }
    }

    pub fn of_max_hp(max_hp: i16) -> Self {
        Self {
            max_hp: Some(max_hp),
            ..Self::default()
        }
    }

    pub fn of_max_mp(max_mp: i16) -> Self {
        Self {
            max_mp: Some(max_mp),
            ..Self::default()
        }
    }

    pub fn of_ap(ap: i16) -> Self {
        Self {
            ap: Some(ap),
            ..Self::default()
        }
    }

    pub fn of_sp(sp: i16) -> Self {
        Self {
            sp: Some(sp),
            ..Self::default()
        }
    }

    pub fn of_exp(exp: i32) -> Self {
        Self {
            exp: Some(exp),
            ..Self::default()
        }
    }

    pub fn of_fame(fame: i16) -> Self {
        Self {
            fame: Some(fame),
            ..Self::default()
        }
    }
}
