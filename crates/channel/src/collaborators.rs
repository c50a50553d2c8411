//! Host-supplied query traits.
//!
//! The progression engine consumes its neighbors through these narrow seams:
//! item qualification, active buff multipliers, passive capacity skills, and
//! the cross-entity hooks (party, instance, summons, inventory). Nothing here
//! is owned by the engine; the session wires concrete implementations in.

use progression::Job;

use crate::session::Gender;

/// Job/attribute/fame gate for worn equipment.
///
/// Called once per occupied slot during bonus recomputation. A worn item that
/// fails the gate contributes nothing until a later recompute passes it.
pub trait EquipCatalog: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn can_equip(
        &self,
        item_id: u32,
        gender: Gender,
        job: Job,
        strength: i16,
        dexterity: i16,
        intelligence: i16,
        luck: i16,
        fame: i16,
    ) -> bool;
}

/// Percentage buffs the stat layer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuffKind {
    /// Percentage boost to base primary attributes.
    AttributePercent,
    /// Percentage boost to HP capacity.
    CapacityHpPercent,
    /// Percentage boost to MP capacity.
    CapacityMpPercent,
}

/// Queries against the character's active buff set.
pub trait ActiveBuffs {
    /// While active, MP mutators re-sync but never change the stored value.
    fn has_infinite_mana(&self) -> bool;

    /// Current multiplier for the given buff kind, if that buff is active.
    fn active_multiplier(&self, kind: BuffKind) -> Option<i16>;

    /// Re-evaluate the low-HP rage passive after an HP or capacity change.
    fn recheck_rage_threshold(&self);
}

/// Which capacity a passive increase skill applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapacityKind {
    Hp,
    Mp,
}

/// Queries against the character's passive skill set.
pub trait PassiveSkills {
    fn has_capacity_skill(&self, kind: CapacityKind) -> bool;

    /// Flat capacity gained per growth event from the owned passive.
    fn capacity_bonus(&self, kind: CapacityKind) -> i16;
}

/// Party-side reactions to vitals changes.
pub trait Party {
    fn show_hp_bar(&self, player_id: u32);
}

/// Instance-local lifecycle hooks.
pub trait Instance {
    fn on_player_death(&self, player_id: u32);
}

/// Why a summon is being dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummonDismissReason {
    Disappearing,
    Canceled,
}

/// The character's active companion summons.
pub trait Summons {
    fn dismiss_all(&self, reason: SummonDismissReason);
}

/// The slice of the inventory the death path needs.
pub trait Inventory {
    fn loss_charm_count(&self) -> u16;

    /// Consume exactly one loss-protection charm.
    fn consume_loss_charm(&self);
}
