//! Bonus aggregation: equipment sources and percentage buffs.

use progression::{EquipSlotBonus, aggregate_equips, attribute_buff_bonus, capacity_buff_bonus};

use super::PlayerVitals;
use crate::error::Result;

impl PlayerVitals {
    /// Rebuild the derived bonus aggregates from their sources.
    ///
    /// Aggregates are replaced whole, never patched: the attribute buff is
    /// re-derived from its stored percent, the equip aggregate (when
    /// `update_equips`) from the slot map through the qualification gate, and
    /// the capacity buffs from their stored percents. Unless `is_loading`,
    /// current HP/MP are re-clamped downward if the new effective caps shrank.
    ///
    /// Idempotent and safe to call repeatedly. Aborts before any mutation if
    /// the owning session cannot be resolved.
    pub fn recompute_bonuses(&mut self, update_equips: bool, is_loading: bool) -> Result<()> {
        let session = self.session.resolve()?;

        if self.attribute_buff_percent > 0 {
            self.apply_attribute_buff();
        }

        if update_equips {
            // Qualification is gated on the current effective stats; a slot
            // that fails the gate is worn but contributes nothing.
            let gender = session.gender();
            let job = self.job;
            let strength = self.effective_strength();
            let dexterity = self.effective_dexterity();
            let intelligence = self.effective_intelligence();
            let luck = self.effective_luck();
            let fame = self.fame;
            let equips = &self.ctx.equips;
            self.equip_bonus = aggregate_equips(self.equip_slots.values(), |info| {
                equips.can_equip(
                    info.item_id,
                    gender,
                    job,
                    strength,
                    dexterity,
                    intelligence,
                    luck,
                    fame,
                )
            });
        }

        if self.capacity_buff_hp_percent > 0 {
            self.set_capacity_buff_hp(self.capacity_buff_hp_percent)?;
        }
        if self.capacity_buff_mp_percent > 0 {
            self.set_capacity_buff_mp(self.capacity_buff_mp_percent)?;
        }

        if !is_loading {
            // Capacity can shrink (buff expiry, unequip); current values
            // must follow the new caps down.
            if self.hp > self.effective_max_hp() {
                let hp = self.hp;
                self.set_hp(hp, true)?;
            }
            if self.mp > self.effective_max_mp() {
                let mp = self.mp;
                self.set_mp(mp, true)?;
            }
        }
        Ok(())
    }

    /// Install or clear one equip slot's stat contribution, then rebuild.
    ///
    /// Cash-overlay slots arrive negative; they share source data with their
    /// base slot, so the id is normalized by absolute value.
    pub fn set_equip(
        &mut self,
        slot: i16,
        equip: Option<EquipSlotBonus>,
        is_loading: bool,
    ) -> Result<()> {
        let slot = slot.abs();
        match equip {
            Some(info) => {
                self.equip_slots.insert(slot, info);
            }
            None => {
                self.equip_slots.remove(&slot);
            }
        }
        self.recompute_bonuses(true, is_loading)
    }

    /// Set the percentage attribute buff (0 clears it).
    pub fn set_attribute_buff(&mut self, percent: i16) -> Result<()> {
        let changed = self.attribute_buff_percent != percent;
        self.attribute_buff_percent = percent;
        self.apply_attribute_buff();
        if changed {
            self.recompute_bonuses(true, false)?;
        }
        Ok(())
    }

    /// Re-derive the attribute-buff contribution from the stored percent.
    pub(super) fn apply_attribute_buff(&mut self) {
        let (strength, dexterity, intelligence, luck) = attribute_buff_bonus(
            self.strength,
            self.dexterity,
            self.intelligence,
            self.luck,
            self.attribute_buff_percent,
        );
        self.buff_bonus.strength = strength;
        self.buff_bonus.dexterity = dexterity;
        self.buff_bonus.intelligence = intelligence;
        self.buff_bonus.luck = luck;
    }

    /// Re-derive the capacity-buff HP contribution from `percent`.
    pub(super) fn derive_capacity_buff_hp(&mut self, percent: i16) {
        self.capacity_buff_hp_percent = percent;
        self.buff_bonus.hp = capacity_buff_bonus(
            i32::from(self.max_hp) + self.equip_bonus.hp,
            percent,
            self.ctx.config.capacity_hp_ceiling,
        );
    }

    /// Re-derive the capacity-buff MP contribution from `percent`.
    pub(super) fn derive_capacity_buff_mp(&mut self, percent: i16) {
        self.capacity_buff_mp_percent = percent;
        self.buff_bonus.mp = capacity_buff_bonus(
            i32::from(self.max_mp) + self.equip_bonus.mp,
            percent,
            self.ctx.config.capacity_mp_ceiling,
        );
    }
}
