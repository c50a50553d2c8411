//! HP/MP lifecycle, capacity mutators, and the death cascade.
//!
//! Every HP change funnels into [`PlayerVitals::after_hp_change`]; the death
//! side effects cannot be bypassed by any mutation path.

use std::sync::Arc;

use progression::{Job, ProgressionConfig, StatUpdate};

use super::PlayerVitals;
use crate::collaborators::SummonDismissReason;
use crate::error::Result;
use crate::packet::Packet;
use crate::session::Session;

impl PlayerVitals {
    /// Set current HP, clamped into `[0, effective max]`.
    pub fn set_hp(&mut self, hp: i16, notify: bool) -> Result<()> {
        let session = self.session.resolve()?;
        self.hp = hp.clamp(ProgressionConfig::MIN_HP, self.effective_max_hp());
        if notify {
            session.send(Packet::StatUpdate(StatUpdate::of_hp(self.hp)));
        }
        self.after_hp_change(&session)
    }

    /// Add `delta` to current HP with the same clamping and cascade.
    pub fn modify_hp(&mut self, delta: i32, notify: bool) -> Result<()> {
        let session = self.session.resolve()?;
        let next = (i32::from(self.hp) + delta).clamp(
            i32::from(ProgressionConfig::MIN_HP),
            i32::from(self.effective_max_hp()),
        );
        self.hp = next as i16;
        if notify {
            session.send(Packet::StatUpdate(StatUpdate::of_hp(self.hp)));
        }
        self.after_hp_change(&session)
    }

    /// Subtract damage from current HP, floored at 0. Always notifies.
    pub fn damage_hp(&mut self, damage: i32) -> Result<()> {
        let session = self.session.resolve()?;
        self.hp = (i32::from(self.hp) - damage).max(i32::from(ProgressionConfig::MIN_HP)) as i16;
        session.send(Packet::StatUpdate(StatUpdate::of_hp(self.hp)));
        self.after_hp_change(&session)
    }

    /// Set current MP, clamped into `[0, effective max]`.
    ///
    /// Under an infinite-mana buff the stored value never moves; the update
    /// degenerates to a client re-sync.
    pub fn set_mp(&mut self, mp: i16, notify: bool) -> Result<()> {
        let session = self.session.resolve()?;
        if !session.buffs().has_infinite_mana() {
            self.mp = mp.clamp(ProgressionConfig::MIN_MP, self.effective_max_mp());
        }
        if notify {
            session.send(Packet::StatUpdate(StatUpdate::of_mp(self.mp)));
        }
        Ok(())
    }

    /// Add `delta` to current MP with the same clamping.
    pub fn modify_mp(&mut self, delta: i32, notify: bool) -> Result<()> {
        let session = self.session.resolve()?;
        if !session.buffs().has_infinite_mana() {
            let next = (i32::from(self.mp) + delta).clamp(
                i32::from(ProgressionConfig::MIN_MP),
                i32::from(self.effective_max_mp()),
            );
            self.mp = next as i16;
        }
        if notify {
            session.send(Packet::StatUpdate(StatUpdate::of_mp(self.mp)));
        }
        Ok(())
    }

    /// Subtract MP cost, floored at 0. Always notifies.
    pub fn damage_mp(&mut self, damage: i32) -> Result<()> {
        let session = self.session.resolve()?;
        if !session.buffs().has_infinite_mana() {
            self.mp =
                (i32::from(self.mp) - damage).max(i32::from(ProgressionConfig::MIN_MP)) as i16;
        }
        session.send(Packet::StatUpdate(StatUpdate::of_mp(self.mp)));
        Ok(())
    }

    /// Death/threshold cascade, run after every HP change.
    fn after_hp_change(&mut self, session: &Arc<dyn Session>) -> Result<()> {
        if let Some(party) = session.party() {
            party.show_hp_bar(session.player_id());
        }
        session.buffs().recheck_rage_threshold();
        if self.is_dead() {
            tracing::debug!(player = session.player_id(), "character died");
            if let Some(instance) = session.instance() {
                instance.on_player_death(session.player_id());
            }
            self.lose_exp()?;
            session.summons().dismiss_all(SummonDismissReason::Disappearing);
        }
        Ok(())
    }

    // ===== capacity =====

    /// Set base HP capacity, clamped into `[floor, ceiling]`.
    ///
    /// Re-runs the death cascade: capacity shrinkage can itself cross the
    /// death threshold.
    pub fn set_max_hp(&mut self, max_hp: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.max_hp = max_hp.clamp(
            self.ctx.config.capacity_hp_floor,
            self.ctx.config.capacity_hp_ceiling,
        );
        session.send(Packet::StatUpdate(StatUpdate::of_max_hp(self.max_hp)));
        self.after_hp_change(&session)
    }

    /// Set base MP capacity, clamped into `[floor, ceiling]`.
    pub fn set_max_mp(&mut self, max_mp: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.max_mp = max_mp.clamp(
            self.ctx.config.capacity_mp_floor,
            self.ctx.config.capacity_mp_ceiling,
        );
        session.send(Packet::StatUpdate(StatUpdate::of_max_mp(self.max_mp)));
        Ok(())
    }

    /// Add to base HP capacity, clamped into `[floor, ceiling]`.
    pub fn modify_max_hp(&mut self, delta: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.max_hp = (i32::from(self.max_hp) + i32::from(delta)).clamp(
            i32::from(self.ctx.config.capacity_hp_floor),
            i32::from(self.ctx.config.capacity_hp_ceiling),
        ) as i16;
        session.send(Packet::StatUpdate(StatUpdate::of_max_hp(self.max_hp)));
        Ok(())
    }

    /// Add to base MP capacity, clamped into `[floor, ceiling]`.
    pub fn modify_max_mp(&mut self, delta: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.max_mp = (i32::from(self.max_mp) + i32::from(delta)).clamp(
            i32::from(self.ctx.config.capacity_mp_floor),
            i32::from(self.ctx.config.capacity_mp_ceiling),
        ) as i16;
        session.send(Packet::StatUpdate(StatUpdate::of_max_mp(self.max_mp)));
        Ok(())
    }

    /// Set the percentage HP-capacity buff (0 on expiry).
    pub fn set_capacity_buff_hp(&mut self, percent: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.derive_capacity_buff_hp(percent);
        session.send(Packet::StatUpdate(StatUpdate::of_max_hp(self.base_max_hp())));
        if percent == 0 {
            // Expiry can strand current HP above the shrunken cap.
            let hp = self.hp();
            self.set_hp(hp, true)?;
        }
        if let Some(party) = session.party() {
            party.show_hp_bar(session.player_id());
        }
        session.buffs().recheck_rage_threshold();
        Ok(())
    }

    /// Set the percentage MP-capacity buff (0 on expiry).
    pub fn set_capacity_buff_mp(&mut self, percent: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.derive_capacity_buff_mp(percent);
        session.send(Packet::StatUpdate(StatUpdate::of_max_mp(self.base_max_mp())));
        if percent == 0 {
            let mp = self.mp();
            self.set_mp(mp, true)?;
        }
        Ok(())
    }

    // ===== single-field setters =====

    /// Set the level directly; emits the update and the map-visible effect.
    pub fn set_level(&mut self, level: u8) -> Result<()> {
        let session = self.session.resolve()?;
        self.level = level;
        session.send(Packet::StatUpdate(StatUpdate::of_level(level)));
        session.send_to_map(Packet::LevelUp {
            player_id: session.player_id(),
        });
        session.publish_level(level);
        Ok(())
    }

    /// Set the job; emits the update and the map-visible effect.
    pub fn set_job(&mut self, job: Job) -> Result<()> {
        let session = self.session.resolve()?;
        self.job = job;
        session.send(Packet::StatUpdate(StatUpdate::of_job(job.0)));
        session.send_to_map(Packet::JobChange {
            player_id: session.player_id(),
        });
        session.publish_job(job.0);
        Ok(())
    }

    pub fn set_str(&mut self, strength: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.strength = strength;
        session.send(Packet::StatUpdate(StatUpdate {
            strength: Some(strength),
            ..StatUpdate::default()
        }));
        Ok(())
    }

    pub fn set_dex(&mut self, dexterity: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.dexterity = dexterity;
        session.send(Packet::StatUpdate(StatUpdate {
            dexterity: Some(dexterity),
            ..StatUpdate::default()
        }));
        Ok(())
    }

    pub fn set_int(&mut self, intelligence: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.intelligence = intelligence;
        session.send(Packet::StatUpdate(StatUpdate {
            intelligence: Some(intelligence),
            ..StatUpdate::default()
        }));
        Ok(())
    }

    pub fn set_luk(&mut self, luck: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.luck = luck;
        session.send(Packet::StatUpdate(StatUpdate {
            luck: Some(luck),
            ..StatUpdate::default()
        }));
        Ok(())
    }

    pub fn set_ap(&mut self, ap: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.ap = ap;
        session.send(Packet::StatUpdate(StatUpdate::of_ap(ap)));
        Ok(())
    }

    pub fn set_sp(&mut self, sp: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.sp = sp;
        session.send(Packet::StatUpdate(StatUpdate::of_sp(sp)));
        Ok(())
    }

    /// Set stored experience, floored at 0.
    pub fn set_exp(&mut self, exp: i32) -> Result<()> {
        let session = self.session.resolve()?;
        self.exp = exp.max(0);
        session.send(Packet::StatUpdate(StatUpdate::of_exp(self.exp)));
        Ok(())
    }

    /// Set fame, clamped into the configured bounds.
    pub fn set_fame(&mut self, fame: i16) -> Result<()> {
        let session = self.session.resolve()?;
        self.fame = fame.clamp(self.ctx.config.fame_floor, self.ctx.config.fame_ceiling);
        session.send(Packet::StatUpdate(StatUpdate::of_fame(self.fame)));
        Ok(())
    }
}
