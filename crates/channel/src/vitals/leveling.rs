//! Experience accrual, stat-point allocation, and experience loss on death.

use std::sync::Arc;

use progression::{GrowthVariant, StatFields, exp_loss, loss_rate};

use super::PlayerVitals;
use crate::collaborators::{BuffKind, CapacityKind};
use crate::error::Result;
use crate::packet::{NoticeKind, Packet};

impl PlayerVitals {
    /// Grant experience and resolve any level-ups it pays for.
    ///
    /// Gain notices are chunked so amounts wider than the display field still
    /// render correctly. The level-up loop is capped per grant event; when
    /// the cap is struck with surplus left, the stored pool is chopped to one
    /// below the next requirement so it stays legal for the new level. All
    /// accumulated HP/MP/AP/SP gains apply atomically once the loop settles.
    pub fn give_exp(&mut self, amount: u64, in_chat: bool, highlighted: bool) -> Result<()> {
        let session = self.session.resolve()?;
        let ctx = Arc::clone(&self.ctx);
        let job_max = self.job.max_level(&ctx.config);
        if self.level >= job_max {
            // Max-level characters accrue nothing at all.
            return Ok(());
        }

        let mut pool = self.exp as u64 + amount;

        if amount > 0 {
            const CHUNK: u64 = i32::MAX as u64;
            let mut remaining = amount;
            while remaining > 0 {
                let chunk = remaining.min(CHUNK) as i32;
                session.send(Packet::ExpGained {
                    amount: chunk,
                    highlighted,
                    in_chat,
                });
                remaining -= chunk as u64;
            }
        }

        let mut level = self.level;
        if pool >= ctx.curve.exp_to_next(level) as u64 {
            let advanced = self.job.is_advanced_track();
            let novice = self.job.is_novice();
            let levels_max = ctx.config.max_levels_per_gain;
            let formula = *ctx.growth.formula(self.job.track(), GrowthVariant::LevelUp);

            let mut levels_gained: u8 = 0;
            let mut ap_gain: i16 = 0;
            let mut sp_gain: i16 = 0;
            let mut hp_gain: i32 = 0;
            let mut mp_gain: i32 = 0;

            while pool >= ctx.curve.exp_to_next(level) as u64 && levels_gained < levels_max {
                pool -= ctx.curve.exp_to_next(level) as u64;
                level += 1;
                levels_gained += 1;

                let effective_int = self.effective_intelligence();
                let roll = formula.roll(&mut self.rng, effective_int);
                hp_gain += i32::from(roll.hp);
                mp_gain += i32::from(roll.mp);

                let skills = session.skills();
                if skills.has_capacity_skill(CapacityKind::Hp) {
                    hp_gain += i32::from(skills.capacity_bonus(CapacityKind::Hp));
                }
                if skills.has_capacity_skill(CapacityKind::Mp) {
                    mp_gain += i32::from(skills.capacity_bonus(CapacityKind::Mp));
                }

                ap_gain += if advanced && level <= ctx.config.advanced_ap_cutoff {
                    ctx.config.advanced_ap_per_level
                } else {
                    ctx.config.ap_per_level
                };
                if !novice {
                    sp_gain += ctx.config.sp_per_level;
                }

                if level >= job_max {
                    // Nobody levels past the cap; the surplus is forfeit.
                    pool = 0;
                    break;
                }
            }

            if pool >= ctx.curve.exp_to_next(level) as u64 {
                // Loop cap struck with surplus left: chop to a legal remainder.
                pool = (ctx.curve.exp_to_next(level) - 1).max(0) as u64;
            }

            if levels_gained > 0 {
                tracing::debug!(levels = levels_gained, level, "level up resolved");
                self.modify_max_hp(hp_gain.min(i32::from(i16::MAX)) as i16)?;
                self.modify_max_mp(mp_gain.min(i32::from(i16::MAX)) as i16)?;
                self.set_level(level)?;
                self.set_ap(self.ap() + ap_gain)?;
                self.set_sp(self.sp() + sp_gain)?;

                // Leveling must not strip an active capacity buff.
                if let Some(percent) = session.buffs().active_multiplier(BuffKind::CapacityHpPercent)
                {
                    self.set_capacity_buff_hp(percent)?;
                }
                if let Some(percent) = session.buffs().active_multiplier(BuffKind::CapacityMpPercent)
                {
                    self.set_capacity_buff_mp(percent)?;
                }

                let full_hp = self.effective_max_hp();
                let full_mp = self.effective_max_mp();
                self.set_hp(full_hp, true)?;
                self.set_mp(full_mp, true)?;
                session.mark_level_up();

                if level == job_max && !session.announce_exempt() {
                    let name = session.name();
                    let text = format!(
                        "[Congrats] {} has reached Level {}! Congratulate {} on such an amazing \
                         achievement!",
                        name, job_max, name
                    );
                    ctx.world.publish(Packet::Notice {
                        kind: NoticeKind::Blue,
                        text,
                    });
                }
            }
        }

        // In range by construction: below the next requirement, or zero.
        self.set_exp(pool as i32)
    }

    /// Handle a single client stat-allocation request.
    ///
    /// A request with no AP available is a cheat signal, dropped silently.
    pub fn allocate_stat(&mut self, target: StatFields) -> Result<()> {
        if self.ap() == 0 {
            tracing::warn!(stat = ?target, "stat allocation with zero AP dropped");
            return Ok(());
        }
        let session = self.session.resolve()?;
        session.send(Packet::AllocationAck);
        self.apply_stat_change(target, 1, false)
    }

    /// Handle a batched client stat-allocation request.
    ///
    /// The whole batch is rejected if any delta is negative or the total
    /// exceeds available AP; nothing is applied partially.
    pub fn allocate_stat_batch(&mut self, requests: &[(StatFields, i16)]) -> Result<()> {
        let session = self.session.resolve()?;
        session.send(Packet::AllocationAck);

        let mut total: i32 = 0;
        for (target, value) in requests {
            if *value < 0 {
                tracing::warn!(stat = ?target, value, "negative batch allocation dropped");
                return Ok(());
            }
            total += i32::from(*value);
        }
        if total > i32::from(self.ap()) {
            tracing::warn!(total, ap = self.ap(), "over-budget batch allocation dropped");
            return Ok(());
        }

        for (target, value) in requests {
            self.apply_stat_change(*target, *value, false)?;
        }
        Ok(())
    }

    /// Apply one allocation delta to the targeted stat.
    ///
    /// Attributes are silent no-ops at the cap, capacities at the ceiling.
    /// A capacity refund with no allocated capacity points is a cheat signal.
    /// AP is deducted unless `is_reset` marks a non-costed reset.
    pub fn apply_stat_change(
        &mut self,
        target: StatFields,
        delta: i16,
        is_reset: bool,
    ) -> Result<()> {
        let session = self.session.resolve()?;
        let ctx = Arc::clone(&self.ctx);
        let cap = ctx.config.attribute_cap;
        let is_subtract = delta < 0;

        if target == StatFields::STR {
            if self.strength() >= cap {
                return Ok(());
            }
            self.set_str(self.strength() + delta)?;
        } else if target == StatFields::DEX {
            if self.dexterity() >= cap {
                return Ok(());
            }
            self.set_dex(self.dexterity() + delta)?;
        } else if target == StatFields::INT {
            if self.intelligence() >= cap {
                return Ok(());
            }
            self.set_int(self.intelligence() + delta)?;
        } else if target == StatFields::LUK {
            if self.luck() >= cap {
                return Ok(());
            }
            self.set_luk(self.luck() + delta)?;
        } else if target == StatFields::MAX_HP || target == StatFields::MAX_MP {
            if target == StatFields::MAX_HP && self.base_max_hp() >= ctx.config.capacity_hp_ceiling
            {
                return Ok(());
            }
            if target == StatFields::MAX_MP && self.base_max_mp() >= ctx.config.capacity_mp_ceiling
            {
                return Ok(());
            }
            if is_subtract && self.vital_points() == 0 {
                tracing::warn!("capacity refund with no allocated points dropped");
                return Ok(());
            }

            let formula = *ctx.growth.formula(self.job.track(), GrowthVariant::Allocation);
            let effective_int = self.effective_intelligence();
            let roll = formula.roll(&mut self.rng, effective_int);
            let skills = session.skills();
            let mut hp_gain = i32::from(roll.hp);
            let mut mp_gain = i32::from(roll.mp);
            if skills.has_capacity_skill(CapacityKind::Hp) {
                hp_gain += i32::from(skills.capacity_bonus(CapacityKind::Hp));
            }
            if skills.has_capacity_skill(CapacityKind::Mp) {
                mp_gain += i32::from(skills.capacity_bonus(CapacityKind::Mp));
            }

            self.vital_points += delta;
            if target == StatFields::MAX_HP {
                self.modify_max_hp(hp_gain.min(i32::from(i16::MAX)) as i16)?;
            } else {
                self.modify_max_mp(mp_gain.min(i32::from(i16::MAX)) as i16)?;
            }

            if let Some(percent) = session.buffs().active_multiplier(BuffKind::CapacityHpPercent) {
                self.set_capacity_buff_hp(percent)?;
            }
            if let Some(percent) = session.buffs().active_multiplier(BuffKind::CapacityMpPercent) {
                self.set_capacity_buff_mp(percent)?;
            }

            let hp = self.hp();
            let mp = self.mp();
            self.set_hp(hp, true)?;
            self.set_mp(mp, true)?;
        } else {
            // Unrecognized target: cheat signal, nothing is applied.
            tracing::warn!(stat = ?target, "unrecognized stat allocation target dropped");
            return Ok(());
        }

        if !is_reset {
            self.set_ap(self.ap() - delta)?;
        }
        self.recompute_bonuses(true, false)
    }

    /// Apply experience loss for a death.
    ///
    /// Skipped for novices, at job max, and on loss-exempt maps. A held
    /// loss-protection charm absorbs the death instead.
    pub fn lose_exp(&mut self) -> Result<()> {
        let session = self.session.resolve()?;
        if self.job.is_novice() || self.level >= self.job.max_level(&self.ctx.config) {
            return Ok(());
        }
        let map = session.map();
        if map.loss_exempt {
            return Ok(());
        }

        let charms = session.inventory().loss_charm_count();
        if charms > 0 {
            session.inventory().consume_loss_charm();
            let remaining = u8::try_from(charms - 1).unwrap_or(u8::MAX);
            session.send(Packet::CharmUsed { remaining });
            return Ok(());
        }

        let rate = loss_rate(
            &self.ctx.config.death_loss,
            self.job.line(),
            self.effective_luck(),
            map.reduced_loss,
        );
        // The loss is taken against the current level's full requirement,
        // not the stored remainder.
        let loss = exp_loss(self.ctx.curve.exp_to_next(self.level), rate);
        tracing::debug!(loss, rate, "death experience loss");
        self.set_exp(self.exp() - loss)
    }
}
