//! Death experience-loss math.
//!
//! The rate is fractional and luck-sensitive: a fixed low rate in reduced-loss
//! maps, otherwise a line-dependent base rate divided by effective luck plus a
//! fixed offset. The loss itself is taken against the experience requirement
//! for the character's *current* level, not the stored remainder.

use crate::config::DeathLossConfig;
use crate::job::JobLine;

/// Fractional experience loss rate for one death.
pub fn loss_rate(
    config: &DeathLossConfig,
    line: JobLine,
    effective_luck: i16,
    reduced_loss_map: bool,
) -> f64 {
    if reduced_loss_map {
        return config.reduced_rate;
    }
    let base = match line {
        JobLine::Caster => config.caster_rate,
        _ => config.standard_rate,
    };
    // Luck below 1 would invert the discount; treat it as 1.
    base / f64::from(effective_luck.max(1)) + config.luck_offset
}

/// Experience subtracted for one death, truncated toward zero.
pub fn exp_loss(exp_to_next: i32, rate: f64) -> i32 {
    (f64::from(exp_to_next) * rate) as i32
}
