//! Shared channel-wide services and injected data.

use std::sync::Arc;

use progression::{ExpCurve, GrowthTable, ProgressionConfig};

use crate::broadcast::WorldBroadcast;
use crate::collaborators::EquipCatalog;

/// Channel-wide context shared by every live character.
///
/// Holds the injected balance data (config, experience curve, growth tables),
/// the equip qualification catalog, and the world broadcast bus. One instance
/// per channel process; characters hold it behind an `Arc`.
pub struct ChannelContext {
    pub config: ProgressionConfig,
    pub curve: ExpCurve,
    pub growth: GrowthTable,
    pub equips: Arc<dyn EquipCatalog>,
    pub world: WorldBroadcast,
}

impl ChannelContext {
    pub fn new(
        config: ProgressionConfig,
        curve: ExpCurve,
        growth: GrowthTable,
        equips: Arc<dyn EquipCatalog>,
    ) -> Self {
        Self {
            config,
            curve,
            growth,
            equips,
            world: WorldBroadcast::new(),
        }
    }
}
