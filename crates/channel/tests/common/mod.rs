//! Shared fixtures: a fake session with recording collaborators.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use channel_runtime::{
    ActiveBuffs, BuffKind, CapacityKind, ChannelContext, EquipCatalog, Gender, Instance, Inventory,
    MapInfo, Packet, Party, PassiveSkills, PlayerVitals, Session, SessionHandle, Summons,
    SummonDismissReason, VitalsSnapshot,
};
use progression::{
    ExpCurve, GrowthFormula, GrowthRow, GrowthTable, Job, ProgressionConfig,
};

pub const PLAYER_ID: u32 = 7;

#[derive(Default)]
pub struct FakeBuffs {
    pub infinite_mana: AtomicBool,
    pub attribute_percent: Mutex<Option<i16>>,
    pub capacity_hp_percent: Mutex<Option<i16>>,
    pub capacity_mp_percent: Mutex<Option<i16>>,
    pub rage_checks: AtomicU32,
}

impl ActiveBuffs for FakeBuffs {
    fn has_infinite_mana(&self) -> bool {
        self.infinite_mana.load(Ordering::Relaxed)
    }

    fn active_multiplier(&self, kind: BuffKind) -> Option<i16> {
        match kind {
            BuffKind::AttributePercent => *self.attribute_percent.lock().unwrap(),
            BuffKind::CapacityHpPercent => *self.capacity_hp_percent.lock().unwrap(),
            BuffKind::CapacityMpPercent => *self.capacity_mp_percent.lock().unwrap(),
        }
    }

    fn recheck_rage_threshold(&self) {
        self.rage_checks.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct FakeSkills {
    pub hp_bonus: i16,
    pub mp_bonus: i16,
}

impl PassiveSkills for FakeSkills {
    fn has_capacity_skill(&self, kind: CapacityKind) -> bool {
        self.capacity_bonus(kind) != 0
    }

    fn capacity_bonus(&self, kind: CapacityKind) -> i16 {
        match kind {
            CapacityKind::Hp => self.hp_bonus,
            CapacityKind::Mp => self.mp_bonus,
        }
    }
}

#[derive(Default)]
pub struct FakeParty {
    pub hp_bar_refreshes: AtomicU32,
}

impl Party for FakeParty {
    fn show_hp_bar(&self, _player_id: u32) {
        self.hp_bar_refreshes.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct FakeInstance {
    pub deaths: Mutex<Vec<u32>>,
}

impl Instance for FakeInstance {
    fn on_player_death(&self, player_id: u32) {
        self.deaths.lock().unwrap().push(player_id);
    }
}

#[derive(Default)]
pub struct FakeSummons {
    pub dismissals: Mutex<Vec<SummonDismissReason>>,
}

impl Summons for FakeSummons {
    fn dismiss_all(&self, reason: SummonDismissReason) {
        self.dismissals.lock().unwrap().push(reason);
    }
}

#[derive(Default)]
pub struct FakeInventory {
    pub charms: AtomicU16,
}

impl Inventory for FakeInventory {
    fn loss_charm_count(&self) -> u16 {
        self.charms.load(Ordering::Relaxed)
    }

    fn consume_loss_charm(&self) {
        self.charms.fetch_sub(1, Ordering::Relaxed);
    }
}

pub struct FakeSession {
    pub name: String,
    pub exempt: bool,
    pub map: Mutex<MapInfo>,
    pub sent: Mutex<Vec<Packet>>,
    pub map_effects: Mutex<Vec<Packet>>,
    pub buffs: FakeBuffs,
    pub skills: FakeSkills,
    pub inventory: FakeInventory,
    pub party: FakeParty,
    pub instance: FakeInstance,
    pub summons: FakeSummons,
    pub level_marks: AtomicU32,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            name: "Aria".to_string(),
            exempt: false,
            map: Mutex::new(MapInfo::default()),
            sent: Mutex::new(Vec::new()),
            map_effects: Mutex::new(Vec::new()),
            buffs: FakeBuffs::default(),
            skills: FakeSkills::default(),
            inventory: FakeInventory::default(),
            party: FakeParty::default(),
            instance: FakeInstance::default(),
            summons: FakeSummons::default(),
            level_marks: AtomicU32::new(0),
        }
    }

    pub fn sent_packets(&self) -> Vec<Packet> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().unwrap().clear();
        self.map_effects.lock().unwrap().clear();
    }

    pub fn count_sent(&self, predicate: impl Fn(&Packet) -> bool) -> usize {
        self.sent.lock().unwrap().iter().filter(|p| predicate(p)).count()
    }

    pub fn count_map_effects(&self, predicate: impl Fn(&Packet) -> bool) -> usize {
        self.map_effects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| predicate(p))
            .count()
    }
}

impl Session for FakeSession {
    fn player_id(&self) -> u32 {
        PLAYER_ID
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn gender(&self) -> Gender {
        Gender::Female
    }

    fn announce_exempt(&self) -> bool {
        self.exempt
    }

    fn map(&self) -> MapInfo {
        *self.map.lock().unwrap()
    }

    fn send(&self, packet: Packet) {
        self.sent.lock().unwrap().push(packet);
    }

    fn send_to_map(&self, packet: Packet) {
        self.map_effects.lock().unwrap().push(packet);
    }

    fn buffs(&self) -> &dyn ActiveBuffs {
        &self.buffs
    }

    fn skills(&self) -> &dyn PassiveSkills {
        &self.skills
    }

    fn inventory(&self) -> &dyn Inventory {
        &self.inventory
    }

    fn party(&self) -> Option<&dyn Party> {
        Some(&self.party)
    }

    fn instance(&self) -> Option<&dyn Instance> {
        Some(&self.instance)
    }

    fn summons(&self) -> &dyn Summons {
        &self.summons
    }

    fn mark_level_up(&self) {
        self.level_marks.fetch_add(1, Ordering::Relaxed);
    }

    fn publish_level(&self, _level: u8) {}

    fn publish_job(&self, _job: u16) {}
}

/// Catalog with optional per-item fame requirements and a deny list.
#[derive(Default)]
pub struct FakeCatalog {
    pub fame_required: Mutex<HashMap<u32, i16>>,
}

impl EquipCatalog for FakeCatalog {
    fn can_equip(
        &self,
        item_id: u32,
        _gender: Gender,
        _job: Job,
        _strength: i16,
        _dexterity: i16,
        _intelligence: i16,
        _luck: i16,
        fame: i16,
    ) -> bool {
        match self.fame_required.lock().unwrap().get(&item_id) {
            Some(&required) => fame >= required,
            None => true,
        }
    }
}

pub fn test_growth() -> GrowthTable {
    GrowthTable::new(vec![GrowthRow {
        level_up: GrowthFormula {
            hp_min: 20,
            hp_max: 24,
            mp_min: 10,
            mp_max: 12,
            mp_int_multiplier: 20,
        },
        allocation: GrowthFormula {
            hp_min: 8,
            hp_max: 12,
            mp_min: 6,
            mp_max: 8,
            mp_int_multiplier: 20,
        },
    }])
}

pub fn test_context(config: ProgressionConfig, curve: ExpCurve) -> Arc<ChannelContext> {
    test_context_with_catalog(config, curve, Arc::new(FakeCatalog::default()))
}

pub fn test_context_with_catalog(
    config: ProgressionConfig,
    curve: ExpCurve,
    catalog: Arc<FakeCatalog>,
) -> Arc<ChannelContext> {
    Arc::new(ChannelContext::new(config, curve, test_growth(), catalog))
}

pub fn base_snapshot() -> VitalsSnapshot {
    VitalsSnapshot {
        level: 10,
        job: Job(112),
        fame: 0,
        exp: 0,
        ap: 0,
        sp: 0,
        vital_points: 0,
        strength: 35,
        dexterity: 25,
        intelligence: 4,
        luck: 20,
        hp: 300,
        max_hp: 500,
        mp: 200,
        max_mp: 400,
        equip_slots: BTreeMap::new(),
    }
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn spawn(
    session: &Arc<FakeSession>,
    ctx: Arc<ChannelContext>,
    snapshot: VitalsSnapshot,
) -> PlayerVitals {
    init_tracing();
    let as_session: Arc<dyn Session> = session.clone();
    let handle = SessionHandle::new(&as_session);
    let vitals = PlayerVitals::from_snapshot(handle, ctx, snapshot, 0xfeed)
        .expect("session is live at load");
    session.clear_sent();
    vitals
}
