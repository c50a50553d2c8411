//! HP/MP lifecycle, the death cascade, bonus recomputation, and persistence.

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use channel_runtime::{Packet, SummonDismissReason, VitalsError};
use progression::{EquipSlotBonus, ExpCurve, ProgressionConfig, StatUpdate};

use common::{FakeCatalog, FakeSession, PLAYER_ID, base_snapshot, spawn, test_context,
    test_context_with_catalog};

fn hp_update(hp: i16) -> Packet {
    Packet::StatUpdate(StatUpdate::of_hp(hp))
}

#[test]
fn vitals_stay_in_bounds_across_mutations() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    vitals.set_hp(i16::MAX, true).unwrap();
    assert_eq!(vitals.hp(), vitals.effective_max_hp());

    vitals.modify_hp(-150, true).unwrap();
    assert!(vitals.hp() >= 0 && vitals.hp() <= vitals.effective_max_hp());

    vitals.modify_mp(9_999, true).unwrap();
    assert_eq!(vitals.mp(), vitals.effective_max_mp());

    vitals.damage_mp(50_000).unwrap();
    assert_eq!(vitals.mp(), 0);
}

#[test]
fn damage_never_drives_hp_negative() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    vitals.damage_hp(i32::MAX).unwrap();
    assert_eq!(vitals.hp(), 0);
    assert!(vitals.is_dead());
}

#[test]
fn death_cascade_fires_every_hook() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 2000));
    let mut snapshot = base_snapshot();
    snapshot.exp = 1500;
    let mut vitals = spawn(&session, ctx, snapshot);

    vitals.damage_hp(1_000).unwrap();

    assert!(vitals.is_dead());
    assert_eq!(*session.instance.deaths.lock().unwrap(), vec![PLAYER_ID]);
    assert_eq!(
        *session.summons.dismissals.lock().unwrap(),
        vec![SummonDismissReason::Disappearing]
    );
    assert!(session.party.hp_bar_refreshes.load(Ordering::Relaxed) >= 1);
    assert!(session.buffs.rage_checks.load(Ordering::Relaxed) >= 1);
    // Warrior line, luck 20: 0.2 / 20 + 0.05 = 0.06 of curve(10) = 2000.
    assert_eq!(vitals.exp(), 1500 - 120);
    assert_eq!(session.count_sent(|p| *p == hp_update(0)), 1);
}

#[test]
fn surviving_damage_does_not_cascade_death_hooks() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    vitals.damage_hp(299).unwrap();
    assert_eq!(vitals.hp(), 1);
    assert!(session.instance.deaths.lock().unwrap().is_empty());
    assert!(session.summons.dismissals.lock().unwrap().is_empty());
}

#[test]
fn infinite_mana_freezes_the_stored_value() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    session.buffs.infinite_mana.store(true, Ordering::Relaxed);
    vitals.set_mp(0, true).unwrap();
    assert_eq!(vitals.mp(), 200);
    vitals.damage_mp(500).unwrap();
    assert_eq!(vitals.mp(), 200);
    // The re-sync update still goes out so the client stays aligned.
    assert_eq!(
        session.count_sent(|p| *p == Packet::StatUpdate(StatUpdate::of_mp(200))),
        2
    );
}

#[test]
fn capacity_buff_expiry_reclamps_current_hp() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    vitals.set_capacity_buff_hp(60).unwrap();
    assert_eq!(vitals.effective_max_hp(), 800);
    vitals.set_hp(800, true).unwrap();

    vitals.set_capacity_buff_hp(0).unwrap();
    assert_eq!(vitals.effective_max_hp(), 500);
    assert_eq!(vitals.hp(), 500);
}

#[test]
fn set_max_hp_reruns_the_cascade() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    // Floor is 1, so the character survives at minimum capacity; force HP
    // down to the floor and verify the cascade ran through set_max_hp.
    vitals.set_hp(1, true).unwrap();
    let before = session.buffs.rage_checks.load(Ordering::Relaxed);
    vitals.set_max_hp(1).unwrap();
    assert_eq!(vitals.hp(), 1);
    assert!(session.buffs.rage_checks.load(Ordering::Relaxed) > before);
}

#[test]
fn disqualified_equipment_contributes_nothing_until_requalified() {
    let session = Arc::new(FakeSession::new());
    let catalog = Arc::new(FakeCatalog::default());
    catalog.fame_required.lock().unwrap().insert(900, 10);
    let ctx = test_context_with_catalog(
        ProgressionConfig::new(),
        ExpCurve::uniform(200, 1000),
        catalog,
    );
    let mut vitals = spawn(&session, ctx, base_snapshot());

    let cloak = EquipSlotBonus {
        item_id: 900,
        hp: 100,
        mp: 0,
        strength: 5,
        dexterity: 0,
        intelligence: 0,
        luck: 0,
    };
    vitals.set_equip(5, Some(cloak), false).unwrap();
    assert_eq!(vitals.equip_bonus().hp, 0);
    assert_eq!(vitals.effective_strength(), 35);

    // Fame rises past the gate; the next recompute restores the contribution.
    vitals.set_fame(10).unwrap();
    vitals.recompute_bonuses(true, false).unwrap();
    assert_eq!(vitals.equip_bonus().hp, 100);
    assert_eq!(vitals.effective_strength(), 40);

    vitals.set_equip(5, None, false).unwrap();
    assert_eq!(vitals.equip_bonus().hp, 0);
}

#[test]
fn attribute_buff_scales_base_attributes() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    vitals.set_attribute_buff(10).unwrap();
    assert_eq!(vitals.effective_strength(), 38); // 35 + 3
    assert_eq!(vitals.effective_luck(), 22); // 20 + 2
    assert_eq!(vitals.strength(), 35);

    vitals.set_attribute_buff(0).unwrap();
    assert_eq!(vitals.effective_strength(), 35);
}

#[test]
fn snapshot_round_trips_persisted_fields() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut snapshot = base_snapshot();
    snapshot.equip_slots.insert(
        3,
        EquipSlotBonus {
            item_id: 42,
            hp: 10,
            mp: 10,
            strength: 1,
            dexterity: 1,
            intelligence: 0,
            luck: 0,
        },
    );
    let vitals = spawn(&session, ctx, snapshot.clone());

    assert_eq!(vitals.snapshot(), snapshot);
}

#[test]
fn snapshot_serializes_for_the_persistence_layer() {
    let mut snapshot = base_snapshot();
    snapshot.equip_slots.insert(
        1,
        EquipSlotBonus {
            item_id: 77,
            hp: 5,
            mp: 0,
            strength: 0,
            dexterity: 2,
            intelligence: 0,
            luck: 0,
        },
    );
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: channel_runtime::VitalsSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn dead_on_load_normalizes_to_minimum_positive_hp() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut snapshot = base_snapshot();
    snapshot.hp = 0;
    let vitals = spawn(&session, ctx, snapshot);

    assert!(!vitals.is_dead());
    assert_eq!(vitals.hp(), ProgressionConfig::DEFAULT_REVIVE_HP);
}

#[test]
fn detached_session_is_a_fatal_invariant() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut vitals = spawn(&session, ctx, base_snapshot());

    drop(session);
    let err = vitals.set_hp(10, true).unwrap_err();
    assert_eq!(err, VitalsError::SessionDetached);
    assert!(err.severity().is_fatal());
}

#[test]
fn empty_slot_map_yields_empty_aggregates() {
    let session = Arc::new(FakeSession::new());
    let ctx = test_context(ProgressionConfig::new(), ExpCurve::uniform(200, 1000));
    let mut snapshot = base_snapshot();
    snapshot.equip_slots = BTreeMap::new();
    let mut vitals = spawn(&session, ctx, snapshot);

    vitals.recompute_bonuses(true, false).unwrap();
    assert_eq!(vitals.equip_bonus().hp, 0);
    assert_eq!(vitals.effective_max_hp(), vitals.base_max_hp());
}
