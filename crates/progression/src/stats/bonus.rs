use serde::{Deserialize, Serialize};

/// One aggregate of stat deltas from a single source class.
///
/// Two of these exist per character: equipment and active buffs. Both are
/// always replaced whole by the recomputation functions below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSet {
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub luck: i32,
}

impl BonusSet {
    pub const fn none() -> Self {
        Self {
            hp: 0,
            mp: 0,
            strength: 0,
            dexterity: 0,
            intelligence: 0,
            luck: 0,
        }
    }
}

/// Stat contribution of one equipped item, keyed by its slot.
///
/// This is source data, kept so the equip aggregate can be rebuilt from
/// scratch whenever qualification inputs (job, attributes, fame) change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipSlotBonus {
    pub item_id: u32,
    pub hp: i16,
    pub mp: i16,
    pub strength: i16,
    pub dexterity: i16,
    pub intelligence: i16,
    pub luck: i16,
}

/// Rebuild the equip aggregate from occupied slots.
///
/// `qualifies` is the external job/attribute/fame gate; a worn item that
/// fails it contributes nothing until a later recompute re-qualifies it.
pub fn aggregate_equips<'a, I, F>(slots: I, mut qualifies: F) -> BonusSet
where
    I: IntoIterator<Item = &'a EquipSlotBonus>,
    F: FnMut(&EquipSlotBonus) -> bool,
{
    let mut total = BonusSet::none();
    for info in slots {
        if !qualifies(info) {
            continue;
        }
        total.hp += i32::from(info.hp);
        total.mp += i32::from(info.mp);
        total.strength += i32::from(info.strength);
        total.dexterity += i32::from(info.dexterity);
        total.intelligence += i32::from(info.intelligence);
        total.luck += i32::from(info.luck);
    }
    total
}

/// Attribute contribution of a percentage attribute buff over base stats.
///
/// The percentage applies to *base* attributes only; equipment does not
/// compound into the buff.
pub fn attribute_buff_bonus(
    base_strength: i16,
    base_dexterity: i16,
    base_intelligence: i16,
    base_luck: i16,
    percent: i16,
) -> (i32, i32, i32, i32) {
    let scale = |base: i16| i32::from(base) * i32::from(percent) / 100;
    (
        scale(base_strength),
        scale(base_dexterity),
        scale(base_intelligence),
        scale(base_luck),
    )
}

/// Capacity contribution of a percentage capacity buff.
///
/// The percentage applies over base plus equip capacity; the result is capped
/// so the buffed total can never exceed the absolute ceiling.
pub fn capacity_buff_bonus(base_plus_equip: i32, percent: i16, ceiling: i16) -> i32 {
    (base_plus_equip * i32::from(percent) / 100).min(i32::from(ceiling))
}
