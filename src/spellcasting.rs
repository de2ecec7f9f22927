//! Spellcasting: slot progression, save DCs, preparation and known-spell
//! limits, and slot bookkeeping.
//!
//! All progression data lives in fixed const tables defined once: the
//! 20-row slot table indexed by effective caster level, the pact-magic
//! table, and the per-class spells-known tables. Cantrips are never
//! tracked as slots.

use crate::ability::{ability_modifier, Ability};
use crate::class::ClassLevel;
use crate::error::RulesError;
use crate::proficiency::{proficiency_bonus, LEVEL_MAX, LEVEL_MIN};
use serde::{Deserialize, Serialize};

/// How a class accrues spell slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    /// Full progression (wizard, cleric, druid, sorcerer, bard).
    Full,
    /// Half progression (paladin, ranger).
    Half,
    /// Third progression (eldritch knight, arcane trickster).
    Third,
    /// Pact magic (warlock): slots tracked separately.
    Pact,
    /// No spellcasting.
    NonCaster,
}

/// A class's spellcasting metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasterProfile {
    /// Slot progression.
    pub caster_type: CasterType,
    /// Casting ability; `None` for non-casters.
    pub ability: Option<Ability>,
}

/// Look up a class's casting ability and caster type.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{caster_profile, Ability, CasterType};
///
/// let wizard = caster_profile("wizard").unwrap();
/// assert_eq!(wizard.caster_type, CasterType::Full);
/// assert_eq!(wizard.ability, Some(Ability::Intelligence));
///
/// let fighter = caster_profile("fighter").unwrap();
/// assert_eq!(fighter.caster_type, CasterType::NonCaster);
/// assert!(caster_profile("witch").is_err());
/// ```
pub fn caster_profile(class_key: &str) -> Result<CasterProfile, RulesError> {
    let profile = match class_key {
        "wizard" => CasterProfile {
            caster_type: CasterType::Full,
            ability: Some(Ability::Intelligence),
        },
        "cleric" | "druid" => CasterProfile {
            caster_type: CasterType::Full,
            ability: Some(Ability::Wisdom),
        },
        "sorcerer" | "bard" => CasterProfile {
            caster_type: CasterType::Full,
            ability: Some(Ability::Charisma),
        },
        "paladin" => CasterProfile {
            caster_type: CasterType::Half,
            ability: Some(Ability::Charisma),
        },
        "ranger" => CasterProfile {
            caster_type: CasterType::Half,
            ability: Some(Ability::Wisdom),
        },
        "warlock" => CasterProfile {
            caster_type: CasterType::Pact,
            ability: Some(Ability::Charisma),
        },
        "eldritch knight" | "arcane trickster" => CasterProfile {
            caster_type: CasterType::Third,
            ability: Some(Ability::Intelligence),
        },
        "barbarian" | "fighter" | "monk" | "rogue" => CasterProfile {
            caster_type: CasterType::NonCaster,
            ability: None,
        },
        other => return Err(RulesError::UnknownClass(other.to_string())),
    };
    Ok(profile)
}

fn check_level(level: i32, quantity: &'static str) -> Result<(), RulesError> {
    if !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        return Err(RulesError::OutOfRange {
            quantity,
            value: level,
            min: LEVEL_MIN,
            max: LEVEL_MAX,
        });
    }
    Ok(())
}

/// The level used to index the slot table, after the partial-caster
/// divisor.
///
/// Pact casters report their class level here but draw slots from the
/// separate pact table; they contribute nothing to multiclass slots.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{effective_caster_level, CasterType};
///
/// assert_eq!(effective_caster_level(7, CasterType::Full).unwrap(), 7);
/// assert_eq!(effective_caster_level(7, CasterType::Half).unwrap(), 3);
/// assert_eq!(effective_caster_level(7, CasterType::Third).unwrap(), 2);
/// assert_eq!(effective_caster_level(7, CasterType::NonCaster).unwrap(), 0);
/// ```
pub fn effective_caster_level(
    class_level: i32,
    caster_type: CasterType,
) -> Result<i32, RulesError> {
    check_level(class_level, "class level")?;
    Ok(match caster_type {
        CasterType::Full | CasterType::Pact => class_level,
        CasterType::Half => class_level / 2,
        CasterType::Third => class_level / 3,
        CasterType::NonCaster => 0,
    })
}

/// Maximum slots per spell level (columns 1–9), indexed by effective
/// caster level (rows 0–20; row 0 is all zeros).
const SPELL_SLOT_TABLE: [[u8; 9]; 21] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

/// One spell level's slot counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlot {
    pub max: u8,
    pub used: u8,
}

/// Slot counts for spell levels 1–9.
///
/// Invariant: `used <= max` per level, maintained by [`SpellSlots::use_slot`]
/// and [`SpellSlots::restore_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots([SpellSlot; 9]);

impl SpellSlots {
    /// Build fresh (unspent) slots from per-level maximums.
    pub fn from_max(max: [u8; 9]) -> Self {
        let mut slots = [SpellSlot::default(); 9];
        for (slot, &m) in slots.iter_mut().zip(max.iter()) {
            slot.max = m;
        }
        Self(slots)
    }

    /// Counts for one spell level (1–9).
    pub fn get(&self, spell_level: u8) -> Option<SpellSlot> {
        if (1..=9).contains(&spell_level) {
            Some(self.0[spell_level as usize - 1])
        } else {
            None
        }
    }

    /// Per-level maximums, levels 1–9 in order.
    pub fn max_per_level(&self) -> [u8; 9] {
        let mut max = [0u8; 9];
        for (m, slot) in max.iter_mut().zip(self.0.iter()) {
            *m = slot.max;
        }
        max
    }

    /// Highest spell level with at least one slot, 0 when none.
    pub fn highest_level(&self) -> u8 {
        (1..=9u8)
            .rev()
            .find(|&l| self.0[l as usize - 1].max > 0)
            .unwrap_or(0)
    }

    /// Spend one slot of the given level.
    ///
    /// Fails with [`RulesError::NoSlotAvailable`] when every slot of that
    /// level is already used (or the level grants none).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sheet5e::SpellSlots;
    ///
    /// let slots = SpellSlots::from_max([2, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// let slots = slots.use_slot(1).unwrap();
    /// let slots = slots.use_slot(1).unwrap();
    /// assert!(slots.use_slot(1).is_err());
    /// ```
    pub fn use_slot(&self, spell_level: u8) -> Result<SpellSlots, RulesError> {
        if !(1..=9).contains(&spell_level) {
            return Err(RulesError::OutOfRange {
                quantity: "spell level",
                value: spell_level as i32,
                min: 1,
                max: 9,
            });
        }
        let mut next = *self;
        let slot = &mut next.0[spell_level as usize - 1];
        if slot.used >= slot.max {
            return Err(RulesError::NoSlotAvailable(spell_level));
        }
        slot.used += 1;
        Ok(next)
    }

    /// Long rest: reset every `used` counter to 0. Idempotent.
    pub fn restore_all(&self) -> SpellSlots {
        let mut next = *self;
        for slot in next.0.iter_mut() {
            slot.used = 0;
        }
        next
    }
}

/// Slots for a single class, via the effective-caster-level table lookup.
///
/// Pact casters get no entries here; use [`pact_magic_slots`].
///
/// # Examples
///
/// ```rust
/// use sheet5e::{spell_slots, CasterType};
///
/// let slots = spell_slots(20, CasterType::Full).unwrap();
/// assert_eq!(slots.max_per_level(), [4, 3, 3, 3, 3, 2, 2, 1, 1]);
///
/// let slots = spell_slots(5, CasterType::Half).unwrap();
/// assert_eq!(slots.max_per_level(), [4, 0, 0, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn spell_slots(class_level: i32, caster_type: CasterType) -> Result<SpellSlots, RulesError> {
    if caster_type == CasterType::Pact {
        return Ok(SpellSlots::default());
    }
    let effective = effective_caster_level(class_level, caster_type)?;
    Ok(SpellSlots::from_max(SPELL_SLOT_TABLE[effective as usize]))
}

/// Combined slots for a multiclass caster.
///
/// Sums the effective caster levels of all non-pact casting classes, then
/// performs a single table lookup on the combined total. Pact classes are
/// excluded; non-casters contribute zero.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{multiclass_spell_slots, ClassLevel};
///
/// let classes = [ClassLevel::primary("wizard", 5), ClassLevel::new("paladin", 6)];
/// let slots = multiclass_spell_slots(&classes).unwrap();
/// // Effective level 5 + 3 = 8.
/// assert_eq!(slots.max_per_level(), [4, 3, 3, 2, 0, 0, 0, 0, 0]);
/// ```
pub fn multiclass_spell_slots(classes: &[ClassLevel]) -> Result<SpellSlots, RulesError> {
    let mut combined = 0;
    for class in classes {
        let profile = caster_profile(&class.class_key)?;
        if profile.caster_type == CasterType::Pact {
            continue;
        }
        combined += effective_caster_level(class.level, profile.caster_type)?;
    }
    if combined > LEVEL_MAX {
        return Err(RulesError::OutOfRange {
            quantity: "combined caster level",
            value: combined,
            min: 0,
            max: LEVEL_MAX,
        });
    }
    Ok(SpellSlots::from_max(SPELL_SLOT_TABLE[combined as usize]))
}

/// Pact-magic slots: count and the single level they are all cast at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactMagic {
    /// Number of pact slots.
    pub slots: u8,
    /// The one level every pact slot is cast at.
    pub slot_level: u8,
}

/// Pact-magic progression for a warlock level.
///
/// Pact casters always have slots equal to their single maximum castable
/// level rather than a spread.
///
/// # Examples
///
/// ```rust
/// use sheet5e::pact_magic_slots;
///
/// let pact = pact_magic_slots(5).unwrap();
/// assert_eq!(pact.slots, 2);
/// assert_eq!(pact.slot_level, 3);
/// ```
pub fn pact_magic_slots(warlock_level: i32) -> Result<PactMagic, RulesError> {
    check_level(warlock_level, "class level")?;
    let (slots, slot_level) = match warlock_level {
        1 => (1, 1),
        2 => (2, 1),
        3..=4 => (2, 2),
        5..=6 => (2, 3),
        7..=8 => (2, 4),
        9..=10 => (2, 5),
        11..=16 => (3, 5),
        _ => (4, 5),
    };
    Ok(PactMagic { slots, slot_level })
}

/// Highest castable spell level for a class.
///
/// Table casters take the highest nonzero slot column; pact casters take
/// the pact table's slot level.
pub fn max_spell_level(class_level: i32, caster_type: CasterType) -> Result<u8, RulesError> {
    match caster_type {
        CasterType::Pact => Ok(pact_magic_slots(class_level)?.slot_level),
        _ => Ok(spell_slots(class_level, caster_type)?.highest_level()),
    }
}

/// Spell save DC: `8 + proficiency bonus + ability modifier + item bonus`.
///
/// # Examples
///
/// ```rust
/// use sheet5e::spell_save_dc;
///
/// // Level 5 (+3), INT 16 (+3).
/// assert_eq!(spell_save_dc(5, 16, 0).unwrap(), 14);
/// ```
pub fn spell_save_dc(level: i32, ability_score: i32, item_bonus: i32) -> Result<i32, RulesError> {
    Ok(8 + proficiency_bonus(level)? + ability_modifier(ability_score)? + item_bonus)
}

/// Spell attack bonus: `proficiency bonus + ability modifier + item bonus`.
pub fn spell_attack_bonus(
    level: i32,
    ability_score: i32,
    item_bonus: i32,
) -> Result<i32, RulesError> {
    Ok(proficiency_bonus(level)? + ability_modifier(ability_score)? + item_bonus)
}

/// Whether a class prepares spells from its list (as opposed to knowing
/// a fixed set).
pub fn uses_preparation(class_key: &str) -> Result<bool, RulesError> {
    caster_profile(class_key)?;
    Ok(matches!(class_key, "wizard" | "cleric" | "druid" | "paladin"))
}

/// Maximum prepared spells for a preparation caster.
///
/// `max(1, level + ability modifier)`; the paladin halves its level
/// before the formula. Known-spell classes and non-casters prepare
/// nothing and get 0.
///
/// # Examples
///
/// ```rust
/// use sheet5e::max_prepared_spells;
///
/// assert_eq!(max_prepared_spells("wizard", 5, 4).unwrap(), 9);
/// assert_eq!(max_prepared_spells("paladin", 5, 3).unwrap(), 5);
/// // The floor keeps a penalized caster at one prepared spell.
/// assert_eq!(max_prepared_spells("cleric", 1, -3).unwrap(), 1);
/// ```
pub fn max_prepared_spells(
    class_key: &str,
    class_level: i32,
    ability_mod: i32,
) -> Result<i32, RulesError> {
    check_level(class_level, "class level")?;
    match class_key {
        "wizard" | "cleric" | "druid" => Ok((class_level + ability_mod).max(1)),
        "paladin" => Ok((class_level / 2 + ability_mod).max(1)),
        _ => {
            caster_profile(class_key)?;
            Ok(0)
        }
    }
}

// Spells-known tables, indexed by class level (index 0 unused).
const SORCERER_SPELLS_KNOWN: [u8; 21] = [
    0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15,
];
const BARD_SPELLS_KNOWN: [u8; 21] = [
    0, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22,
];
const RANGER_SPELLS_KNOWN: [u8; 21] = [
    0, 0, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11,
];
const WARLOCK_SPELLS_KNOWN: [u8; 21] = [
    0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15,
];
const THIRD_CASTER_SPELLS_KNOWN: [u8; 21] = [
    0, 0, 0, 3, 4, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 11, 11, 12, 13,
];

/// Spells known for a known-spell class at a level.
///
/// Returns `None` for preparation casters and non-casters, which have no
/// known-spell limit.
///
/// # Examples
///
/// ```rust
/// use sheet5e::spells_known;
///
/// assert_eq!(spells_known("sorcerer", 5).unwrap(), Some(6));
/// assert_eq!(spells_known("wizard", 5).unwrap(), None);
/// ```
pub fn spells_known(class_key: &str, class_level: i32) -> Result<Option<u8>, RulesError> {
    check_level(class_level, "class level")?;
    let idx = class_level as usize;
    match class_key {
        "sorcerer" => Ok(Some(SORCERER_SPELLS_KNOWN[idx])),
        "bard" => Ok(Some(BARD_SPELLS_KNOWN[idx])),
        "ranger" => Ok(Some(RANGER_SPELLS_KNOWN[idx])),
        "warlock" => Ok(Some(WARLOCK_SPELLS_KNOWN[idx])),
        "eldritch knight" | "arcane trickster" => Ok(Some(THIRD_CASTER_SPELLS_KNOWN[idx])),
        _ => {
            caster_profile(class_key)?;
            Ok(None)
        }
    }
}

/// Cantrips known at a class level. Classes without cantrips get 0.
///
/// # Examples
///
/// ```rust
/// use sheet5e::cantrips_known;
///
/// assert_eq!(cantrips_known("wizard", 1).unwrap(), 3);
/// assert_eq!(cantrips_known("wizard", 10).unwrap(), 5);
/// assert_eq!(cantrips_known("paladin", 10).unwrap(), 0);
/// ```
pub fn cantrips_known(class_key: &str, class_level: i32) -> Result<u8, RulesError> {
    check_level(class_level, "class level")?;
    let known = match class_key {
        "wizard" | "cleric" | "druid" => match class_level {
            1..=3 => 3,
            4..=9 => 4,
            _ => 5,
        },
        "sorcerer" => match class_level {
            1..=3 => 4,
            4..=9 => 5,
            _ => 6,
        },
        "bard" | "warlock" => match class_level {
            1..=3 => 2,
            4..=9 => 3,
            _ => 4,
        },
        "eldritch knight" | "arcane trickster" => match class_level {
            1..=9 => 2,
            _ => 3,
        },
        _ => {
            caster_profile(class_key)?;
            0
        }
    };
    Ok(known)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caster_profile_table() {
        assert_eq!(
            caster_profile("cleric").unwrap().ability,
            Some(Ability::Wisdom)
        );
        assert_eq!(
            caster_profile("paladin").unwrap().caster_type,
            CasterType::Half
        );
        assert_eq!(
            caster_profile("arcane trickster").unwrap().caster_type,
            CasterType::Third
        );
        assert!(matches!(
            caster_profile("witch"),
            Err(RulesError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_effective_caster_level_divisors() {
        assert_eq!(effective_caster_level(5, CasterType::Half).unwrap(), 2);
        assert_eq!(effective_caster_level(6, CasterType::Half).unwrap(), 3);
        assert_eq!(effective_caster_level(8, CasterType::Third).unwrap(), 2);
        assert_eq!(effective_caster_level(9, CasterType::Third).unwrap(), 3);
        assert_eq!(effective_caster_level(9, CasterType::Pact).unwrap(), 9);
        assert!(effective_caster_level(0, CasterType::Full).is_err());
        assert!(effective_caster_level(21, CasterType::Full).is_err());
    }

    #[test]
    fn test_full_caster_slot_rows() {
        assert_eq!(
            spell_slots(1, CasterType::Full).unwrap().max_per_level(),
            [2, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            spell_slots(5, CasterType::Full).unwrap().max_per_level(),
            [4, 3, 2, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            spell_slots(20, CasterType::Full).unwrap().max_per_level(),
            [4, 3, 3, 3, 3, 2, 2, 1, 1]
        );
    }

    #[test]
    fn test_half_and_third_caster_slots() {
        // Paladin 2 has effective level 1.
        assert_eq!(
            spell_slots(2, CasterType::Half).unwrap().max_per_level(),
            [2, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        // Eldritch knight 3 has effective level 1.
        assert_eq!(
            spell_slots(3, CasterType::Third).unwrap().max_per_level(),
            [2, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        // Paladin 1 casts nothing yet.
        assert_eq!(
            spell_slots(1, CasterType::Half).unwrap().max_per_level(),
            [0; 9]
        );
    }

    #[test]
    fn test_pact_gets_no_table_slots() {
        assert_eq!(
            spell_slots(10, CasterType::Pact).unwrap().max_per_level(),
            [0; 9]
        );
    }

    #[test]
    fn test_multiclass_slots_wizard_paladin() {
        let classes = [
            ClassLevel::primary("wizard", 5),
            ClassLevel::new("paladin", 6),
        ];
        let slots = multiclass_spell_slots(&classes).unwrap();
        assert_eq!(slots.max_per_level(), [4, 3, 3, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_multiclass_excludes_pact_and_noncasters() {
        let classes = [
            ClassLevel::primary("sorcerer", 4),
            ClassLevel::new("warlock", 5),
            ClassLevel::new("fighter", 3),
        ];
        let slots = multiclass_spell_slots(&classes).unwrap();
        // Only the sorcerer's 4 effective levels count.
        assert_eq!(slots.max_per_level(), [4, 3, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pact_magic_progression() {
        assert_eq!(
            pact_magic_slots(1).unwrap(),
            PactMagic {
                slots: 1,
                slot_level: 1
            }
        );
        assert_eq!(
            pact_magic_slots(5).unwrap(),
            PactMagic {
                slots: 2,
                slot_level: 3
            }
        );
        assert_eq!(
            pact_magic_slots(17).unwrap(),
            PactMagic {
                slots: 4,
                slot_level: 5
            }
        );
        assert!(pact_magic_slots(0).is_err());
    }

    #[test]
    fn test_max_spell_level() {
        assert_eq!(max_spell_level(5, CasterType::Full).unwrap(), 3);
        assert_eq!(max_spell_level(5, CasterType::Half).unwrap(), 1);
        assert_eq!(max_spell_level(9, CasterType::Pact).unwrap(), 5);
        assert_eq!(max_spell_level(5, CasterType::NonCaster).unwrap(), 0);
    }

    #[test]
    fn test_save_dc_and_attack_bonus() {
        // Level 9 (+4), WIS 18 (+4), +1 focus.
        assert_eq!(spell_save_dc(9, 18, 1).unwrap(), 17);
        assert_eq!(spell_attack_bonus(9, 18, 1).unwrap(), 9);
    }

    #[test]
    fn test_preparation_classes() {
        assert!(uses_preparation("wizard").unwrap());
        assert!(uses_preparation("paladin").unwrap());
        assert!(!uses_preparation("sorcerer").unwrap());
        assert!(uses_preparation("homebrew").is_err());
    }

    #[test]
    fn test_max_prepared_paladin_halves_level() {
        assert_eq!(max_prepared_spells("cleric", 9, 4).unwrap(), 13);
        assert_eq!(max_prepared_spells("paladin", 9, 4).unwrap(), 8);
        assert_eq!(max_prepared_spells("sorcerer", 9, 4).unwrap(), 0);
    }

    #[test]
    fn test_spells_known_tables() {
        assert_eq!(spells_known("sorcerer", 1).unwrap(), Some(2));
        assert_eq!(spells_known("bard", 10).unwrap(), Some(14));
        assert_eq!(spells_known("ranger", 1).unwrap(), Some(0));
        assert_eq!(spells_known("warlock", 20).unwrap(), Some(15));
        assert_eq!(spells_known("eldritch knight", 3).unwrap(), Some(3));
        assert_eq!(spells_known("cleric", 10).unwrap(), None);
        assert!(spells_known("witch", 5).is_err());
    }

    #[test]
    fn test_cantrips_known_progression() {
        assert_eq!(cantrips_known("sorcerer", 1).unwrap(), 4);
        assert_eq!(cantrips_known("sorcerer", 4).unwrap(), 5);
        assert_eq!(cantrips_known("sorcerer", 10).unwrap(), 6);
        assert_eq!(cantrips_known("fighter", 10).unwrap(), 0);
    }

    #[test]
    fn test_use_slot_decrements_until_empty() {
        let slots = spell_slots(3, CasterType::Full).unwrap();
        let slots = slots.use_slot(2).unwrap();
        let slots = slots.use_slot(2).unwrap();
        assert_eq!(slots.get(2).unwrap().used, 2);
        assert_eq!(
            slots.use_slot(2).unwrap_err(),
            RulesError::NoSlotAvailable(2)
        );
    }

    #[test]
    fn test_use_slot_level_domain() {
        let slots = SpellSlots::default();
        assert!(slots.use_slot(0).is_err());
        assert!(slots.use_slot(10).is_err());
    }

    #[test]
    fn test_restore_all_idempotent() {
        let slots = spell_slots(9, CasterType::Full).unwrap();
        let spent = slots.use_slot(1).unwrap().use_slot(5).unwrap();
        let once = spent.restore_all();
        let twice = once.restore_all();
        assert_eq!(once, twice);
        assert_eq!(once.get(1).unwrap().used, 0);
        assert_eq!(once.get(5).unwrap().used, 0);
    }

    #[test]
    fn test_use_then_restore_round_trip() {
        let original = spell_slots(7, CasterType::Full).unwrap();
        let restored = original.use_slot(4).unwrap().restore_all();
        assert_eq!(restored, original);
    }
}
