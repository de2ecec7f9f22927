//! # sheet5e - Deterministic Fifth-Edition Character Rules Engine
//!
//! A rules engine for fifth-edition tabletop character sheets that turns
//! a character's raw attributes (ability scores, class levels, features,
//! spellcasting state) into derived, rule-correct statistics:
//!
//! - **Pure**: every function maps immutable inputs to a new output
//!   value; no I/O, no shared state, nothing to race on
//! - **Deterministic**: same snapshot, same derived stats
//! - **Table-driven**: slot progressions, point-buy costs, and class
//!   metadata live in const tables defined once
//! - **Loud on contract violations**: unknown skill or class keys fail
//!   with an error instead of defaulting
//!
//! ## Ownership
//!
//! The engine never stores a character. A caller (UI, persistence layer)
//! holds the snapshot, invokes the relevant functions on change, and
//! persists what needs writing back (spent slots, feature counters). The
//! engine only transforms copies; when and how results are saved is the
//! caller's business.
//!
//! ## Example
//!
//! ```rust
//! use sheet5e::*;
//!
//! // A 5th-level fighter with DEX 16 in half plate.
//! let ac = armor_class(ArmorType::Medium, 15, 16, true, 0, 0).unwrap();
//! assert_eq!(ac, 19); // 15 + min(+3, +2) + shield
//!
//! let prof = proficiency_bonus(5).unwrap();
//! assert_eq!(prof, 3);
//!
//! // Multiclass slots: wizard 5 / paladin 6 casts as an 8th-level caster.
//! let classes = [ClassLevel::primary("wizard", 5), ClassLevel::new("paladin", 6)];
//! let slots = multiclass_spell_slots(&classes).unwrap();
//! assert_eq!(slots.max_per_level(), [4, 3, 3, 2, 0, 0, 0, 0, 0]);
//! ```
//!
//! ## Modules
//!
//! - [`ability`] - Modifiers, score generation, species bonuses
//! - [`class`] - Class-level value types and hit-die table
//! - [`proficiency`] - Proficiency bonus, skills, saves, passive scores
//! - [`combat`] - AC, HP, attacks, death saves, damage, hit dice
//! - [`spellcasting`] - Slot progression, DCs, prepared/known limits
//! - [`features`] - Feature aggregation and limited-use tracking
//! - [`error`] - Error types

pub mod ability;
pub mod class;
pub mod combat;
pub mod error;
pub mod features;
pub mod proficiency;
pub mod spellcasting;

// Re-export main types for convenience
pub use error::RulesError;

pub use ability::{
    ability_modifier, apply_species_bonuses, calculate_ability_scores, point_buy,
    validate_manual_scores, validate_standard_array, Ability, AbilityScore, AbilityScoreSet,
    AbilityValues, BonusTarget, GenerationResult, PointBuyResult, ScoreInputs, SpeciesBonus,
    SpeciesBonusResult, PC_SCORE_MAX, PC_SCORE_MIN, POINT_BUY_BUDGET, SCORE_MAX, SCORE_MIN,
    STANDARD_ARRAY,
};

pub use class::{class_hit_die, total_level, ClassLevel, HitDie};

pub use proficiency::{
    passive_score, proficiency_bonus, saving_throw_modifier, skill_ability, skill_modifier,
    ProficiencyRank, LEVEL_MAX, LEVEL_MIN,
};

pub use combat::{
    apply_damage, apply_healing, armor_class, attack_ability, attack_bonus, grant_temporary_hp,
    hit_dice_pool, initiative, level_hp, max_hp, record_death_save, speed, unarmored_defense,
    weapon_damage, ArmorType, DamageOutcome, DeathSaveRoll, DeathSaves, HealOutcome, HitDiceEntry,
    HitDicePool, HitPointGain, HitPoints, HpLevel, MovementMode, Speeds, WeaponDamage,
    SHIELD_BONUS,
};

pub use spellcasting::{
    cantrips_known, caster_profile, effective_caster_level, max_prepared_spells, max_spell_level,
    multiclass_spell_slots, pact_magic_slots, spell_attack_bonus, spell_save_dc, spell_slots,
    spells_known, uses_preparation, CasterProfile, CasterType, PactMagic, SpellSlot, SpellSlots,
};

pub use features::{
    aggregate_features, apply_rest, reset_feature_uses, use_feature, CharacterFeature,
    ClassFeatureSet, FeatureUses, ResetCadence, RestKind,
};
