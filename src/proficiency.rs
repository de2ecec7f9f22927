//! Proficiency bonus, skill, saving-throw, and passive-score calculation.
//!
//! The proficiency bonus is derived from total character level (multiclass
//! characters sum their class levels first, see [`crate::class::total_level`]).
//! Skill keys are the lowercase strings used by the reference-data layer;
//! an unknown key fails loudly as a data-contract violation.

use crate::ability::{ability_modifier, Ability, AbilityValues};
use crate::error::RulesError;
use serde::{Deserialize, Serialize};

/// Lowest valid character level.
pub const LEVEL_MIN: i32 = 1;
/// Highest valid character level.
pub const LEVEL_MAX: i32 = 20;

/// How proficient a character is with a skill or tool.
///
/// The multiplier {0, 0.5, 1, 2} is applied to the proficiency bonus and
/// floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyRank {
    /// No training: multiplier 0.
    None,
    /// Half proficiency (bard-style "jack of all trades"): multiplier 0.5, floored.
    Half,
    /// Full proficiency: multiplier 1.
    Proficient,
    /// Expertise: multiplier 2.
    Expertise,
}

impl ProficiencyRank {
    /// Apply this rank's multiplier to a proficiency bonus, flooring the
    /// half-rank result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sheet5e::ProficiencyRank;
    ///
    /// assert_eq!(ProficiencyRank::None.applied_to(3), 0);
    /// assert_eq!(ProficiencyRank::Half.applied_to(3), 1);
    /// assert_eq!(ProficiencyRank::Proficient.applied_to(3), 3);
    /// assert_eq!(ProficiencyRank::Expertise.applied_to(3), 6);
    /// ```
    pub fn applied_to(self, bonus: i32) -> i32 {
        match self {
            ProficiencyRank::None => 0,
            ProficiencyRank::Half => bonus / 2,
            ProficiencyRank::Proficient => bonus,
            ProficiencyRank::Expertise => bonus * 2,
        }
    }
}

/// Proficiency bonus for a total character level.
///
/// `floor((level - 1) / 4) + 2`, defined for levels 1–20 only.
///
/// # Examples
///
/// ```rust
/// use sheet5e::proficiency_bonus;
///
/// assert_eq!(proficiency_bonus(1).unwrap(), 2);
/// assert_eq!(proficiency_bonus(5).unwrap(), 3);
/// assert_eq!(proficiency_bonus(20).unwrap(), 6);
/// assert!(proficiency_bonus(0).is_err());
/// assert!(proficiency_bonus(21).is_err());
/// ```
pub fn proficiency_bonus(level: i32) -> Result<i32, RulesError> {
    if !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        return Err(RulesError::OutOfRange {
            quantity: "character level",
            value: level,
            min: LEVEL_MIN,
            max: LEVEL_MAX,
        });
    }
    Ok((level - 1) / 4 + 2)
}

/// Governing ability for a skill key.
///
/// The 18-skill table is fixed; an unknown key indicates a mismatch
/// between the engine and the reference-data layer and is an error, not
/// a silent default.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{skill_ability, Ability};
///
/// assert_eq!(skill_ability("athletics").unwrap(), Ability::Strength);
/// assert_eq!(skill_ability("sleight of hand").unwrap(), Ability::Dexterity);
/// assert!(skill_ability("lockpicking").is_err());
/// ```
pub fn skill_ability(skill: &str) -> Result<Ability, RulesError> {
    match skill {
        "athletics" => Ok(Ability::Strength),
        "acrobatics" | "sleight of hand" | "stealth" => Ok(Ability::Dexterity),
        "arcana" | "history" | "investigation" | "nature" | "religion" => Ok(Ability::Intelligence),
        "animal handling" | "insight" | "medicine" | "perception" | "survival" => {
            Ok(Ability::Wisdom)
        }
        "deception" | "intimidation" | "performance" | "persuasion" => Ok(Ability::Charisma),
        other => Err(RulesError::UnknownSkill(other.to_string())),
    }
}

/// Modifier for a skill check.
///
/// Ability modifier of the skill's governing ability plus the rank-applied
/// proficiency bonus. When `jack_of_all_trades` is set (derived externally
/// from a class feature), a rank of `None` is treated as `Half`.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{skill_modifier, AbilityValues, ProficiencyRank};
///
/// let scores = AbilityValues::new([10, 16, 12, 10, 14, 8]);
/// // DEX 16 (+3), proficient at level 5 (+3).
/// let stealth = skill_modifier("stealth", &scores, ProficiencyRank::Proficient, 5, false);
/// assert_eq!(stealth.unwrap(), 6);
/// ```
pub fn skill_modifier(
    skill: &str,
    scores: &AbilityValues,
    rank: ProficiencyRank,
    level: i32,
    jack_of_all_trades: bool,
) -> Result<i32, RulesError> {
    let ability = skill_ability(skill)?;
    let modifier = ability_modifier(scores.get(ability))?;
    let bonus = proficiency_bonus(level)?;
    let effective_rank = match rank {
        ProficiencyRank::None if jack_of_all_trades => ProficiencyRank::Half,
        other => other,
    };
    Ok(modifier + effective_rank.applied_to(bonus))
}

/// Modifier for a saving throw.
///
/// # Examples
///
/// ```rust
/// use sheet5e::saving_throw_modifier;
///
/// // CON 14 (+2), proficient at level 9 (+4).
/// assert_eq!(saving_throw_modifier(14, true, 9).unwrap(), 6);
/// assert_eq!(saving_throw_modifier(14, false, 9).unwrap(), 2);
/// ```
pub fn saving_throw_modifier(
    score: i32,
    is_proficient: bool,
    level: i32,
) -> Result<i32, RulesError> {
    let modifier = ability_modifier(score)?;
    let bonus = proficiency_bonus(level)?;
    Ok(modifier + if is_proficient { bonus } else { 0 })
}

/// Passive score for a wisdom-based sense (passive Perception, Insight).
///
/// `10 + wisdom modifier + rank-applied proficiency bonus`.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{passive_score, ProficiencyRank};
///
/// // WIS 16 (+3), proficient at level 5 (+3).
/// assert_eq!(passive_score(16, ProficiencyRank::Proficient, 5).unwrap(), 16);
/// ```
pub fn passive_score(
    wisdom_score: i32,
    rank: ProficiencyRank,
    level: i32,
) -> Result<i32, RulesError> {
    let modifier = ability_modifier(wisdom_score)?;
    let bonus = proficiency_bonus(level)?;
    Ok(10 + modifier + rank.applied_to(bonus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_bonus_breakpoints() {
        assert_eq!(proficiency_bonus(4).unwrap(), 2);
        assert_eq!(proficiency_bonus(5).unwrap(), 3);
        assert_eq!(proficiency_bonus(8).unwrap(), 3);
        assert_eq!(proficiency_bonus(9).unwrap(), 4);
        assert_eq!(proficiency_bonus(13).unwrap(), 5);
        assert_eq!(proficiency_bonus(17).unwrap(), 6);
    }

    #[test]
    fn test_proficiency_bonus_range_and_monotonic() {
        let mut last = 0;
        for level in 1..=20 {
            let bonus = proficiency_bonus(level).unwrap();
            assert!((2..=6).contains(&bonus));
            assert!(bonus >= last);
            last = bonus;
        }
    }

    #[test]
    fn test_proficiency_bonus_domain() {
        assert!(proficiency_bonus(0).is_err());
        assert!(proficiency_bonus(21).is_err());
        assert!(proficiency_bonus(-3).is_err());
    }

    #[test]
    fn test_rank_multipliers_floored() {
        // Odd bonus exercises the floor on the half rank.
        assert_eq!(ProficiencyRank::Half.applied_to(5), 2);
        assert_eq!(ProficiencyRank::Expertise.applied_to(5), 10);
    }

    #[test]
    fn test_skill_table_covers_all_abilities() {
        assert_eq!(skill_ability("perception").unwrap(), Ability::Wisdom);
        assert_eq!(skill_ability("persuasion").unwrap(), Ability::Charisma);
        assert_eq!(skill_ability("history").unwrap(), Ability::Intelligence);
        assert_eq!(skill_ability("athletics").unwrap(), Ability::Strength);
        assert_eq!(skill_ability("acrobatics").unwrap(), Ability::Dexterity);
    }

    #[test]
    fn test_unknown_skill_is_lookup_failure() {
        let err = skill_ability("underwater basket weaving").unwrap_err();
        assert!(matches!(err, RulesError::UnknownSkill(_)));
    }

    #[test]
    fn test_skill_modifier_with_expertise() {
        let scores = AbilityValues::splat(10).with(Ability::Dexterity, 18);
        // DEX +4, expertise at level 9 doubles the +4 bonus.
        let result = skill_modifier("stealth", &scores, ProficiencyRank::Expertise, 9, false);
        assert_eq!(result.unwrap(), 12);
    }

    #[test]
    fn test_jack_of_all_trades_upgrades_none() {
        let scores = AbilityValues::splat(10);
        let plain = skill_modifier("athletics", &scores, ProficiencyRank::None, 5, false).unwrap();
        let jack = skill_modifier("athletics", &scores, ProficiencyRank::None, 5, true).unwrap();
        assert_eq!(plain, 0);
        assert_eq!(jack, 1); // floor(3 * 0.5)
        // The flag never touches trained skills.
        let trained =
            skill_modifier("athletics", &scores, ProficiencyRank::Proficient, 5, true).unwrap();
        assert_eq!(trained, 3);
    }

    #[test]
    fn test_passive_score() {
        assert_eq!(passive_score(10, ProficiencyRank::None, 1).unwrap(), 10);
        assert_eq!(passive_score(16, ProficiencyRank::Expertise, 17).unwrap(), 25);
    }
}
