//! Class-level value types and per-class static tables.
//!
//! Class keys are the lowercase strings used by the reference-data layer
//! ("wizard", "eldritch knight", ...). An unknown key is a contract
//! violation between that layer and the engine's static tables and fails
//! loudly rather than defaulting.

use crate::error::RulesError;
use serde::{Deserialize, Serialize};

/// One class entry in a (possibly multiclass) level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    /// Reference-data class key, lowercase.
    pub class_key: String,
    /// Levels taken in this class, 1–20.
    pub level: i32,
    /// Whether this is the character's first class.
    pub is_primary: bool,
}

impl ClassLevel {
    /// Convenience constructor for a non-primary class entry.
    pub fn new(class_key: impl Into<String>, level: i32) -> Self {
        Self {
            class_key: class_key.into(),
            level,
            is_primary: false,
        }
    }

    /// Convenience constructor for the primary class entry.
    pub fn primary(class_key: impl Into<String>, level: i32) -> Self {
        Self {
            class_key: class_key.into(),
            level,
            is_primary: true,
        }
    }
}

/// Total character level: the sum of all class levels.
///
/// This is the level fed into proficiency-bonus lookups for multiclass
/// characters.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{total_level, ClassLevel};
///
/// let classes = [ClassLevel::primary("fighter", 3), ClassLevel::new("wizard", 2)];
/// assert_eq!(total_level(&classes), 5);
/// ```
pub fn total_level(classes: &[ClassLevel]) -> i32 {
    classes.iter().map(|c| c.level).sum()
}

/// Hit die types used by the player classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitDie {
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    /// Maximum face value of the die.
    pub fn max_value(self) -> i32 {
        match self {
            HitDie::D6 => 6,
            HitDie::D8 => 8,
            HitDie::D10 => 10,
            HitDie::D12 => 12,
        }
    }

    /// Fixed average HP per level: `ceil(max / 2) + 1`.
    pub fn average(self) -> i32 {
        self.max_value() / 2 + 1
    }

    /// String form used by the reference data ("d6".."d12").
    pub fn as_str(self) -> &'static str {
        match self {
            HitDie::D6 => "d6",
            HitDie::D8 => "d8",
            HitDie::D10 => "d10",
            HitDie::D12 => "d12",
        }
    }
}

impl std::fmt::Display for HitDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Look up a class's hit die.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{class_hit_die, HitDie};
///
/// assert_eq!(class_hit_die("barbarian").unwrap(), HitDie::D12);
/// assert_eq!(class_hit_die("wizard").unwrap(), HitDie::D6);
/// assert!(class_hit_die("bloodhunter").is_err());
/// ```
pub fn class_hit_die(class_key: &str) -> Result<HitDie, RulesError> {
    match class_key {
        "barbarian" => Ok(HitDie::D12),
        "fighter" | "paladin" | "ranger" => Ok(HitDie::D10),
        "bard" | "cleric" | "druid" | "monk" | "rogue" | "warlock" => Ok(HitDie::D8),
        "sorcerer" | "wizard" => Ok(HitDie::D6),
        other => Err(RulesError::UnknownClass(other.to_string())),
    }
}
