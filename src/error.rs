//! Error types for rule calculations.
//!
//! All fatal errors produced by the engine are represented by the
//! `RulesError` enum. Domain errors are never silently clamped; callers
//! validate user input before invoking the engine.

use thiserror::Error;

/// Errors that can occur during rule calculations.
///
/// # Examples
///
/// ```rust
/// use sheet5e::RulesError;
///
/// let err = RulesError::UnknownSkill("basket weaving".to_string());
/// println!("{}", err); // "unknown skill key: basket weaving"
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// A numeric input fell outside its documented domain.
    ///
    /// Carries the quantity name so a UI can point at the offending field.
    #[error("{quantity} {value} is outside the valid range {min}..={max}")]
    OutOfRange {
        quantity: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// A hit-point roll that cannot be produced by the given die.
    #[error("roll {roll} is impossible on a {die}")]
    InvalidRoll { roll: i32, die: &'static str },

    /// A skill key not present in the static skill table.
    ///
    /// A contract violation between the reference-data layer and the
    /// engine, not a user error.
    #[error("unknown skill key: {0}")]
    UnknownSkill(String),

    /// A class key not present in the static class tables.
    ///
    /// Like [`RulesError::UnknownSkill`], this signals a mismatch with the
    /// reference-data layer and is never silently defaulted.
    #[error("unknown class key: {0}")]
    UnknownClass(String),

    /// An attempt to spend a spell slot of a level with no slot remaining.
    #[error("no level-{0} spell slot available")]
    NoSlotAvailable(u8),

    /// An attempt to spend a hit die from an exhausted pool.
    #[error("no {0} hit dice remaining")]
    NoHitDiceRemaining(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RulesError::OutOfRange {
            quantity: "ability score",
            value: 31,
            min: 1,
            max: 30,
        };
        let display = err.to_string();
        assert!(display.contains("ability score"));
        assert!(display.contains("31"));
        assert!(display.contains("1..=30"));
    }

    #[test]
    fn test_lookup_error_display() {
        let err = RulesError::UnknownClass("bloodhunter".to_string());
        assert!(err.to_string().contains("bloodhunter"));
    }

    #[test]
    fn test_invalid_roll_display() {
        let err = RulesError::InvalidRoll { roll: 11, die: "d10" };
        let display = err.to_string();
        assert!(display.contains("11"));
        assert!(display.contains("d10"));
    }
}
