//! Ability score calculation.
//!
//! Converts raw ability scores into modifiers, validates the three
//! supported score-generation methods (standard array, point buy, manual),
//! applies species bonuses with floating selections, and assembles the
//! final per-ability breakdown from its four components.
//!
//! Score generation and species-bonus application return best-effort
//! results carrying their own error lists, so a UI can present a
//! correctable list instead of aborting the whole computation. Plain
//! calculations (`ability_modifier`, `calculate_ability_scores`) are
//! fatal on domain errors.

use crate::error::RulesError;
use serde::{Deserialize, Serialize};

/// Lower bound of the raw calculator score domain.
pub const SCORE_MIN: i32 = 1;
/// Upper bound of the raw calculator score domain.
pub const SCORE_MAX: i32 = 30;
/// Lower bound of the player-character score domain.
pub const PC_SCORE_MIN: i32 = 3;
/// Upper bound of the player-character score domain (cap after all bonuses).
pub const PC_SCORE_MAX: i32 = 20;

/// The six abilities, in their conventional sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All six abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Three-letter sheet abbreviation ("STR", "DEX", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    fn index(self) -> usize {
        match self {
            Ability::Strength => 0,
            Ability::Dexterity => 1,
            Ability::Constitution => 2,
            Ability::Intelligence => 3,
            Ability::Wisdom => 4,
            Ability::Charisma => 5,
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// A fixed six-wide holder of per-ability integers.
///
/// Used for raw scores and for each bonus component. Construction order
/// follows [`Ability::ALL`].
///
/// # Examples
///
/// ```rust
/// use sheet5e::{Ability, AbilityValues};
///
/// let scores = AbilityValues::new([15, 14, 13, 12, 10, 8]);
/// assert_eq!(scores.get(Ability::Strength), 15);
/// assert_eq!(scores.get(Ability::Charisma), 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityValues([i32; 6]);

impl AbilityValues {
    /// All-zero values. The default for any omitted bonus component.
    pub const ZERO: AbilityValues = AbilityValues([0; 6]);

    /// Create from six values in [`Ability::ALL`] order.
    pub fn new(values: [i32; 6]) -> Self {
        Self(values)
    }

    /// Create with the same value for every ability.
    pub fn splat(value: i32) -> Self {
        Self([value; 6])
    }

    /// Get the value for one ability.
    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    /// Set the value for one ability.
    pub fn set(&mut self, ability: Ability, value: i32) {
        self.0[ability.index()] = value;
    }

    /// Return a copy with one value changed.
    pub fn with(mut self, ability: Ability, value: i32) -> Self {
        self.set(ability, value);
        self
    }

    /// Iterate `(ability, value)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.iter().map(move |&a| (a, self.get(a)))
    }
}

impl std::ops::Index<Ability> for AbilityValues {
    type Output = i32;

    fn index(&self, ability: Ability) -> &i32 {
        &self.0[ability.index()]
    }
}

/// Calculate the modifier for a raw ability score.
///
/// Domain is 1–30 inclusive; anything else is a fatal domain error, never
/// a clamp. Uses floor division, so a score of 7 yields -2.
///
/// # Examples
///
/// ```rust
/// use sheet5e::ability_modifier;
///
/// assert_eq!(ability_modifier(10).unwrap(), 0);
/// assert_eq!(ability_modifier(15).unwrap(), 2);
/// assert_eq!(ability_modifier(7).unwrap(), -2);
/// assert!(ability_modifier(0).is_err());
/// assert!(ability_modifier(31).is_err());
/// ```
pub fn ability_modifier(score: i32) -> Result<i32, RulesError> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(RulesError::OutOfRange {
            quantity: "ability score",
            value: score,
            min: SCORE_MIN,
            max: SCORE_MAX,
        });
    }
    Ok((score - 10).div_euclid(2))
}

/// The standard array of assignable scores.
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Point-buy budget shared by all six scores.
pub const POINT_BUY_BUDGET: i32 = 27;

/// Outcome of validating a set of generated scores.
///
/// Always carries the scores back so a UI can re-render them next to the
/// error, valid or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The scores as submitted.
    pub scores: AbilityValues,
    /// Whether the scores satisfy the generation method.
    pub valid: bool,
    /// Description of the first rule violated, when invalid.
    pub error: Option<String>,
}

impl GenerationResult {
    fn ok(scores: AbilityValues) -> Self {
        Self {
            scores,
            valid: true,
            error: None,
        }
    }

    fn invalid(scores: AbilityValues, error: impl Into<String>) -> Self {
        Self {
            scores,
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Validate a standard-array assignment.
///
/// The six assigned scores must be a permutation of exactly
/// {15, 14, 13, 12, 10, 8}.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{validate_standard_array, AbilityValues};
///
/// let ok = validate_standard_array(&AbilityValues::new([8, 15, 14, 10, 13, 12]));
/// assert!(ok.valid);
///
/// let bad = validate_standard_array(&AbilityValues::new([15, 15, 13, 12, 10, 8]));
/// assert!(!bad.valid);
/// assert!(bad.error.is_some());
/// ```
pub fn validate_standard_array(scores: &AbilityValues) -> GenerationResult {
    let mut assigned: Vec<i32> = Ability::ALL.iter().map(|&a| scores.get(a)).collect();
    let mut expected = STANDARD_ARRAY.to_vec();
    assigned.sort_unstable();
    expected.sort_unstable();
    if assigned == expected {
        GenerationResult::ok(*scores)
    } else {
        GenerationResult::invalid(
            *scores,
            format!(
                "scores must be a permutation of the standard array {:?}",
                STANDARD_ARRAY
            ),
        )
    }
}

/// Point-buy cost of a single score, for scores in 8–15.
fn point_buy_cost(score: i32) -> Option<i32> {
    match score {
        8 => Some(0),
        9 => Some(1),
        10 => Some(2),
        11 => Some(3),
        12 => Some(4),
        13 => Some(5),
        14 => Some(7),
        15 => Some(9),
        _ => None,
    }
}

/// Outcome of a point-buy validation.
///
/// Cost and remaining budget are reported even when the buy is invalid,
/// so a character builder can show how far over budget the player is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBuyResult {
    /// The scores as submitted.
    pub scores: AbilityValues,
    /// Whether every score is in 8–15 and the total cost is within budget.
    pub valid: bool,
    /// Total cost of all scores that have a defined cost.
    pub cost: i32,
    /// Budget remaining after `cost` (negative when over budget).
    pub remaining: i32,
    /// Description of the first rule violated, when invalid.
    pub error: Option<String>,
}

/// Validate a point-buy assignment against the 27-point budget.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{point_buy, AbilityValues, POINT_BUY_BUDGET};
///
/// let result = point_buy(&AbilityValues::new([15, 14, 13, 12, 10, 8]));
/// assert!(result.valid);
/// assert_eq!(result.cost, POINT_BUY_BUDGET);
/// assert_eq!(result.remaining, 0);
///
/// let over = point_buy(&AbilityValues::new([15, 15, 15, 12, 10, 8]));
/// assert!(!over.valid);
/// assert!(over.remaining < 0);
/// ```
pub fn point_buy(scores: &AbilityValues) -> PointBuyResult {
    let mut cost = 0;
    let mut error = None;
    for (ability, score) in scores.iter() {
        match point_buy_cost(score) {
            Some(c) => cost += c,
            None => {
                if error.is_none() {
                    error = Some(format!(
                        "{} score {} is outside the point-buy range 8-15",
                        ability, score
                    ));
                }
            }
        }
    }
    let remaining = POINT_BUY_BUDGET - cost;
    if error.is_none() && cost > POINT_BUY_BUDGET {
        error = Some(format!(
            "total cost {} exceeds the {}-point budget",
            cost, POINT_BUY_BUDGET
        ));
    }
    PointBuyResult {
        scores: *scores,
        valid: error.is_none(),
        cost,
        remaining,
        error,
    }
}

/// Validate manually entered or rolled scores.
///
/// Player characters must lie in 3–20; unrestricted entry allows 1–30.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{validate_manual_scores, AbilityValues};
///
/// let rolled = AbilityValues::new([18, 16, 14, 12, 9, 7]);
/// assert!(validate_manual_scores(&rolled, true).valid);
///
/// let monstrous = AbilityValues::new([25, 10, 10, 10, 10, 10]);
/// assert!(!validate_manual_scores(&monstrous, true).valid);
/// assert!(validate_manual_scores(&monstrous, false).valid);
/// ```
pub fn validate_manual_scores(scores: &AbilityValues, is_pc: bool) -> GenerationResult {
    let (min, max) = if is_pc {
        (PC_SCORE_MIN, PC_SCORE_MAX)
    } else {
        (SCORE_MIN, SCORE_MAX)
    };
    for (ability, score) in scores.iter() {
        if !(min..=max).contains(&score) {
            return GenerationResult::invalid(
                *scores,
                format!(
                    "{} score {} is outside the valid range {}-{}",
                    ability, score, min, max
                ),
            );
        }
    }
    GenerationResult::ok(*scores)
}

/// Target of a species ability bonus.
///
/// Floating targets consume the caller's selection list in entry order:
/// one pick for `AnyOne`, two distinct picks for `AnyTwo`, three for
/// `AnyThree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTarget {
    /// A fixed ability named by the species entry.
    Fixed(Ability),
    /// One ability of the player's choice.
    AnyOne,
    /// Two distinct abilities of the player's choice.
    AnyTwo,
    /// Three distinct abilities of the player's choice.
    AnyThree,
}

impl BonusTarget {
    fn selections_needed(self) -> usize {
        match self {
            BonusTarget::Fixed(_) => 0,
            BonusTarget::AnyOne => 1,
            BonusTarget::AnyTwo => 2,
            BonusTarget::AnyThree => 3,
        }
    }
}

/// One species ability-bonus entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesBonus {
    /// Which ability (or floating category) receives the bonus.
    pub target: BonusTarget,
    /// The bonus amount.
    pub bonus: i32,
}

/// Best-effort outcome of species-bonus application.
///
/// Errors are accumulated rather than fatal: a duplicate assignment drops
/// the duplicate (never double-applies), and a missing floating selection
/// skips that pick, each leaving a message behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesBonusResult {
    /// Per-ability bonus granted by this application.
    pub bonuses: AbilityValues,
    /// Problems encountered, in encounter order. Empty on clean application.
    pub errors: Vec<String>,
}

/// Apply a species bonus list, drawing floating picks from `selections`.
///
/// Each ability may receive at most one bonus from this process.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{apply_species_bonuses, Ability, BonusTarget, SpeciesBonus};
///
/// // A half-elf style species: +2 CHA, +1 to two others of your choice.
/// let entries = [
///     SpeciesBonus { target: BonusTarget::Fixed(Ability::Charisma), bonus: 2 },
///     SpeciesBonus { target: BonusTarget::AnyTwo, bonus: 1 },
/// ];
/// let picks = [Ability::Dexterity, Ability::Constitution];
///
/// let result = apply_species_bonuses(&entries, &picks);
/// assert!(result.errors.is_empty());
/// assert_eq!(result.bonuses.get(Ability::Charisma), 2);
/// assert_eq!(result.bonuses.get(Ability::Dexterity), 1);
/// assert_eq!(result.bonuses.get(Ability::Constitution), 1);
/// ```
pub fn apply_species_bonuses(
    entries: &[SpeciesBonus],
    selections: &[Ability],
) -> SpeciesBonusResult {
    let mut bonuses = AbilityValues::ZERO;
    let mut granted = [false; 6];
    let mut errors = Vec::new();
    let mut picks = selections.iter().copied();

    let grant = |ability: Ability,
                     bonus: i32,
                     bonuses: &mut AbilityValues,
                     granted: &mut [bool; 6],
                     errors: &mut Vec<String>| {
        let idx = Ability::ALL.iter().position(|&a| a == ability).unwrap_or(0);
        if granted[idx] {
            errors.push(format!(
                "{} already has a species bonus; duplicate +{} dropped",
                ability, bonus
            ));
        } else {
            granted[idx] = true;
            bonuses.set(ability, bonus);
        }
    };

    for entry in entries {
        match entry.target {
            BonusTarget::Fixed(ability) => {
                grant(ability, entry.bonus, &mut bonuses, &mut granted, &mut errors);
            }
            floating => {
                for _ in 0..floating.selections_needed() {
                    match picks.next() {
                        Some(ability) => {
                            grant(ability, entry.bonus, &mut bonuses, &mut granted, &mut errors);
                        }
                        None => {
                            errors.push(format!(
                                "missing selection for floating +{} species bonus",
                                entry.bonus
                            ));
                        }
                    }
                }
            }
        }
    }

    SpeciesBonusResult { bonuses, errors }
}

/// The four bonus components feeding one character's scores.
///
/// Any component left at its default contributes zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Generated or entered base scores.
    pub base: AbilityValues,
    /// Species bonuses (see [`apply_species_bonuses`]).
    pub species: AbilityValues,
    /// Ability score improvements taken at class levels.
    pub asi: AbilityValues,
    /// Everything else: feats, magic items, manual adjustments.
    pub other: AbilityValues,
}

/// One ability's full breakdown: the four components, their total, and
/// the modifier derived from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub base: i32,
    pub species_bonus: i32,
    pub asi_bonus: i32,
    pub other_bonus: i32,
    /// Sum of the four components, capped at 20 for player characters.
    pub total: i32,
    /// `floor((total - 10) / 2)`.
    pub modifier: i32,
}

/// The assembled six-ability breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScoreSet {
    scores: [AbilityScore; 6],
}

impl AbilityScoreSet {
    /// Get the breakdown for one ability.
    pub fn get(&self, ability: Ability) -> &AbilityScore {
        &self.scores[Ability::ALL.iter().position(|&a| a == ability).unwrap_or(0)]
    }

    /// Final totals, in sheet order.
    pub fn totals(&self) -> AbilityValues {
        let mut values = AbilityValues::ZERO;
        for (i, &ability) in Ability::ALL.iter().enumerate() {
            values.set(ability, self.scores[i].total);
        }
        values
    }

    /// Final modifiers, in sheet order.
    pub fn modifiers(&self) -> AbilityValues {
        let mut values = AbilityValues::ZERO;
        for (i, &ability) in Ability::ALL.iter().enumerate() {
            values.set(ability, self.scores[i].modifier);
        }
        values
    }
}

/// Assemble the final ability scores from their four components.
///
/// Sums base + species + ASI + other per ability and recomputes each
/// modifier. Player-character totals are capped at 20 after all bonuses;
/// a total outside the raw 1–30 domain is a fatal domain error.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{calculate_ability_scores, Ability, AbilityValues, ScoreInputs};
///
/// let inputs = ScoreInputs {
///     base: AbilityValues::new([15, 14, 13, 12, 10, 8]),
///     species: AbilityValues::ZERO.with(Ability::Strength, 2),
///     asi: AbilityValues::ZERO.with(Ability::Strength, 4),
///     ..Default::default()
/// };
///
/// let set = calculate_ability_scores(&inputs, true).unwrap();
/// // 15 + 2 + 4 = 21, capped to 20 for a player character.
/// assert_eq!(set.get(Ability::Strength).total, 20);
/// assert_eq!(set.get(Ability::Strength).modifier, 5);
/// ```
pub fn calculate_ability_scores(
    inputs: &ScoreInputs,
    is_pc: bool,
) -> Result<AbilityScoreSet, RulesError> {
    let mut scores = [AbilityScore {
        base: 0,
        species_bonus: 0,
        asi_bonus: 0,
        other_bonus: 0,
        total: 0,
        modifier: 0,
    }; 6];

    for (i, &ability) in Ability::ALL.iter().enumerate() {
        let base = inputs.base.get(ability);
        let species = inputs.species.get(ability);
        let asi = inputs.asi.get(ability);
        let other = inputs.other.get(ability);
        let mut total = base + species + asi + other;
        if is_pc {
            total = total.min(PC_SCORE_MAX);
        }
        let modifier = ability_modifier(total)?;
        scores[i] = AbilityScore {
            base,
            species_bonus: species,
            asi_bonus: asi,
            other_bonus: other,
            total,
            modifier,
        };
    }

    Ok(AbilityScoreSet { scores })
}
