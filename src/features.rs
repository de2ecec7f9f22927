//! Feature aggregation and limited-use resource tracking.
//!
//! Features arrive from four places (class levels, species traits, the
//! background, and feats) and are flattened into one list, each tagged
//! with its originating source string. A feature without a `uses` record
//! is passive and always available; active features count down and come
//! back on the rest cadence they declare.

use serde::{Deserialize, Serialize};

/// When a limited-use feature's counter resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetCadence {
    /// Short or long rest.
    Short,
    /// Long rest only.
    Long,
    /// At dawn (magic items, some traits); recovered by a long rest here.
    Dawn,
    /// A narratively triggered reset outside this engine's scope.
    Other,
}

/// Use counters for a limited-use feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUses {
    /// Maximum uses between resets.
    pub max: u32,
    /// Uses expended since the last reset. Invariant: `used <= max`.
    pub used: u32,
    /// What brings the counter back.
    pub reset_on: ResetCadence,
}

/// One feature on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFeature {
    /// Reference-data identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Originating source tag ("class:fighter", "species", ...).
    pub source: String,
    /// Class level required before the feature applies, if any.
    pub level_required: Option<i32>,
    /// Limited-use counters; `None` means passive.
    pub uses: Option<FeatureUses>,
}

impl CharacterFeature {
    /// Whether the feature can currently be used.
    ///
    /// Passive features are always available; active ones need
    /// `used < max`.
    pub fn has_uses_remaining(&self) -> bool {
        match &self.uses {
            None => true,
            Some(uses) => uses.used < uses.max,
        }
    }
}

/// Features granted by one class, gated by level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFeatureSet {
    /// Reference-data class key, lowercase.
    pub class_key: String,
    /// Levels taken in this class.
    pub level: i32,
    /// Every feature the class can grant, regardless of level.
    pub features: Vec<CharacterFeature>,
}

/// Flatten every feature a character qualifies for into one tagged list.
///
/// Class features are included only when `level_required` is at most the
/// level held in that class (a missing requirement means level 1).
/// Species traits, the background feature, and feats follow, each tagged
/// with its source.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{aggregate_features, CharacterFeature, ClassFeatureSet};
///
/// let second_wind = CharacterFeature {
///     id: "second-wind".into(),
///     name: "Second Wind".into(),
///     source: String::new(),
///     level_required: Some(1),
///     uses: None,
/// };
/// let indomitable = CharacterFeature {
///     id: "indomitable".into(),
///     name: "Indomitable".into(),
///     source: String::new(),
///     level_required: Some(9),
///     uses: None,
/// };
/// let fighter = ClassFeatureSet {
///     class_key: "fighter".into(),
///     level: 5,
///     features: vec![second_wind, indomitable],
/// };
///
/// let all = aggregate_features(&[fighter], &[], None, &[]);
/// assert_eq!(all.len(), 1);
/// assert_eq!(all[0].id, "second-wind");
/// assert_eq!(all[0].source, "class:fighter");
/// ```
pub fn aggregate_features(
    classes: &[ClassFeatureSet],
    species_traits: &[CharacterFeature],
    background_feature: Option<&CharacterFeature>,
    feats: &[CharacterFeature],
) -> Vec<CharacterFeature> {
    let mut all = Vec::new();

    for class in classes {
        for feature in &class.features {
            if feature.level_required.unwrap_or(1) <= class.level {
                let mut tagged = feature.clone();
                tagged.source = format!("class:{}", class.class_key);
                all.push(tagged);
            }
        }
    }
    for feature in species_traits {
        let mut tagged = feature.clone();
        tagged.source = "species".to_string();
        all.push(tagged);
    }
    if let Some(feature) = background_feature {
        let mut tagged = feature.clone();
        tagged.source = "background".to_string();
        all.push(tagged);
    }
    for feature in feats {
        let mut tagged = feature.clone();
        tagged.source = "feat".to_string();
        all.push(tagged);
    }

    all
}

/// Spend one use of a feature.
///
/// Returns the updated feature, or `None` when the feature is passive or
/// already depleted; callers must check rather than assume success.
///
/// # Examples
///
/// ```rust
/// use sheet5e::{use_feature, CharacterFeature, FeatureUses, ResetCadence};
///
/// let mut feature = CharacterFeature {
///     id: "rage".into(),
///     name: "Rage".into(),
///     source: "class:barbarian".into(),
///     level_required: Some(1),
///     uses: Some(FeatureUses { max: 2, used: 1, reset_on: ResetCadence::Long }),
/// };
///
/// feature = use_feature(&feature).unwrap();
/// assert!(!feature.has_uses_remaining());
/// assert!(use_feature(&feature).is_none());
/// ```
pub fn use_feature(feature: &CharacterFeature) -> Option<CharacterFeature> {
    let uses = feature.uses.as_ref()?;
    if uses.used >= uses.max {
        return None;
    }
    let mut next = feature.clone();
    if let Some(uses) = next.uses.as_mut() {
        uses.used += 1;
    }
    Some(next)
}

/// Reset a feature's counter to zero unconditionally.
///
/// Passive features come back unchanged.
pub fn reset_feature_uses(feature: &CharacterFeature) -> CharacterFeature {
    let mut next = feature.clone();
    if let Some(uses) = next.uses.as_mut() {
        uses.used = 0;
    }
    next
}

/// Kinds of rest a character can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestKind {
    Short,
    Long,
}

impl RestKind {
    fn resets(self, cadence: ResetCadence) -> bool {
        match self {
            RestKind::Short => cadence == ResetCadence::Short,
            RestKind::Long => matches!(
                cadence,
                ResetCadence::Short | ResetCadence::Long | ResetCadence::Dawn
            ),
        }
    }
}

/// Resolve a rest over a feature list.
///
/// A short rest resets only `Short` features; a long rest resets `Short`,
/// `Long`, and `Dawn`. Features on the `Other` cadence are never touched
/// here; their reset is triggered narratively, outside the engine.
pub fn apply_rest(features: &[CharacterFeature], rest: RestKind) -> Vec<CharacterFeature> {
    features
        .iter()
        .map(|feature| match &feature.uses {
            Some(uses) if rest.resets(uses.reset_on) => reset_feature_uses(feature),
            _ => feature.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(id: &str, max: u32, used: u32, reset_on: ResetCadence) -> CharacterFeature {
        CharacterFeature {
            id: id.to_string(),
            name: id.to_string(),
            source: String::new(),
            level_required: None,
            uses: Some(FeatureUses { max, used, reset_on }),
        }
    }

    fn passive(id: &str, level_required: Option<i32>) -> CharacterFeature {
        CharacterFeature {
            id: id.to_string(),
            name: id.to_string(),
            source: String::new(),
            level_required,
            uses: None,
        }
    }

    #[test]
    fn test_aggregation_gates_by_class_level() {
        let rogue = ClassFeatureSet {
            class_key: "rogue".to_string(),
            level: 4,
            features: vec![
                passive("sneak-attack", Some(1)),
                passive("uncanny-dodge", Some(5)),
                passive("cunning-action", Some(2)),
            ],
        };
        let all = aggregate_features(&[rogue], &[], None, &[]);
        let ids: Vec<&str> = all.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["sneak-attack", "cunning-action"]);
    }

    #[test]
    fn test_aggregation_tags_sources() {
        let monk = ClassFeatureSet {
            class_key: "monk".to_string(),
            level: 2,
            features: vec![passive("ki", Some(2))],
        };
        let darkvision = passive("darkvision", None);
        let criminal_contact = passive("criminal-contact", None);
        let tough = passive("tough", None);

        let all = aggregate_features(
            &[monk],
            std::slice::from_ref(&darkvision),
            Some(&criminal_contact),
            std::slice::from_ref(&tough),
        );
        let sources: Vec<&str> = all.iter().map(|f| f.source.as_str()).collect();
        assert_eq!(sources, ["class:monk", "species", "background", "feat"]);
    }

    #[test]
    fn test_aggregation_missing_level_requirement_means_level_one() {
        let fighter = ClassFeatureSet {
            class_key: "fighter".to_string(),
            level: 1,
            features: vec![passive("fighting-style", None)],
        };
        let all = aggregate_features(&[fighter], &[], None, &[]);
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_passive_features_always_available() {
        assert!(passive("darkvision", None).has_uses_remaining());
    }

    #[test]
    fn test_use_feature_until_depleted() {
        let feature = active("rage", 2, 0, ResetCadence::Long);
        let feature = use_feature(&feature).unwrap();
        let feature = use_feature(&feature).unwrap();
        assert!(!feature.has_uses_remaining());
        assert!(use_feature(&feature).is_none());
    }

    #[test]
    fn test_use_feature_passive_is_noop() {
        assert!(use_feature(&passive("darkvision", None)).is_none());
    }

    #[test]
    fn test_reset_feature_uses_unconditional() {
        let feature = active("action-surge", 1, 1, ResetCadence::Short);
        let reset = reset_feature_uses(&feature);
        assert_eq!(reset.uses.unwrap().used, 0);
    }

    #[test]
    fn test_short_rest_resets_only_short() {
        let features = vec![
            active("action-surge", 1, 1, ResetCadence::Short),
            active("rage", 3, 2, ResetCadence::Long),
            active("item-charge", 3, 3, ResetCadence::Dawn),
        ];
        let rested = apply_rest(&features, RestKind::Short);
        assert_eq!(rested[0].uses.unwrap().used, 0);
        assert_eq!(rested[1].uses.unwrap().used, 2);
        assert_eq!(rested[2].uses.unwrap().used, 3);
    }

    #[test]
    fn test_long_rest_resets_short_long_dawn_never_other() {
        let features = vec![
            active("action-surge", 1, 1, ResetCadence::Short),
            active("rage", 3, 2, ResetCadence::Long),
            active("item-charge", 3, 3, ResetCadence::Dawn),
            active("wish-scar", 1, 1, ResetCadence::Other),
        ];
        let rested = apply_rest(&features, RestKind::Long);
        assert_eq!(rested[0].uses.unwrap().used, 0);
        assert_eq!(rested[1].uses.unwrap().used, 0);
        assert_eq!(rested[2].uses.unwrap().used, 0);
        assert_eq!(rested[3].uses.unwrap().used, 1);
    }
}
