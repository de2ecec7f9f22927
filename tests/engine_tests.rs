//! Integration tests for the ability, proficiency, and combat components,
//! exercising them together the way a character sheet would.

use sheet5e::*;

#[test]
fn test_point_buy_character_end_to_end() {
    // Build a dwarf fighter: point buy, +2 CON species bonus, then derive.
    let base = AbilityValues::new([15, 13, 14, 8, 12, 10]);
    let buy = point_buy(&base);
    assert!(buy.valid);
    assert_eq!(buy.cost, 9 + 5 + 7 + 0 + 4 + 2);

    let species = apply_species_bonuses(
        &[SpeciesBonus {
            target: BonusTarget::Fixed(Ability::Constitution),
            bonus: 2,
        }],
        &[],
    );
    assert!(species.errors.is_empty());

    let set = calculate_ability_scores(
        &ScoreInputs {
            base,
            species: species.bonuses,
            ..Default::default()
        },
        true,
    )
    .unwrap();
    assert_eq!(set.get(Ability::Constitution).total, 16);
    assert_eq!(set.get(Ability::Constitution).modifier, 3);

    // Level 1 fighter in chain mail with a shield.
    let ac = armor_class(ArmorType::Heavy, 16, set.get(Ability::Dexterity).total, true, 0, 0)
        .unwrap();
    assert_eq!(ac, 18);

    let hp = max_hp(
        &[HpLevel {
            level: 1,
            class_key: "fighter".to_string(),
            con_score: set.get(Ability::Constitution).total,
            gain: HitPointGain::Fixed,
        }],
        0,
    )
    .unwrap();
    assert_eq!(hp, 13); // 10 + 3
}

#[test]
fn test_modifier_formula_whole_domain() {
    // modifier(s) == floor((s - 10) / 2) across the whole domain.
    for score in 1..=30 {
        let expected = ((score - 10) as f64 / 2.0).floor() as i32;
        assert_eq!(ability_modifier(score).unwrap(), expected);
    }
}

#[test]
fn test_multiclass_proficiency_uses_total_level() {
    let classes = [
        ClassLevel::primary("rogue", 6),
        ClassLevel::new("fighter", 3),
    ];
    let level = total_level(&classes);
    assert_eq!(level, 9);
    assert_eq!(proficiency_bonus(level).unwrap(), 4);
}

#[test]
fn test_skill_and_passive_agree() {
    let scores = AbilityValues::splat(10).with(Ability::Wisdom, 16);
    let perception =
        skill_modifier("perception", &scores, ProficiencyRank::Proficient, 5, false).unwrap();
    let passive = passive_score(16, ProficiencyRank::Proficient, 5).unwrap();
    assert_eq!(passive, 10 + perception);
}

#[test]
fn test_finesse_weapon_full_attack() {
    // Rogue with DEX 18, STR 10, rapier (1d8 finesse), level 5.
    let ability = attack_ability(false, true, 10, 18);
    assert_eq!(ability, Ability::Dexterity);
    assert_eq!(attack_bonus(18, true, 5, 0).unwrap(), 7);

    let damage = weapon_damage("1d8", 18, 0, false).unwrap();
    assert_eq!(damage.dice, "1d8");
    assert_eq!(damage.modifier, 4);
}

#[test]
fn test_dying_character_full_drama() {
    // Down at 0 HP, fails once, succeeds twice, takes a hit, then a
    // natural 20 brings them back up.
    let hp = HitPoints {
        current: 0,
        max: 30,
        temporary: 0,
    };
    let mut saves = DeathSaves::default();

    saves = record_death_save(&saves, 7).unwrap().saves;
    saves = record_death_save(&saves, 12).unwrap().saves;
    saves = record_death_save(&saves, 18).unwrap().saves;
    assert_eq!(saves.successes, 2);
    assert_eq!(saves.failures, 1);

    let hit = apply_damage(&hp, &saves, 4).unwrap();
    assert_eq!(hit.death_saves.failures, 2);

    let roll = record_death_save(&hit.death_saves, 20).unwrap();
    assert_eq!(roll.hp_restored, 1);
    let healed = apply_healing(&hp, &roll.saves, roll.hp_restored).unwrap();
    assert_eq!(healed.hit_points.current, 1);
    assert_eq!(healed.death_saves, DeathSaves::default());
}

#[test]
fn test_death_save_sequences() {
    // [15, 15, 15] from {0,0} stabilizes.
    let mut saves = DeathSaves::default();
    for roll in [15, 15, 15] {
        saves = record_death_save(&saves, roll).unwrap().saves;
    }
    assert!(saves.is_stable);
    assert!(!saves.is_dead);

    // [1] from {0,0} leaves two failures.
    let saves = record_death_save(&DeathSaves::default(), 1).unwrap().saves;
    assert_eq!(saves.failures, 2);

    // Three consecutive 9-or-below rolls kill.
    let mut saves = DeathSaves::default();
    for roll in [9, 5, 2] {
        saves = record_death_save(&saves, roll).unwrap().saves;
    }
    assert!(saves.is_dead);
}

#[test]
fn test_temp_hp_absorbs_before_current() {
    let hp = HitPoints {
        current: 20,
        max: 30,
        temporary: 5,
    };
    let outcome = apply_damage(&hp, &DeathSaves::default(), 8).unwrap();
    assert_eq!(outcome.hit_points.temporary, 0);
    assert_eq!(outcome.hit_points.current, 17);
}

#[test]
fn test_hit_dice_across_a_long_rest() {
    let classes = [
        ClassLevel::primary("barbarian", 3),
        ClassLevel::new("fighter", 2),
    ];
    let mut pool = hit_dice_pool(&classes).unwrap();
    pool = pool.spend(HitDie::D12).unwrap();
    pool = pool.spend(HitDie::D12).unwrap();
    pool = pool.spend(HitDie::D10).unwrap();
    assert_eq!(pool.get(HitDie::D12).unwrap().remaining, 1);
    assert_eq!(pool.get(HitDie::D10).unwrap().remaining, 1);

    let rested = pool.recover_long_rest();
    // d12: 1 + ceil(3/2) = 3 (capped at 3); d10: 1 + 1 = 2.
    assert_eq!(rested.get(HitDie::D12).unwrap().remaining, 3);
    assert_eq!(rested.get(HitDie::D10).unwrap().remaining, 2);
}

#[test]
fn test_unknown_keys_fail_loudly_everywhere() {
    assert!(matches!(
        skill_ability("gunsmithing"),
        Err(RulesError::UnknownSkill(_))
    ));
    assert!(matches!(
        class_hit_die("mystic"),
        Err(RulesError::UnknownClass(_))
    ));
    assert!(matches!(
        hit_dice_pool(&[ClassLevel::primary("mystic", 3)]),
        Err(RulesError::UnknownClass(_))
    ));
}

#[test]
fn test_domain_errors_never_clamp() {
    assert!(ability_modifier(0).is_err());
    assert!(proficiency_bonus(21).is_err());
    assert!(level_hp(2, HitDie::D6, 10, HitPointGain::Rolled(7)).is_err());
    assert!(record_death_save(&DeathSaves::default(), 0).is_err());
    assert!(apply_damage(
        &HitPoints::default(),
        &DeathSaves::default(),
        -1
    )
    .is_err());
}

#[test]
fn test_value_types_serde_round_trip() {
    let hp = HitPoints {
        current: 12,
        max: 30,
        temporary: 4,
    };
    let json = serde_json::to_string(&hp).unwrap();
    let back: HitPoints = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hp);

    let saves = DeathSaves {
        successes: 1,
        failures: 2,
        is_stable: false,
        is_dead: false,
    };
    let json = serde_json::to_string(&saves).unwrap();
    let back: DeathSaves = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saves);

    let pool = hit_dice_pool(&[ClassLevel::primary("fighter", 4)]).unwrap();
    let json = serde_json::to_string(&pool).unwrap();
    let back: HitDicePool = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pool);
}

#[test]
fn test_speeds_adjust_independently() {
    let speeds = Speeds {
        walk: 30,
        fly: 0,
        swim: 15,
        climb: 0,
        burrow: 0,
    };
    let slowed = speeds
        .adjusted(MovementMode::Walk, -10)
        .adjusted(MovementMode::Swim, -20);
    assert_eq!(slowed.walk, 20);
    assert_eq!(slowed.swim, 0);
    assert_eq!(slowed.fly, 0);
}
