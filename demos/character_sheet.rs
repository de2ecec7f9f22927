//! Basic example: building a complete martial character sheet
//!
//! This example demonstrates:
//! - Point-buy score generation and species bonuses
//! - Derived combat statistics (AC, HP, initiative)
//! - Skills, saving throws, and passive perception
//! - Damage and death saves

use sheet5e::*;

fn main() -> Result<(), RulesError> {
    println!("=== Character Sheet Demo ===\n");

    // ===== Ability Scores =====
    println!("1. Ability Scores (Point Buy)\n");

    let base = AbilityValues::new([15, 13, 14, 8, 12, 10]);
    let buy = point_buy(&base);
    println!("  Cost: {} / {}", buy.cost, POINT_BUY_BUDGET);

    // Mountain-dwarf style: +2 STR, +2 CON.
    let species = apply_species_bonuses(
        &[
            SpeciesBonus {
                target: BonusTarget::Fixed(Ability::Strength),
                bonus: 2,
            },
            SpeciesBonus {
                target: BonusTarget::Fixed(Ability::Constitution),
                bonus: 2,
            },
        ],
        &[],
    );

    let set = calculate_ability_scores(
        &ScoreInputs {
            base,
            species: species.bonuses,
            ..Default::default()
        },
        true,
    )?;
    for ability in Ability::ALL {
        let score = set.get(ability);
        println!("  {}: {} ({:+})", ability, score.total, score.modifier);
    }

    // ===== Combat Statistics =====
    println!("\n2. Combat Statistics\n");

    let classes = [ClassLevel::primary("fighter", 5)];
    let level = total_level(&classes);
    let dex = set.get(Ability::Dexterity).total;
    let con = set.get(Ability::Constitution).total;

    let ac = armor_class(ArmorType::Heavy, 16, dex, true, 0, 0)?;
    println!("  AC (chain mail + shield): {}", ac);

    let hp_levels: Vec<HpLevel> = (1..=level)
        .map(|l| HpLevel {
            level: l,
            class_key: "fighter".to_string(),
            con_score: con,
            gain: HitPointGain::Fixed,
        })
        .collect();
    let hp = max_hp(&hp_levels, 0)?;
    println!("  Max HP: {}", hp);
    println!("  Initiative: {:+}", initiative(dex, 0)?);

    // ===== Skills and Saves =====
    println!("\n3. Skills and Saves\n");

    let totals = set.totals();
    let athletics = skill_modifier("athletics", &totals, ProficiencyRank::Proficient, level, false)?;
    println!("  Athletics: {:+}", athletics);

    let con_save = saving_throw_modifier(con, true, level)?;
    println!("  CON save: {:+}", con_save);

    let perception = passive_score(set.get(Ability::Wisdom).total, ProficiencyRank::None, level)?;
    println!("  Passive Perception: {}", perception);

    // ===== Going Down and Getting Up =====
    println!("\n4. Damage and Death Saves\n");

    let mut hit_points = HitPoints {
        current: hp,
        max: hp,
        temporary: 0,
    };
    hit_points = grant_temporary_hp(&hit_points, 5);

    let outcome = apply_damage(&hit_points, &DeathSaves::default(), hp + 5)?;
    println!(
        "  After {} damage: {} HP, {} temp",
        hp + 5,
        outcome.hit_points.current,
        outcome.hit_points.temporary
    );

    let roll = record_death_save(&outcome.death_saves, 20)?;
    println!("  Natural 20 on the death save: back up with {} HP", roll.hp_restored);

    Ok(())
}
