//! Spellcasting example: slot progression, multiclassing, and pact magic
//!
//! This example demonstrates:
//! - Single-class and multiclass slot calculation
//! - Warlock pact magic alongside shared slots
//! - Save DCs, prepared spells, and slot bookkeeping

use sheet5e::*;

fn main() -> Result<(), RulesError> {
    println!("=== Spellcasting Demo ===\n");

    // ===== Single-Class Wizard =====
    println!("1. Wizard 5\n");

    let profile = caster_profile("wizard")?;
    let mut slots = spell_slots(5, profile.caster_type)?;
    println!("  Slots: {:?}", slots.max_per_level());
    println!("  Save DC: {}", spell_save_dc(5, 16, 0)?);
    println!("  Prepared: {}", max_prepared_spells("wizard", 5, 3)?);
    println!("  Cantrips: {}", cantrips_known("wizard", 5)?);

    slots = slots.use_slot(3)?;
    slots = slots.use_slot(3)?;
    match slots.use_slot(3) {
        Err(RulesError::NoSlotAvailable(level)) => {
            println!("  Out of level-{} slots until a long rest", level)
        }
        _ => unreachable!(),
    }
    slots = slots.restore_all();
    println!("  After a long rest: {} used", slots.get(3).unwrap().used);

    // ===== Multiclass =====
    println!("\n2. Wizard 5 / Paladin 6\n");

    let classes = [
        ClassLevel::primary("wizard", 5),
        ClassLevel::new("paladin", 6),
    ];
    let combined = multiclass_spell_slots(&classes)?;
    println!("  Combined slots: {:?}", combined.max_per_level());
    println!("  Highest slot level: {}", combined.highest_level());

    // ===== Pact Magic =====
    println!("\n3. Warlock 5\n");

    let pact = pact_magic_slots(5)?;
    println!("  {} slots, all cast at level {}", pact.slots, pact.slot_level);
    println!("  Spells known: {:?}", spells_known("warlock", 5)?);

    Ok(())
}
