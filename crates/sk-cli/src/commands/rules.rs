use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sk_mechanics::difficulty;
use sk_mechanics::xp::{self, LevelDiff};

pub fn thresholds(party_size: u32) -> Result<(), String> {
    if party_size == 0 {
        return Err("party size must be at least 1".into());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Difficulty", "XP Budget"]);
    for (tier, budget) in difficulty::thresholds(party_size) {
        table.add_row(vec![
            super::difficulty_label(tier).to_string(),
            budget.to_string(),
        ]);
    }

    println!(
        "  {} {}",
        "XP budgets".bold(),
        format!("({party_size} players)").dimmed()
    );
    println!("{table}");
    Ok(())
}

pub fn dc(level: i32) -> Result<(), String> {
    println!("  Level {level}: DC {}", sk_mechanics::dc_for_level(level));
    Ok(())
}

pub fn starship_xp(threat_level: i32, scene_level: i32) -> Result<(), String> {
    let diff = LevelDiff::between(threat_level, scene_level);
    println!(
        "  Threat level {threat_level} in a level {scene_level} scene: {} XP {}",
        xp::starship_scene_xp(threat_level, scene_level),
        format!("(diff {diff})").dimmed()
    );
    Ok(())
}
