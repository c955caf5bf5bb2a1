use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sk_core::catalog::load_json;
use sk_core::{Adjustment, Encounter, Party, PartyInfo};
use sk_mechanics::difficulty;
use sk_mechanics::encounter::{self, EncounterXp};

pub fn run(
    file: &Path,
    party_file: Option<&Path>,
    party_level: Option<i32>,
    party_size: Option<u32>,
    json: bool,
) -> Result<(), String> {
    let encounter: Encounter = load_json(file).map_err(|e| e.to_string())?;

    let mut party = encounter.party();
    if let Some(path) = party_file {
        let saved: Party = load_json(path).map_err(|e| e.to_string())?;
        if !saved.players.is_empty() {
            party = saved.info();
        }
    }
    if let Some(level) = party_level {
        party.level = level;
    }
    if let Some(size) = party_size {
        party.size = size;
    }
    if party.size == 0 {
        return Err("party size must be at least 1".into());
    }

    let result = encounter::evaluate(&encounter, Some(party));

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    print_report(&encounter, party, &result);
    Ok(())
}

pub fn print_report(encounter: &Encounter, party: PartyInfo, result: &EncounterXp) {
    let title = if encounter.name.is_empty() {
        "Encounter".to_string()
    } else {
        encounter.name.clone()
    };
    println!(
        "  {} {}",
        title.bold(),
        format!("(party level {}, {} players)", party.level, party.size).dimmed()
    );
    println!();

    if encounter.is_empty() {
        println!("  No creatures or hazards.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Slot", "Level", "Diff", "Count", "XP each", "XP"]);

        for line in &result.creatures {
            let name = match line.adjustment {
                Adjustment::Normal => line.name.clone(),
                adj => format!("{} ({adj})", line.name),
            };
            table.add_row(vec![
                name,
                line.effective_level.to_string(),
                format!("{:+}", line.level_diff),
                line.count.to_string(),
                line.xp_each.to_string(),
                line.xp_total.to_string(),
            ]);
        }
        for line in &result.hazards {
            table.add_row(vec![
                format!("{} [{} hazard]", line.name, line.complexity),
                String::new(),
                format!("{:+}", line.level_diff),
                line.count.to_string(),
                line.xp_each.to_string(),
                line.xp_total.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    println!(
        "  Total XP: {}  {}",
        result.total_xp.to_string().bold(),
        format!(
            "(creatures {}, hazards {})",
            result.creature_xp, result.hazard_xp
        )
        .dimmed()
    );
    println!("  Difficulty: {}", super::difficulty_label(result.difficulty));

    let budgets: Vec<String> = difficulty::thresholds(party.size)
        .iter()
        .map(|(tier, budget)| format!("{tier} {budget}"))
        .collect();
    println!("  Budgets: {}", budgets.join(" · ").dimmed());
}
