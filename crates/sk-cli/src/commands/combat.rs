use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sk_core::{Adjustment, Catalog};
use sk_mechanics::combat::load_combat;
use sk_mechanics::{CombatTracker, CombatantId, JsonFileSink, MechError, TrackerConfig};

#[derive(Subcommand)]
pub enum CombatCommand {
    /// Start a new combat, replacing any saved one
    Start {
        /// Combat name
        #[arg(default_value = "Combat")]
        name: String,
    },

    /// End the combat and delete the state file
    End,

    /// Add a player character
    AddPlayer {
        /// Character name
        name: String,

        /// Initiative
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        init: i32,

        /// Maximum hit points
        #[arg(long)]
        hp: i32,

        /// Armor class
        #[arg(long)]
        ac: i32,
    },

    /// Add a creature from a catalog
    AddCreature {
        /// Creature name in the catalog
        name: String,

        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Template: normal, elite or weak
        #[arg(long, default_value = "normal")]
        adjust: String,

        /// Name to show in the tracker
        #[arg(long = "as")]
        display_name: Option<String>,
    },

    /// Add a hazard from a catalog
    AddHazard {
        /// Hazard name in the catalog
        name: String,

        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Name to show in the tracker
        #[arg(long = "as")]
        display_name: Option<String>,
    },

    /// Remove a combatant
    Remove {
        /// Combatant name or id prefix
        who: String,
    },

    /// Set a combatant's initiative
    Init {
        /// Combatant name or id prefix
        who: String,

        /// New initiative
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// Roll initiative for one combatant, or for every non-player
    Roll {
        /// Combatant name or id prefix (default: everyone)
        who: Option<String>,
    },

    /// Advance to the next living combatant
    Next,

    /// Step back to the previous living combatant
    Prev,

    /// Jump to a position in the initiative order (0 = top)
    Turn {
        /// Position in the order
        index: usize,
    },

    /// Deal damage
    Damage {
        /// Combatant name or id prefix
        who: String,

        /// Damage amount
        amount: i32,
    },

    /// Heal hit points
    Heal {
        /// Combatant name or id prefix
        who: String,

        /// Healing amount
        amount: i32,
    },

    /// Set temporary hit points
    TempHp {
        /// Combatant name or id prefix
        who: String,

        /// Temporary hit points
        amount: i32,
    },

    /// Add a condition, or change its value
    ConditionAdd {
        /// Combatant name or id prefix
        who: String,

        /// Condition name
        name: String,

        /// Condition value (0 removes a valued condition)
        value: Option<i32>,
    },

    /// Remove a condition
    ConditionRemove {
        /// Combatant name or id prefix
        who: String,

        /// Condition name
        name: String,
    },

    /// Toggle a combatant's dead flag
    Kill {
        /// Combatant name or id prefix
        who: String,
    },

    /// Rename a combatant
    Rename {
        /// Combatant name or id prefix
        who: String,

        /// New name
        name: String,
    },

    /// Replace a combatant's notes
    Note {
        /// Combatant name or id prefix
        who: String,

        /// Note text
        text: String,
    },

    /// Show the initiative order
    Show,
}

type Tracker = CombatTracker<JsonFileSink>;

pub fn run(
    state: &Path,
    seed: Option<u64>,
    roll_players: bool,
    command: CombatCommand,
) -> Result<(), String> {
    let mut config = TrackerConfig::default().with_roll_players(roll_players);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let saved = load_combat(state);
    let mut tracker = CombatTracker::resume(saved, config, JsonFileSink::new(state));

    match command {
        CombatCommand::Start { name } => {
            tracker.start(name);
        }
        CombatCommand::End => {
            tracker.end();
            println!("  Combat ended.");
            return Ok(());
        }
        CombatCommand::AddPlayer { name, init, hp, ac } => {
            tracker.add_player(&name, init, hp, ac);
        }
        CombatCommand::AddCreature {
            name,
            catalog,
            adjust,
            display_name,
        } => {
            let adjustment = Adjustment::parse(&adjust)
                .ok_or_else(|| format!("unknown adjustment '{adjust}' (use normal, elite or weak)"))?;
            let catalog = Catalog::load(&catalog).map_err(|e| e.to_string())?;
            let creature = catalog.creature(&name).map_err(|e| e.to_string())?;
            tracker.add_creature(creature, adjustment, display_name.as_deref());
        }
        CombatCommand::AddHazard {
            name,
            catalog,
            display_name,
        } => {
            let catalog = Catalog::load(&catalog).map_err(|e| e.to_string())?;
            let hazard = catalog.hazard(&name).map_err(|e| e.to_string())?;
            tracker.add_hazard(hazard, display_name.as_deref());
        }
        CombatCommand::Remove { who } => {
            let id = resolve(&tracker, &who)?;
            if let Some(removed) = tracker.remove(id) {
                println!("  Removed {}.", removed.name);
            }
        }
        CombatCommand::Init { who, value } => {
            let id = resolve(&tracker, &who)?;
            tracker.set_initiative(id, value);
        }
        CombatCommand::Roll { who: Some(who) } => {
            let id = resolve(&tracker, &who)?;
            if let Some(check) = tracker.roll_initiative(id) {
                println!("  {who} rolls initiative: {check}");
            }
        }
        CombatCommand::Roll { who: None } => {
            require_combat(&tracker)?;
            tracker.roll_all_initiative();
        }
        CombatCommand::Next => {
            require_combat(&tracker)?;
            if tracker.next_turn() {
                println!("  {}", "New round!".bold());
            }
        }
        CombatCommand::Prev => {
            require_combat(&tracker)?;
            tracker.previous_turn();
        }
        CombatCommand::Turn { index } => {
            require_combat(&tracker)?;
            tracker.set_turn(index);
        }
        CombatCommand::Damage { who, amount } => {
            let id = resolve(&tracker, &who)?;
            tracker.apply_damage(id, amount);
        }
        CombatCommand::Heal { who, amount } => {
            let id = resolve(&tracker, &who)?;
            tracker.apply_healing(id, amount);
        }
        CombatCommand::TempHp { who, amount } => {
            let id = resolve(&tracker, &who)?;
            tracker.set_temp_hp(id, amount);
        }
        CombatCommand::ConditionAdd { who, name, value } => {
            let id = resolve(&tracker, &who)?;
            match value {
                Some(v) if v <= 0 => tracker.update_condition_value(id, &name, v),
                value => tracker.add_condition(id, &name, value),
            };
        }
        CombatCommand::ConditionRemove { who, name } => {
            let id = resolve(&tracker, &who)?;
            tracker.remove_condition(id, &name);
        }
        CombatCommand::Kill { who } => {
            let id = resolve(&tracker, &who)?;
            tracker.toggle_dead(id);
        }
        CombatCommand::Rename { who, name } => {
            let id = resolve(&tracker, &who)?;
            tracker.rename(id, &name);
        }
        CombatCommand::Note { who, text } => {
            let id = resolve(&tracker, &who)?;
            tracker.set_notes(id, &text);
        }
        CombatCommand::Show => {
            require_combat(&tracker)?;
        }
    }

    print_order(&tracker);
    Ok(())
}

fn require_combat(tracker: &Tracker) -> Result<(), String> {
    match tracker.combat() {
        Some(_) => Ok(()),
        None => Err(MechError::NoCombat.to_string()),
    }
}

fn resolve(tracker: &Tracker, who: &str) -> Result<CombatantId, String> {
    let combat = tracker.combat().ok_or_else(|| MechError::NoCombat.to_string())?;
    combat
        .resolve(who)
        .ok_or_else(|| MechError::UnknownCombatant(who.to_string()).to_string())
}

fn print_order(tracker: &Tracker) {
    let Some(combat) = tracker.combat() else {
        return;
    };

    println!(
        "  {} {}",
        combat.name.bold(),
        format!("(round {})", combat.round).dimmed()
    );

    if combat.is_empty() {
        println!("  No combatants.");
        return;
    }

    let current = combat.current().map(|c| c.id);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "Init", "HP", "AC", "Conditions", "Id"]);

    for c in combat.sorted() {
        let marker = if Some(c.id) == current { ">" } else { "" };
        let hp = if c.temp_hp > 0 {
            format!("{}/{} (+{})", c.current_hp, c.max_hp, c.temp_hp)
        } else {
            format!("{}/{}", c.current_hp, c.max_hp)
        };
        let name = if c.is_dead {
            format!("{} (dead)", c.name)
        } else if !c.is_active {
            format!("{} (inactive)", c.name)
        } else {
            c.name.clone()
        };
        let conditions: Vec<String> = c.conditions.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            marker.to_string(),
            name,
            c.initiative.to_string(),
            hp,
            c.ac.to_string(),
            conditions.join(", "),
            c.id.to_string(),
        ]);
    }
    println!("{table}");

    if let Some(active) = combat.current() {
        println!("  Current turn: {}", active.name.bold());
    }
}
