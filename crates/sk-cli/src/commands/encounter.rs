use std::path::{Path, PathBuf};

use clap::Subcommand;

use sk_core::catalog::{load_json, save_json};
use sk_core::{Adjustment, Catalog, Encounter};
use sk_mechanics::encounter;

#[derive(Subcommand)]
pub enum EncounterCommand {
    /// Create an empty encounter file, replacing any existing one
    New {
        /// Encounter name
        #[arg(default_value = "Encounter")]
        name: String,

        /// Party level
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        party_level: i32,

        /// Party size
        #[arg(long, default_value = "4")]
        party_size: u32,
    },

    /// Add one copy of a creature from a catalog
    AddCreature {
        /// Creature name in the catalog
        name: String,

        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Template: normal, elite or weak
        #[arg(long, default_value = "normal")]
        adjust: String,
    },

    /// Remove one copy of a creature
    RemoveCreature {
        /// Creature name in the encounter
        name: String,

        /// Template of the slot
        #[arg(long, default_value = "normal")]
        adjust: String,
    },

    /// Set how many copies of a creature appear (0 removes the slot)
    CreatureCount {
        /// Creature name in the encounter
        name: String,

        /// New count
        count: u32,

        /// Template of the slot
        #[arg(long, default_value = "normal")]
        adjust: String,
    },

    /// Move a creature slot to another template
    Template {
        /// Creature name in the encounter
        name: String,

        /// Current template
        from: String,

        /// New template
        to: String,
    },

    /// Add one copy of a hazard from a catalog
    AddHazard {
        /// Hazard name in the catalog
        name: String,

        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Remove one copy of a hazard
    RemoveHazard {
        /// Hazard name in the encounter
        name: String,
    },

    /// Set how many copies of a hazard appear (0 removes the slot)
    HazardCount {
        /// Hazard name in the encounter
        name: String,

        /// New count
        count: u32,
    },
}

fn adjustment(text: &str) -> Result<Adjustment, String> {
    Adjustment::parse(text)
        .ok_or_else(|| format!("unknown adjustment '{text}' (use normal, elite or weak)"))
}

fn creature_key(enc: &Encounter, name: &str, adjustment: Adjustment) -> Result<String, String> {
    enc.find_creature(name, adjustment)
        .map(|slot| slot.creature.key().to_string())
        .ok_or_else(|| format!("no {adjustment} creature named \"{name}\" in the encounter"))
}

fn hazard_key(enc: &Encounter, name: &str) -> Result<String, String> {
    enc.find_hazard(name)
        .map(|slot| slot.hazard.key().to_string())
        .ok_or_else(|| format!("no hazard named \"{name}\" in the encounter"))
}

pub fn run(file: &Path, command: EncounterCommand) -> Result<(), String> {
    let enc = match command {
        EncounterCommand::New {
            name,
            party_level,
            party_size,
        } => {
            if party_size == 0 {
                return Err("party size must be at least 1".into());
            }
            let mut enc = Encounter::new(name);
            enc.party_level = party_level;
            enc.party_size = party_size;
            enc
        }
        command => {
            let mut enc: Encounter = load_json(file).map_err(|e| e.to_string())?;
            edit(&mut enc, command)?;
            enc
        }
    };

    save_json(file, &enc).map_err(|e| e.to_string())?;
    tracing::debug!(path = %file.display(), "encounter saved");

    let party = enc.party();
    let result = encounter::evaluate(&enc, Some(party));
    super::xp::print_report(&enc, party, &result);
    Ok(())
}

fn edit(enc: &mut Encounter, command: EncounterCommand) -> Result<(), String> {
    match command {
        EncounterCommand::New { .. } => {}
        EncounterCommand::AddCreature {
            name,
            catalog,
            adjust,
        } => {
            let adjustment = adjustment(&adjust)?;
            let catalog = Catalog::load(&catalog).map_err(|e| e.to_string())?;
            let creature = catalog.creature(&name).map_err(|e| e.to_string())?;
            enc.add_creature(creature.clone(), adjustment);
        }
        EncounterCommand::RemoveCreature { name, adjust } => {
            let adjustment = adjustment(&adjust)?;
            let key = creature_key(enc, &name, adjustment)?;
            enc.remove_creature(&key, adjustment);
        }
        EncounterCommand::CreatureCount {
            name,
            count,
            adjust,
        } => {
            let adjustment = adjustment(&adjust)?;
            let key = creature_key(enc, &name, adjustment)?;
            enc.set_creature_count(&key, adjustment, count);
        }
        EncounterCommand::Template { name, from, to } => {
            let from = adjustment(&from)?;
            let to = adjustment(&to)?;
            let key = creature_key(enc, &name, from)?;
            enc.set_creature_adjustment(&key, from, to);
        }
        EncounterCommand::AddHazard { name, catalog } => {
            let catalog = Catalog::load(&catalog).map_err(|e| e.to_string())?;
            let hazard = catalog.hazard(&name).map_err(|e| e.to_string())?;
            enc.add_hazard(hazard.clone());
        }
        EncounterCommand::RemoveHazard { name } => {
            let key = hazard_key(enc, &name)?;
            enc.remove_hazard(&key);
        }
        EncounterCommand::HazardCount { name, count } => {
            let key = hazard_key(enc, &name)?;
            enc.set_hazard_count(&key, count);
        }
    }
    Ok(())
}
