//! CLI frontend for the Starkeeper GM toolkit.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::combat::CombatCommand;
use commands::encounter::EncounterCommand;

#[derive(Parser)]
#[command(
    name = "sk",
    about = "Starkeeper: encounter math and combat tracking for SF2e/PF2e",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v for debug, -vv for trace). RUST_LOG also works.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an encounter file and report its difficulty
    Xp {
        /// Encounter JSON file
        file: PathBuf,

        /// Party level (overrides the encounter and --party)
        #[arg(long, allow_negative_numbers = true)]
        party_level: Option<i32>,

        /// Party size (overrides the encounter and --party)
        #[arg(long)]
        party_size: Option<u32>,

        /// Party JSON file; level and size are derived from its players
        #[arg(long)]
        party: Option<PathBuf>,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build an encounter file from catalog entries
    Encounter {
        /// Encounter JSON file
        #[arg(short, long, default_value = "encounter.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: EncounterCommand,
    },

    /// Show the XP budget of every difficulty tier
    Thresholds {
        /// Number of players
        #[arg(long, default_value = "4")]
        party_size: u32,
    },

    /// Look up the standard DC for a level
    Dc {
        /// Level (clamped to 0-20)
        #[arg(allow_negative_numbers = true)]
        level: i32,
    },

    /// XP for a starship scene threat
    StarshipXp {
        /// Threat level
        #[arg(allow_negative_numbers = true)]
        threat_level: i32,

        /// Scene level
        #[arg(allow_negative_numbers = true)]
        scene_level: i32,
    },

    /// Run the combat tracker against a saved state file
    Combat {
        /// Combat state file
        #[arg(short, long, default_value = "combat.json")]
        state: PathBuf,

        /// RNG seed for initiative rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Also roll initiative for players when rolling for everyone
        #[arg(long)]
        roll_players: bool,

        #[command(subcommand)]
        action: CombatCommand,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Xp {
            file,
            party_level,
            party_size,
            party,
            json,
        } => commands::xp::run(&file, party.as_deref(), party_level, party_size, json),
        Commands::Encounter { file, action } => commands::encounter::run(&file, action),
        Commands::Thresholds { party_size } => commands::rules::thresholds(party_size),
        Commands::Dc { level } => commands::rules::dc(level),
        Commands::StarshipXp {
            threat_level,
            scene_level,
        } => commands::rules::starship_xp(threat_level, scene_level),
        Commands::Combat {
            state,
            seed,
            roll_players,
            action,
        } => commands::combat::run(&state, seed, roll_players, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
