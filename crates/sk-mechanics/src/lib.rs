//! Rules engine for Starkeeper.
//!
//! Provides the PF2e/SF2e encounter XP tables and difficulty budgets, the
//! encounter XP calculator, the DC-by-level table, elite/weak stat math,
//! initiative dice, and a combat tracker whose turn order skips dead
//! combatants and counts rounds.

pub mod adjust;
pub mod combat;
pub mod config;
pub mod dc;
pub mod dice;
pub mod difficulty;
pub mod encounter;
pub mod error;
pub mod xp;

pub use combat::{
    Combat, CombatSink, CombatTracker, Combatant, CombatantId, JsonFileSink, NullSink, Origin,
};
pub use config::TrackerConfig;
pub use dc::dc_for_level;
pub use difficulty::{Difficulty, adjusted_budget, difficulty_for};
pub use encounter::{CreatureLine, EncounterXp, HazardLine, compute_encounter_xp};
pub use error::{MechError, MechResult};
pub use xp::{LevelDiff, XpTable};
