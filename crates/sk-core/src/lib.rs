//! Core types for Starkeeper: creatures, hazards, parties, and encounter rosters.
//!
//! This crate holds the catalog-facing data model shared by the rules engine
//! and the CLI. Everything here is plain data that round-trips through JSON;
//! the XP and turn-order logic lives in `sk-mechanics`.

/// Catalog of creatures and hazards loaded from JSON.
pub mod catalog;
/// Creature records and elite/weak adjustments.
pub mod creature;
/// Saved encounter rosters.
pub mod encounter;
/// Error types used throughout the crate.
pub mod error;
/// Hazard records and complexity.
pub mod hazard;
/// Player parties and derived party level/size.
pub mod party;

/// Re-export the catalog.
pub use catalog::Catalog;
/// Re-export creature types.
pub use creature::{Adjustment, Creature};
/// Re-export encounter roster types.
pub use encounter::{
    Encounter, EncounterCreature, EncounterHazard, export_encounters, import_encounters,
};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export hazard types.
pub use hazard::{Complexity, Hazard, HazardKind};
/// Re-export party types.
pub use party::{Party, PartyInfo, Player};
