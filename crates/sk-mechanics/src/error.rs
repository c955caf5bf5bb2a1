//! Error types for the mechanics engine.
//!
//! The XP engine and the turn-order machine never fail; these errors come
//! from persistence and from resolving user-supplied combatant references.

use std::path::PathBuf;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// Reading or writing a saved combat failed.
    #[error("combat file {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A saved combat could not be encoded or decoded.
    #[error("combat JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No combatant matched a name or id.
    #[error("no combatant matching \"{0}\"")]
    UnknownCombatant(String),

    /// An operation needed a running combat.
    #[error("no combat in progress")]
    NoCombat,
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
