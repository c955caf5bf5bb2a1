//! Persistence for combat state.
//!
//! The tracker calls a [`CombatSink`] after every change. `None` means the
//! combat has ended and any saved copy should be dropped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Combat;
use crate::error::{MechError, MechResult};

/// Receives the combat state after each tracker mutation.
pub trait CombatSink {
    /// Persist the current state, or forget it when `combat` is `None`.
    fn save(&mut self, combat: Option<&Combat>) -> MechResult<()>;
}

impl<F> CombatSink for F
where
    F: FnMut(Option<&Combat>) -> MechResult<()>,
{
    fn save(&mut self, combat: Option<&Combat>) -> MechResult<()> {
        self(combat)
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CombatSink for NullSink {
    fn save(&mut self, _combat: Option<&Combat>) -> MechResult<()> {
        Ok(())
    }
}

/// Writes the combat as pretty-printed JSON to a single file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// A sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> MechError {
        MechError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CombatSink for JsonFileSink {
    fn save(&mut self, combat: Option<&Combat>) -> MechResult<()> {
        match combat {
            Some(combat) => {
                let json = serde_json::to_string_pretty(combat)?;
                std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
            }
            None => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(self.io_error(e)),
                _ => Ok(()),
            },
        }
    }
}

/// Restore a combat saved by [`JsonFileSink`].
///
/// A missing file means no combat. An unreadable or corrupt file is logged
/// and also treated as no combat.
pub fn load_combat(path: &Path) -> Option<Combat> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read saved combat");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(combat) => Some(combat),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse saved combat");
            None
        }
    }
}
