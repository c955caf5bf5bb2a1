use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::creature::Creature;
use crate::error::{CoreError, CoreResult};
use crate::hazard::Hazard;

/// Read and parse a JSON file into any deserializable type.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write any serializable value to a file as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> CoreResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// A searchable set of creature and hazard stat blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// All known creatures.
    #[serde(default)]
    pub creatures: Vec<Creature>,
    /// All known hazards.
    #[serde(default)]
    pub hazards: Vec<Hazard>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        load_json(path)
    }

    /// Find a creature by name (case-insensitive).
    pub fn find_creature(&self, name: &str) -> Option<&Creature> {
        self.creatures
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Find a hazard by name (case-insensitive).
    pub fn find_hazard(&self, name: &str) -> Option<&Hazard> {
        self.hazards
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`Catalog::find_creature`], but an error when missing.
    pub fn creature(&self, name: &str) -> CoreResult<&Creature> {
        self.find_creature(name).ok_or_else(|| CoreError::NotInCatalog {
            kind: "creature",
            name: name.to_string(),
        })
    }

    /// Like [`Catalog::find_hazard`], but an error when missing.
    pub fn hazard(&self, name: &str) -> CoreResult<&Hazard> {
        self.find_hazard(name).ok_or_else(|| CoreError::NotInCatalog {
            kind: "hazard",
            name: name.to_string(),
        })
    }

    /// Creatures whose level falls within `min..=max`.
    pub fn creatures_in_range(&self, min: i32, max: i32) -> Vec<&Creature> {
        self.creatures
            .iter()
            .filter(|c| (min..=max).contains(&c.level))
            .collect()
    }
}
