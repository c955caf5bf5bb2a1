use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::creature::{Adjustment, Creature};
use crate::error::CoreResult;
use crate::hazard::Hazard;
use crate::party::{DEFAULT_PARTY_SIZE, PartyInfo};

fn one() -> u32 {
    1
}

fn default_party_level() -> i32 {
    1
}

fn default_party_size() -> u32 {
    DEFAULT_PARTY_SIZE
}

/// A creature slot in an encounter: which creature, how many, and any template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterCreature {
    /// The creature stat block.
    pub creature: Creature,
    /// How many copies appear.
    #[serde(default = "one")]
    pub count: u32,
    /// Elite/weak template.
    #[serde(default)]
    pub adjustment: Adjustment,
    /// GM notes for this slot.
    #[serde(default)]
    pub notes: Option<String>,
}

impl EncounterCreature {
    /// A slot with `count` copies of an unadjusted creature.
    pub fn new(creature: Creature, count: u32) -> Self {
        Self {
            creature,
            count,
            adjustment: Adjustment::Normal,
            notes: None,
        }
    }

    /// Apply an elite/weak template to this slot.
    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = adjustment;
        self
    }
}

/// A hazard slot in an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterHazard {
    /// The hazard stat block.
    pub hazard: Hazard,
    /// How many copies appear.
    #[serde(default = "one")]
    pub count: u32,
    /// GM notes for this slot.
    #[serde(default)]
    pub notes: Option<String>,
}

impl EncounterHazard {
    /// A slot with `count` copies of a hazard.
    pub fn new(hazard: Hazard, count: u32) -> Self {
        Self {
            hazard,
            count,
            notes: None,
        }
    }
}

/// A saved encounter roster together with the party it was built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Identifier used to skip duplicates on import.
    #[serde(default)]
    pub id: String,
    /// Encounter name.
    #[serde(default)]
    pub name: String,
    /// Creature slots.
    #[serde(default)]
    pub creatures: Vec<EncounterCreature>,
    /// Hazard slots.
    #[serde(default)]
    pub hazards: Vec<EncounterHazard>,
    /// Party level the encounter was built for.
    #[serde(default = "default_party_level")]
    pub party_level: i32,
    /// Party size the encounter was built for.
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    /// Free-form GM notes.
    #[serde(default)]
    pub notes: String,
}

impl Encounter {
    /// Create an empty encounter for a default party.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            creatures: Vec::new(),
            hazards: Vec::new(),
            party_level: default_party_level(),
            party_size: default_party_size(),
            notes: String::new(),
        }
    }

    /// The party stored with the encounter.
    pub fn party(&self) -> PartyInfo {
        PartyInfo::new(self.party_level, self.party_size)
    }

    /// Returns true if the roster has no creatures and no hazards.
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty() && self.hazards.is_empty()
    }

    fn creature_index(&self, key: &str, adjustment: Adjustment) -> Option<usize> {
        self.creatures
            .iter()
            .position(|slot| slot.creature.key() == key && slot.adjustment == adjustment)
    }

    fn hazard_index(&self, key: &str) -> Option<usize> {
        self.hazards.iter().position(|slot| slot.hazard.key() == key)
    }

    /// The creature slot with this name (case-insensitive) and template.
    pub fn find_creature(&self, name: &str, adjustment: Adjustment) -> Option<&EncounterCreature> {
        self.creatures.iter().find(|slot| {
            slot.adjustment == adjustment && slot.creature.name.eq_ignore_ascii_case(name.trim())
        })
    }

    /// The hazard slot with this name (case-insensitive).
    pub fn find_hazard(&self, name: &str) -> Option<&EncounterHazard> {
        self.hazards
            .iter()
            .find(|slot| slot.hazard.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Add one copy of a creature. A slot holding the same creature with the
    /// same template gains a copy; otherwise a new slot is created.
    pub fn add_creature(&mut self, creature: Creature, adjustment: Adjustment) {
        match self.creature_index(creature.key(), adjustment) {
            Some(i) => self.creatures[i].count = self.creatures[i].count.saturating_add(1),
            None => self
                .creatures
                .push(EncounterCreature::new(creature, 1).with_adjustment(adjustment)),
        }
    }

    /// Remove one copy of a creature, dropping the slot when it was the last.
    /// Returns false if there is no such slot.
    pub fn remove_creature(&mut self, key: &str, adjustment: Adjustment) -> bool {
        let Some(i) = self.creature_index(key, adjustment) else {
            return false;
        };
        if self.creatures[i].count > 1 {
            self.creatures[i].count -= 1;
        } else {
            self.creatures.remove(i);
        }
        true
    }

    /// Set how many copies a creature slot holds. A count of 0 drops the slot.
    pub fn set_creature_count(&mut self, key: &str, adjustment: Adjustment, count: u32) -> bool {
        let Some(i) = self.creature_index(key, adjustment) else {
            return false;
        };
        if count == 0 {
            self.creatures.remove(i);
        } else {
            self.creatures[i].count = count;
        }
        true
    }

    /// Move a creature slot to another template. If a slot with the new
    /// template already exists the two are merged.
    pub fn set_creature_adjustment(&mut self, key: &str, from: Adjustment, to: Adjustment) -> bool {
        let Some(i) = self.creature_index(key, from) else {
            return false;
        };
        if from == to {
            return true;
        }
        match self.creature_index(key, to) {
            Some(j) => {
                let moved = self.creatures.remove(i).count;
                let j = if j > i { j - 1 } else { j };
                self.creatures[j].count = self.creatures[j].count.saturating_add(moved);
            }
            None => self.creatures[i].adjustment = to,
        }
        true
    }

    /// Add one copy of a hazard, merging with an existing slot.
    pub fn add_hazard(&mut self, hazard: Hazard) {
        match self.hazard_index(hazard.key()) {
            Some(i) => self.hazards[i].count = self.hazards[i].count.saturating_add(1),
            None => self.hazards.push(EncounterHazard::new(hazard, 1)),
        }
    }

    /// Remove one copy of a hazard, dropping the slot when it was the last.
    pub fn remove_hazard(&mut self, key: &str) -> bool {
        let Some(i) = self.hazard_index(key) else {
            return false;
        };
        if self.hazards[i].count > 1 {
            self.hazards[i].count -= 1;
        } else {
            self.hazards.remove(i);
        }
        true
    }

    /// Set how many copies a hazard slot holds. A count of 0 drops the slot.
    pub fn set_hazard_count(&mut self, key: &str, count: u32) -> bool {
        let Some(i) = self.hazard_index(key) else {
            return false;
        };
        if count == 0 {
            self.hazards.remove(i);
        } else {
            self.hazards[i].count = count;
        }
        true
    }
}

/// Serialize a list of encounters for sharing.
pub fn export_encounters(encounters: &[Encounter]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(encounters)?)
}

/// Merge exported encounters into `library`. Encounters whose id is already
/// present are skipped. Returns how many were added.
pub fn import_encounters(library: &mut Vec<Encounter>, json: &str) -> CoreResult<usize> {
    let imported: Vec<Encounter> = serde_json::from_str(json)?;
    let mut added = 0;
    for encounter in imported {
        let known = !encounter.id.is_empty() && library.iter().any(|e| e.id == encounter.id);
        if !known {
            library.push(encounter);
            added += 1;
        }
    }
    Ok(added)
}
