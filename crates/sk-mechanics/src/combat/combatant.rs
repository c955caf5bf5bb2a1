//! Combatants and their hit points, conditions, and notes.

use std::fmt;

use serde::{Deserialize, Serialize};
use sk_core::{Adjustment, Creature, Hazard};
use uuid::Uuid;

use crate::adjust;

/// Initiative given to simple hazards so they sink to the bottom of the order.
pub const SIMPLE_HAZARD_INITIATIVE: i32 = -999;

/// Unique identifier for a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    /// Generate a new random combatant ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Where a combatant came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// A player character.
    Player {
        /// Character level, if known.
        level: Option<i32>,
    },
    /// A creature from the catalog, with its template.
    Creature {
        /// The catalog stat block.
        creature: Creature,
        /// Elite/weak template.
        adjustment: Adjustment,
    },
    /// A hazard from the catalog.
    Hazard {
        /// The catalog stat block.
        hazard: Hazard,
    },
}

/// A condition on a combatant, optionally with a value (e.g. frightened 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Condition name.
    pub name: String,
    /// Condition value, for valued conditions.
    #[serde(default)]
    pub value: Option<i32>,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl fmt::Display for ConditionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{} {v}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A participant in combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Unique id.
    pub id: CombatantId,
    /// Display name (unique within a combat when added through the tracker).
    pub name: String,
    /// Initiative score (higher goes first).
    pub initiative: i32,
    /// Modifier added to a d20 when rolling initiative.
    pub initiative_bonus: i32,
    /// Current hit points.
    pub current_hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Temporary hit points, lost before real ones.
    pub temp_hp: i32,
    /// Armor class.
    pub ac: i32,
    /// Active conditions.
    pub conditions: Vec<ConditionEntry>,
    /// Controlled by a player.
    pub is_player: bool,
    /// Takes turns (false for simple hazards).
    pub is_active: bool,
    /// Out of the fight; skipped by turn order.
    pub is_dead: bool,
    /// GM notes.
    pub notes: String,
    /// Source of the combatant.
    pub origin: Origin,
}

impl Combatant {
    /// A player character.
    pub fn player(name: impl Into<String>, initiative: i32, hp: i32, ac: i32) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.into(),
            initiative,
            initiative_bonus: 0,
            current_hp: hp,
            max_hp: hp,
            temp_hp: 0,
            ac,
            conditions: Vec::new(),
            is_player: true,
            is_active: true,
            is_dead: false,
            notes: String::new(),
            origin: Origin::Player { level: None },
        }
    }

    /// A creature with its template applied to HP and AC. Initiative starts
    /// at the creature's perception.
    pub fn from_creature(creature: &Creature, adjustment: Adjustment, name: impl Into<String>) -> Self {
        let max_hp = adjust::adjusted_hp(creature.hp, adjustment, creature.level);
        Self {
            id: CombatantId::new(),
            name: name.into(),
            initiative: creature.perception,
            initiative_bonus: creature.perception,
            current_hp: max_hp,
            max_hp,
            temp_hp: 0,
            ac: adjust::adjusted_ac(creature.ac, adjustment),
            conditions: Vec::new(),
            is_player: false,
            is_active: true,
            is_dead: false,
            notes: String::new(),
            origin: Origin::Creature {
                creature: creature.clone(),
                adjustment,
            },
        }
    }

    /// A hazard. Complex hazards act at initiative 0; simple hazards never
    /// act and sit at the bottom of the order.
    pub fn from_hazard(hazard: &Hazard, name: impl Into<String>) -> Self {
        let complex = hazard.is_complex();
        let hp = hazard.hp.unwrap_or(0);
        let disable = hazard.disable.as_deref().unwrap_or("N/A");
        Self {
            id: CombatantId::new(),
            name: name.into(),
            initiative: if complex { 0 } else { SIMPLE_HAZARD_INITIATIVE },
            initiative_bonus: 0,
            current_hp: hp,
            max_hp: hp,
            temp_hp: 0,
            ac: hazard.ac.unwrap_or(10),
            conditions: Vec::new(),
            is_player: false,
            is_active: complex,
            is_dead: false,
            notes: format!(
                "{} {}\nDisable: {disable}",
                hazard.complexity.to_string().to_uppercase(),
                hazard.kind.to_string().to_uppercase()
            ),
            origin: Origin::Hazard {
                hazard: hazard.clone(),
            },
        }
    }

    /// Returns true if this combatant is a hazard.
    pub fn is_hazard(&self) -> bool {
        matches!(self.origin, Origin::Hazard { .. })
    }

    /// Take damage. Temporary HP absorbs it first; reaching 0 HP marks the
    /// combatant dead.
    pub fn apply_damage(&mut self, amount: i32) {
        let mut remaining = amount.max(0);
        if self.temp_hp > 0 {
            let absorbed = remaining.min(self.temp_hp);
            self.temp_hp -= absorbed;
            remaining -= absorbed;
        }
        self.current_hp = self.current_hp.saturating_sub(remaining).max(0);
        if self.current_hp <= 0 {
            self.is_dead = true;
        }
    }

    /// Heal up to max HP. Healing a dead combatant above 0 revives it.
    pub fn apply_healing(&mut self, amount: i32) {
        self.current_hp = self.current_hp.saturating_add(amount.max(0)).min(self.max_hp);
        if self.current_hp > 0 && self.is_dead {
            self.is_dead = false;
        }
    }

    /// Set HP directly, clamped to 0..=max. Dead exactly when at 0.
    pub fn set_hp(&mut self, hp: i32) {
        self.current_hp = hp.clamp(0, self.max_hp.max(0));
        self.is_dead = self.current_hp <= 0;
    }

    /// Set temporary HP (never negative).
    pub fn set_temp_hp(&mut self, temp_hp: i32) {
        self.temp_hp = temp_hp.max(0);
    }

    /// Set max HP (at least 1), lowering current HP if needed.
    pub fn set_max_hp(&mut self, max_hp: i32) {
        self.max_hp = max_hp.max(1);
        self.current_hp = self.current_hp.min(self.max_hp);
    }

    /// Add a condition, or update its value if already present.
    pub fn add_condition(&mut self, name: &str, value: Option<i32>) {
        match self.conditions.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value,
            None => self.conditions.push(ConditionEntry {
                name: name.to_string(),
                value,
                note: None,
            }),
        }
    }

    /// Remove a condition. Returns true if it was present.
    pub fn remove_condition(&mut self, name: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.name != name);
        self.conditions.len() != before
    }

    /// Change a condition's value; a value of 0 or less removes it.
    /// Returns true if the condition was present.
    pub fn update_condition_value(&mut self, name: &str, value: i32) -> bool {
        if value <= 0 {
            return self.remove_condition(name);
        }
        match self.conditions.iter_mut().find(|c| c.name == name) {
            Some(cond) => {
                cond.value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Flip the dead flag. Marking dead drops HP to 0.
    pub fn toggle_dead(&mut self) {
        self.is_dead = !self.is_dead;
        if self.is_dead {
            self.current_hp = 0;
        }
    }
}
