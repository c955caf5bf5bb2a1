use std::fmt;

use serde::{Deserialize, Serialize};

/// A creature stat block as it appears in the catalog.
///
/// Only `name` is required when deserializing. A missing `level` is read as 0
/// so that partially scraped entries still price into an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Catalog identifier (may be empty for hand-entered creatures).
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creature level. May be negative (level -1 creatures exist).
    #[serde(default)]
    pub level: i32,
    /// Hit points.
    #[serde(default)]
    pub hp: i32,
    /// Armor class.
    #[serde(default = "default_ac")]
    pub ac: i32,
    /// Perception modifier, also used as the initiative bonus.
    #[serde(default)]
    pub perception: i32,
    /// Rules traits (e.g. "undead", "tech").
    #[serde(default)]
    pub traits: Vec<String>,
    /// Source book or website.
    #[serde(default)]
    pub source: String,
}

fn default_ac() -> i32 {
    10
}

impl Creature {
    /// Create a creature with a name and level and default stats.
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            level,
            hp: 0,
            ac: default_ac(),
            perception: 0,
            traits: Vec::new(),
            source: String::new(),
        }
    }

    /// Identity used to merge roster slots: the catalog id, or the name for
    /// hand-entered creatures.
    pub fn key(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }

    /// Set hit points, armor class and perception in one go.
    pub fn with_stats(mut self, hp: i32, ac: i32, perception: i32) -> Self {
        self.hp = hp;
        self.ac = ac;
        self.perception = perception;
        self
    }
}

/// Elite/weak template applied to a creature without changing its stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Unmodified creature.
    #[default]
    Normal,
    /// Elite template: one level tougher.
    Elite,
    /// Weak template: one level weaker.
    Weak,
}

impl Adjustment {
    /// How many levels this adjustment adds to the creature's level.
    pub fn level_delta(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Elite => 1,
            Self::Weak => -1,
        }
    }

    /// The creature's level after applying this adjustment.
    pub fn effective_level(self, base_level: i32) -> i32 {
        base_level + self.level_delta()
    }

    /// Parse an adjustment name ("normal", "elite", "weak"), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "elite" => Some(Self::Elite),
            "weak" => Some(Self::Weak),
            _ => None,
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Elite => write!(f, "elite"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_deltas() {
        assert_eq!(Adjustment::Normal.effective_level(5), 5);
        assert_eq!(Adjustment::Elite.effective_level(5), 6);
        assert_eq!(Adjustment::Weak.effective_level(5), 4);
        assert_eq!(Adjustment::Weak.effective_level(-1), -2);
    }

    #[test]
    fn adjustment_parse_and_display() {
        assert_eq!(Adjustment::parse("Elite"), Some(Adjustment::Elite));
        assert_eq!(Adjustment::parse(" weak "), Some(Adjustment::Weak));
        assert_eq!(Adjustment::parse("mythic"), None);
        assert_eq!(Adjustment::Elite.to_string(), "elite");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: Creature = serde_json::from_str(r#"{"name": "Mote"}"#).unwrap();
        assert_eq!(c.level, 0);
        assert_eq!(c.ac, 10);
        assert!(c.traits.is_empty());
    }

    #[test]
    fn adjustment_serializes_lowercase() {
        let json = serde_json::to_string(&Adjustment::Elite).unwrap();
        assert_eq!(json, "\"elite\"");
    }
}
