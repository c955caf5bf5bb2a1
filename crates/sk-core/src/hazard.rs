use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a hazard fires once or acts in initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// Resolves in a single trigger and effect.
    #[default]
    Simple,
    /// Takes turns on initiative every round.
    Complex,
}

impl Complexity {
    /// Parse "simple" or "complex", case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple"),
            Self::Complex => write!(f, "Complex"),
        }
    }
}

/// Broad category of a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// A built mechanism.
    #[default]
    Trap,
    /// A natural danger.
    Environmental,
    /// A spiritual or lingering supernatural effect.
    Haunt,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trap => write!(f, "Trap"),
            Self::Environmental => write!(f, "Environmental"),
            Self::Haunt => write!(f, "Haunt"),
        }
    }
}

/// A hazard stat block as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    /// Catalog identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hazard level.
    #[serde(default)]
    pub level: i32,
    /// Simple or complex.
    #[serde(default)]
    pub complexity: Complexity,
    /// Trap, environmental or haunt.
    #[serde(default, rename = "type")]
    pub kind: HazardKind,
    /// Hit points, if the hazard can be destroyed.
    #[serde(default)]
    pub hp: Option<i32>,
    /// Armor class, if the hazard can be attacked.
    #[serde(default)]
    pub ac: Option<i32>,
    /// Stealth DC to notice the hazard.
    #[serde(default)]
    pub stealth_dc: Option<i32>,
    /// How to disable it, as free text.
    #[serde(default)]
    pub disable: Option<String>,
    /// Rules traits.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Source book or website.
    #[serde(default)]
    pub source: String,
}

impl Hazard {
    /// Create a hazard with a name, level and complexity.
    pub fn new(name: impl Into<String>, level: i32, complexity: Complexity) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            level,
            complexity,
            kind: HazardKind::default(),
            hp: None,
            ac: None,
            stealth_dc: None,
            disable: None,
            traits: Vec::new(),
            source: String::new(),
        }
    }

    /// Identity used to merge roster slots: the catalog id, or the name for
    /// hand-entered hazards.
    pub fn key(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }

    /// Returns true if the hazard takes turns in initiative.
    pub fn is_complex(&self) -> bool {
        self.complexity == Complexity::Complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_parse() {
        assert_eq!(Complexity::parse("COMPLEX"), Some(Complexity::Complex));
        assert_eq!(Complexity::parse("simple"), Some(Complexity::Simple));
        assert_eq!(Complexity::parse("tricky"), None);
    }

    #[test]
    fn hazard_from_sparse_json() {
        let h: Hazard =
            serde_json::from_str(r#"{"name": "Spark Grid", "complexity": "complex", "type": "haunt"}"#)
                .unwrap();
        assert_eq!(h.level, 0);
        assert!(h.is_complex());
        assert_eq!(h.kind, HazardKind::Haunt);
        assert_eq!(h.hp, None);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Complexity::Simple.to_string(), "Simple");
        assert_eq!(HazardKind::Environmental.to_string(), "Environmental");
    }
}
