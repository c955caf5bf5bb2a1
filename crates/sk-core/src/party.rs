use serde::{Deserialize, Serialize};

/// Party size the difficulty budgets are written for.
pub const DEFAULT_PARTY_SIZE: u32 = 4;

/// The two numbers encounter math needs about a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    /// Party level.
    pub level: i32,
    /// Number of player characters.
    pub size: u32,
}

impl PartyInfo {
    /// Create party info from a level and size.
    pub fn new(level: i32, size: u32) -> Self {
        Self { level, size }
    }
}

impl Default for PartyInfo {
    fn default() -> Self {
        Self {
            level: 1,
            size: DEFAULT_PARTY_SIZE,
        }
    }
}

/// A saved player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Character name.
    pub name: String,
    /// Maximum hit points.
    #[serde(default)]
    pub max_hp: i32,
    /// Armor class.
    #[serde(default)]
    pub ac: i32,
    /// Character level, if known.
    #[serde(default)]
    pub level: Option<i32>,
    /// Perception modifier, if known.
    #[serde(default)]
    pub perception: Option<i32>,
    /// GM notes.
    #[serde(default)]
    pub notes: String,
}

impl Player {
    /// Create a player with hit points and armor class.
    pub fn new(name: impl Into<String>, max_hp: i32, ac: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            ac,
            level: None,
            perception: None,
            notes: String::new(),
        }
    }

    /// Set the character level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }
}

/// A group of players reused across encounters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Party name.
    #[serde(default)]
    pub name: String,
    /// Members of the party.
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Party {
    /// Create an empty party.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
        }
    }

    /// Average player level, rounded half up. Players without a level (or at
    /// level 0) count as 1; an empty party is level 1.
    pub fn level(&self) -> i32 {
        if self.players.is_empty() {
            return 1;
        }
        let total: i64 = self
            .players
            .iter()
            .map(|p| match p.level {
                None | Some(0) => 1,
                Some(level) => i64::from(level),
            })
            .sum();
        let mean = total as f64 / self.players.len() as f64;
        (mean + 0.5).floor() as i32
    }

    /// Number of players, or the default party size if the party is empty.
    pub fn size(&self) -> u32 {
        if self.players.is_empty() {
            return DEFAULT_PARTY_SIZE;
        }
        u32::try_from(self.players.len()).unwrap_or(u32::MAX)
    }

    /// Level and size together.
    pub fn info(&self) -> PartyInfo {
        PartyInfo::new(self.level(), self.size())
    }
}
