//! Configuration for a combat tracker.

/// Configuration for a [`CombatTracker`](crate::combat::CombatTracker).
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// RNG seed for reproducible initiative rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Whether "roll all" also rerolls player characters.
    pub roll_players: bool,
}

impl TrackerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Include player characters when rolling initiative for everyone.
    pub fn with_roll_players(mut self, roll_players: bool) -> Self {
        self.roll_players = roll_players;
        self
    }
}
