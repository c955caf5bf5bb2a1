//! Difficulty tiers and party-size-adjusted XP budgets.

use std::fmt;

use serde::{Deserialize, Serialize};
use sk_core::party::DEFAULT_PARTY_SIZE;

/// XP added to (or removed from) every budget per player above (or below) four.
pub const PER_PLAYER_ADJUSTMENT: i32 = 20;

/// Encounter difficulty tier, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Barely a speed bump.
    Trivial,
    /// Low threat.
    Low,
    /// Moderate threat.
    Moderate,
    /// Severe threat.
    Severe,
    /// Extreme threat.
    Extreme,
}

impl Difficulty {
    /// All tiers in ascending order of severity.
    pub const ALL: [Difficulty; 5] = [
        Self::Trivial,
        Self::Low,
        Self::Moderate,
        Self::Severe,
        Self::Extreme,
    ];

    /// XP budget for a party of four.
    pub fn base_budget(self) -> i32 {
        match self {
            Self::Trivial => 40,
            Self::Low => 60,
            Self::Moderate => 80,
            Self::Severe => 120,
            Self::Extreme => 160,
        }
    }

    /// Parse a tier name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trivial" => Some(Self::Trivial),
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            "extreme" => Some(Self::Extreme),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trivial => write!(f, "trivial"),
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::Severe => write!(f, "severe"),
            Self::Extreme => write!(f, "extreme"),
        }
    }
}

/// Budget for a tier adjusted to the party size.
///
/// Not floored: a party of one gets a trivial budget of -20.
pub fn adjusted_budget(party_size: u32, tier: Difficulty) -> i32 {
    let size = i32::try_from(party_size).unwrap_or(i32::MAX);
    let default = DEFAULT_PARTY_SIZE as i32;
    let players = size.saturating_sub(default);
    tier.base_budget()
        .saturating_add(players.saturating_mul(PER_PLAYER_ADJUSTMENT))
}

/// Adjusted budgets for every tier, easiest first.
pub fn thresholds(party_size: u32) -> [(Difficulty, i32); 5] {
    Difficulty::ALL.map(|tier| (tier, adjusted_budget(party_size, tier)))
}

/// The hardest tier whose adjusted budget the XP total reaches.
///
/// Totals below even the trivial budget are still trivial.
pub fn difficulty_for(total_xp: i32, party_size: u32) -> Difficulty {
    thresholds(party_size)
        .into_iter()
        .rev()
        .find(|(_, budget)| total_xp >= *budget)
        .map_or(Difficulty::Trivial, |(tier, _)| tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn party_of_four_uses_base_budgets() {
        let budgets: Vec<i32> = thresholds(4).iter().map(|(_, b)| *b).collect();
        assert_eq!(budgets, vec![40, 60, 80, 120, 160]);
    }

    #[test]
    fn party_of_six_shifts_budgets() {
        assert_eq!(adjusted_budget(6, Difficulty::Trivial), 80);
        assert_eq!(difficulty_for(75, 6), Difficulty::Trivial);
        assert_eq!(difficulty_for(100, 6), Difficulty::Low);
    }

    #[test]
    fn small_parties_go_negative() {
        assert_eq!(adjusted_budget(1, Difficulty::Trivial), -20);
        assert_eq!(adjusted_budget(2, Difficulty::Trivial), 0);
        assert_eq!(difficulty_for(0, 2), Difficulty::Trivial);
        // Low budget for one player is 0, so an empty roster already reaches it.
        assert_eq!(adjusted_budget(1, Difficulty::Low), 0);
        assert_eq!(difficulty_for(0, 1), Difficulty::Low);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(difficulty_for(120, 4), Difficulty::Severe);
        assert_eq!(difficulty_for(119, 4), Difficulty::Moderate);
        assert_eq!(difficulty_for(500, 4), Difficulty::Extreme);
        assert_eq!(difficulty_for(0, 4), Difficulty::Trivial);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(Difficulty::parse("Severe"), Some(Difficulty::Severe));
        assert_eq!(Difficulty::parse("deadly"), None);
        assert_eq!(Difficulty::Extreme.to_string(), "extreme");
    }

    proptest! {
        #[test]
        fn each_player_adds_twenty(size in 1u32..50) {
            for tier in Difficulty::ALL {
                prop_assert_eq!(
                    adjusted_budget(size + 1, tier) - adjusted_budget(size, tier),
                    PER_PLAYER_ADJUSTMENT
                );
            }
        }

        #[test]
        fn difficulty_never_decreases_with_xp(xp in 0i32..400, extra in 0i32..100, size in 1u32..8) {
            prop_assert!(difficulty_for(xp, size) <= difficulty_for(xp + extra, size));
        }
    }
}
