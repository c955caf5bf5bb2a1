//! Dice for initiative and checks.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
        }
    }

    /// Roll the die once.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.sides())
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A d20 plus a modifier, e.g. an initiative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoll {
    /// The natural die result.
    pub roll: i32,
    /// The flat modifier added.
    pub modifier: i32,
}

impl CheckRoll {
    /// Roll a d20 and add `modifier`.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, modifier: i32) -> Self {
        let roll = Die::D20.roll(rng) as i32;
        Self { roll, modifier }
    }

    /// Die plus modifier.
    pub fn total(&self) -> i32 {
        self.roll.saturating_add(self.modifier)
    }

    /// A natural 20.
    pub fn is_nat20(&self) -> bool {
        self.roll == 20
    }

    /// A natural 1.
    pub fn is_nat1(&self) -> bool {
        self.roll == 1
    }
}

impl fmt::Display for CheckRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1d20 ({}) {:+} = {}",
            self.roll,
            self.modifier,
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn die_sides_and_display() {
        assert_eq!(Die::D20.sides(), 20);
        assert_eq!(Die::D6.to_string(), "d6");
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let v = Die::D20.roll(&mut rng);
            assert!((1..=20).contains(&v));
        }
    }

    #[test]
    fn check_total_and_breakdown() {
        let check = CheckRoll {
            roll: 15,
            modifier: 8,
        };
        assert_eq!(check.total(), 23);
        assert_eq!(check.to_string(), "1d20 (15) +8 = 23");
        let low = CheckRoll {
            roll: 1,
            modifier: -2,
        };
        assert!(low.is_nat1());
        assert_eq!(low.to_string(), "1d20 (1) -2 = -1");
    }

    #[test]
    fn huge_modifier_saturates() {
        let check = CheckRoll {
            roll: 12,
            modifier: i32::MAX,
        };
        assert_eq!(check.total(), i32::MAX);
    }

    #[test]
    fn seeded_rolls_repeat() {
        let a = CheckRoll::roll(&mut StdRng::seed_from_u64(9), 3);
        let b = CheckRoll::roll(&mut StdRng::seed_from_u64(9), 3);
        assert_eq!(a, b);
    }
}
