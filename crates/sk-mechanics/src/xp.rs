//! XP-by-level-difference tables.
//!
//! Every table covers the closed range -4..=+4. Differences outside that
//! range are clamped to the nearest edge before lookup, so a lookup can
//! never miss.

use std::fmt;

use sk_core::Complexity;

/// Smallest level difference the tables distinguish.
pub const MIN_DIFF: i32 = -4;
/// Largest level difference the tables distinguish.
pub const MAX_DIFF: i32 = 4;

/// A level difference clamped into the table range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelDiff(i32);

impl LevelDiff {
    /// Clamp a raw difference into -4..=+4.
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(MIN_DIFF, MAX_DIFF))
    }

    /// Difference between a creature/hazard level and the party level.
    pub fn between(level: i32, party_level: i32) -> Self {
        Self::clamped(level.saturating_sub(party_level))
    }

    /// The clamped value.
    pub fn value(self) -> i32 {
        self.0
    }

    fn index(self) -> usize {
        // 0..=8 after clamping
        (self.0 - MIN_DIFF) as usize
    }
}

impl fmt::Display for LevelDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// A nine-entry XP table indexed by [`LevelDiff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpTable([i32; 9]);

impl XpTable {
    /// XP for a clamped level difference.
    pub fn get(&self, diff: LevelDiff) -> i32 {
        self.0[diff.index()]
    }

    /// XP for a raw (unclamped) level difference.
    pub fn lookup(&self, raw_diff: i32) -> i32 {
        self.get(LevelDiff::clamped(raw_diff))
    }

    /// All nine entries from -4 to +4.
    pub fn entries(&self) -> &[i32; 9] {
        &self.0
    }
}

/// Creature XP by level difference.
pub const CREATURE_XP: XpTable = XpTable([10, 15, 20, 30, 40, 60, 80, 120, 160]);

/// Simple hazards are worth a fifth of a creature of the same level.
pub const SIMPLE_HAZARD_XP: XpTable = XpTable([2, 3, 4, 6, 8, 12, 16, 24, 32]);

/// Complex hazards are worth the same as a creature.
pub const COMPLEX_HAZARD_XP: XpTable = CREATURE_XP;

/// Starship scene threats use the complex-hazard column of the rules text,
/// which tops out at 100 and 120 rather than 120 and 160.
pub const STARSHIP_SCENE_XP: XpTable = XpTable([10, 15, 20, 30, 40, 60, 80, 100, 120]);

/// XP for one creature at the given raw level difference.
pub fn creature_xp(level_diff: i32) -> i32 {
    CREATURE_XP.lookup(level_diff)
}

/// The table that prices hazards of a given complexity.
pub fn hazard_table(complexity: Complexity) -> &'static XpTable {
    match complexity {
        Complexity::Simple => &SIMPLE_HAZARD_XP,
        Complexity::Complex => &COMPLEX_HAZARD_XP,
    }
}

/// XP for one hazard against a party of the given level.
pub fn hazard_xp(level: i32, complexity: Complexity, party_level: i32) -> i32 {
    hazard_table(complexity).get(LevelDiff::between(level, party_level))
}

/// XP for one starship scene threat against the scene level.
pub fn starship_scene_xp(threat_level: i32, scene_level: i32) -> i32 {
    STARSHIP_SCENE_XP.get(LevelDiff::between(threat_level, scene_level))
}

/// Display label for a hazard, e.g. `"16 XP (Level +2)"`.
///
/// The level shown is the raw difference, not the clamped one.
pub fn hazard_xp_label(level: i32, complexity: Complexity, party_level: i32) -> String {
    let xp = hazard_xp(level, complexity, party_level);
    let diff = level.saturating_sub(party_level);
    format!("{xp} XP (Level {diff:+})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn creature_table_values() {
        let expected = [
            (-4, 10),
            (-3, 15),
            (-2, 20),
            (-1, 30),
            (0, 40),
            (1, 60),
            (2, 80),
            (3, 120),
            (4, 160),
        ];
        for (diff, xp) in expected {
            assert_eq!(creature_xp(diff), xp, "diff {diff}");
        }
    }

    #[test]
    fn simple_hazards_are_a_fifth() {
        for (simple, creature) in SIMPLE_HAZARD_XP.entries().iter().zip(CREATURE_XP.entries()) {
            assert_eq!(*simple, (*creature as f64 / 5.0).round() as i32);
        }
    }

    #[test]
    fn complex_hazards_match_creatures() {
        assert_eq!(hazard_xp(7, Complexity::Complex, 5), 80);
        assert_eq!(hazard_xp(7, Complexity::Simple, 5), 16);
    }

    #[test]
    fn starship_scene_top_end_differs() {
        assert_eq!(starship_scene_xp(8, 5), 100);
        assert_eq!(starship_scene_xp(9, 5), 120);
        assert_eq!(starship_scene_xp(15, 5), 120);
        assert_eq!(starship_scene_xp(5, 5), 40);
        assert_eq!(creature_xp(3), 120);
    }

    #[test]
    fn hazard_label_uses_raw_diff() {
        assert_eq!(hazard_xp_label(7, Complexity::Simple, 5), "16 XP (Level +2)");
        assert_eq!(hazard_xp_label(1, Complexity::Complex, 7), "10 XP (Level -6)");
        assert_eq!(hazard_xp_label(5, Complexity::Complex, 5), "40 XP (Level +0)");
    }

    #[test]
    fn level_diff_display() {
        assert_eq!(LevelDiff::clamped(9).to_string(), "+4");
        assert_eq!(LevelDiff::clamped(-2).to_string(), "-2");
    }

    #[test]
    fn extreme_levels_do_not_overflow() {
        assert_eq!(LevelDiff::between(i32::MIN, i32::MAX).value(), MIN_DIFF);
        assert_eq!(LevelDiff::between(i32::MAX, i32::MIN).value(), MAX_DIFF);
    }

    proptest! {
        #[test]
        fn out_of_range_diffs_hit_the_edges(diff in -1000i32..1000) {
            let xp = creature_xp(diff);
            if diff <= MIN_DIFF {
                prop_assert_eq!(xp, 10);
            } else if diff >= MAX_DIFF {
                prop_assert_eq!(xp, 160);
            } else {
                prop_assert_eq!(xp, CREATURE_XP.entries()[(diff + 4) as usize]);
            }
        }

        #[test]
        fn tables_are_monotonic(a in -10i32..10, b in -10i32..10) {
            if a <= b {
                prop_assert!(creature_xp(a) <= creature_xp(b));
                prop_assert!(SIMPLE_HAZARD_XP.lookup(a) <= SIMPLE_HAZARD_XP.lookup(b));
                prop_assert!(STARSHIP_SCENE_XP.lookup(a) <= STARSHIP_SCENE_XP.lookup(b));
            }
        }
    }
}
