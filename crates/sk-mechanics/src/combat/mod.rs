//! Combat state and turn order.
//!
//! A [`Combat`] keeps combatants in insertion order and derives the
//! initiative order on demand (descending, stable for ties). `turn` indexes
//! that derived order. Turn changes skip dead combatants and bump the round
//! when the pointer wraps.
//!
//! [`CombatTracker`] wraps a combat with the editing operations a GM needs
//! and hands the state to a [`CombatSink`] after every change.

pub mod combatant;
pub mod sink;
pub mod tracker;

pub use combatant::{Combatant, CombatantId, ConditionEntry, Origin};
pub use sink::{CombatSink, JsonFileSink, NullSink, load_combat};
pub use tracker::CombatTracker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state of an ongoing combat encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combat {
    /// Unique id of this combat.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current round number (1-based, never below 1).
    pub round: u32,
    /// Index into the initiative order for the current turn.
    pub turn: usize,
    /// All combatants, in the order they were added.
    pub combatants: Vec<Combatant>,
    /// When the combat was started.
    pub created_at: DateTime<Utc>,
}

impl Combat {
    /// Create an empty combat at round 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            round: 1,
            turn: 0,
            combatants: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Number of combatants.
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    /// Returns true if nobody has been added.
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Indices into `combatants`, sorted by initiative (descending).
    /// Ties keep insertion order.
    pub fn initiative_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.combatants.len()).collect();
        indices.sort_by(|&a, &b| {
            self.combatants[b]
                .initiative
                .cmp(&self.combatants[a].initiative)
        });
        indices
    }

    /// Combatants in initiative order.
    pub fn sorted(&self) -> Vec<&Combatant> {
        self.initiative_order()
            .into_iter()
            .map(|i| &self.combatants[i])
            .collect()
    }

    /// Living combatants in initiative order.
    pub fn alive(&self) -> Vec<&Combatant> {
        self.sorted().into_iter().filter(|c| !c.is_dead).collect()
    }

    /// Returns true if at least one combatant is not dead.
    pub fn has_alive(&self) -> bool {
        self.combatants.iter().any(|c| !c.is_dead)
    }

    /// The combatant whose turn it is.
    pub fn current(&self) -> Option<&Combatant> {
        let order = self.initiative_order();
        if order.is_empty() {
            return None;
        }
        Some(&self.combatants[order[self.turn % order.len()]])
    }

    /// Look up a combatant by id.
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Look up a combatant by id, mutably.
    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Resolve a user-supplied reference: an exact name (case-insensitive)
    /// or a prefix of the id.
    pub fn resolve(&self, query: &str) -> Option<CombatantId> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.combatants
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(query))
            .or_else(|| {
                self.combatants
                    .iter()
                    .find(|c| c.id.0.to_string().starts_with(&query.to_lowercase()))
            })
            .map(|c| c.id)
    }

    /// A name not yet used in this combat: `base`, or `base 2`, `base 3`, ...
    pub fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.combatants.iter().any(|c| c.name == name);
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 2;
        while taken(&format!("{base} {n}")) {
            n += 1;
        }
        format!("{base} {n}")
    }

    /// Advance to the next living combatant. Returns true if a new round
    /// started.
    ///
    /// No-op when nobody is alive.
    pub fn next_turn(&mut self) -> bool {
        if !self.has_alive() {
            return false;
        }
        let order = self.initiative_order();
        let len = order.len();

        let mut next = (self.turn + 1) % len;
        let mut attempts = 0;
        while self.combatants[order[next]].is_dead && attempts < len {
            next = (next + 1) % len;
            attempts += 1;
        }

        let new_round = next <= self.turn || attempts >= len;
        if new_round {
            self.round += 1;
        }
        self.turn = next;
        new_round
    }

    /// Step back to the previous living combatant. Crossing the top of the
    /// order steps the round back, but never below 1.
    ///
    /// No-op when nobody is alive.
    pub fn previous_turn(&mut self) {
        if !self.has_alive() {
            return;
        }
        let order = self.initiative_order();
        let len = order.len();

        let mut prev = self.step_back(self.turn, len);
        let mut attempts = 0;
        while self.combatants[order[prev]].is_dead && attempts < len {
            prev = self.step_back(prev, len);
            attempts += 1;
        }
        self.turn = prev;
    }

    fn step_back(&mut self, index: usize, len: usize) -> usize {
        if index == 0 {
            self.round = self.round.saturating_sub(1).max(1);
            len - 1
        } else {
            (index - 1).min(len - 1)
        }
    }

    /// Jump to a position in the initiative order, clamped to the roster.
    pub fn set_turn(&mut self, index: usize) {
        self.turn = index.min(self.combatants.len().saturating_sub(1));
    }

    /// Add a combatant and return its id.
    pub fn add(&mut self, combatant: Combatant) -> CombatantId {
        let id = combatant.id;
        self.combatants.push(combatant);
        id
    }

    /// Remove a combatant. If the turn pointer falls off the end it resets
    /// to the top of the order; it does not follow whoever was active.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.combatants.iter().position(|c| c.id == id)?;
        let removed = self.combatants.remove(index);
        if self.turn >= self.combatants.len() {
            self.turn = 0;
        }
        Some(removed)
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new("Combat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combat_with(inits: &[(&str, i32)]) -> Combat {
        let mut combat = Combat::new("Test");
        for (name, init) in inits {
            combat.add(Combatant::player(*name, *init, 20, 15));
        }
        combat
    }

    fn current_name(combat: &Combat) -> &str {
        &combat.current().unwrap().name
    }

    fn kill(combat: &mut Combat, name: &str) {
        let id = combat.resolve(name).unwrap();
        combat.get_mut(id).unwrap().is_dead = true;
    }

    #[test]
    fn combat_lifecycle() {
        let mut combat = combat_with(&[("Alice", 15), ("Bob", 10), ("Charlie", 20)]);
        assert_eq!(combat.round, 1);

        // Charlie has highest initiative (20)
        assert_eq!(current_name(&combat), "Charlie");

        assert!(!combat.next_turn());
        assert_eq!(current_name(&combat), "Alice");

        assert!(!combat.next_turn());
        assert_eq!(current_name(&combat), "Bob");

        // Advance wraps to round 2
        assert!(combat.next_turn());
        assert_eq!(combat.round, 2);
        assert_eq!(current_name(&combat), "Charlie");
    }

    #[test]
    fn ties_keep_insertion_order() {
        let combat = combat_with(&[("First", 12), ("Second", 12), ("Top", 18), ("Third", 12)]);
        let names: Vec<&str> = combat.sorted().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn next_turn_skips_the_dead() {
        let mut combat = combat_with(&[("A", 30), ("B", 20), ("C", 10)]);
        kill(&mut combat, "B");
        assert!(!combat.next_turn());
        assert_eq!(current_name(&combat), "C");
        assert_eq!(combat.turn, 2);
    }

    #[test]
    fn skipping_past_the_end_is_a_new_round() {
        let mut combat = combat_with(&[("A", 30), ("B", 20), ("C", 10)]);
        kill(&mut combat, "C");
        combat.next_turn();
        assert_eq!(current_name(&combat), "B");
        assert!(combat.next_turn());
        assert_eq!(current_name(&combat), "A");
        assert_eq!(combat.round, 2);
    }

    #[test]
    fn lone_survivor_gets_a_new_round_every_turn() {
        let mut combat = combat_with(&[("A", 30), ("B", 20)]);
        kill(&mut combat, "B");
        assert!(combat.next_turn());
        assert_eq!(current_name(&combat), "A");
        assert!(combat.next_turn());
        assert_eq!(combat.round, 3);
    }

    #[test]
    fn all_dead_is_a_no_op() {
        let mut combat = combat_with(&[("A", 30), ("B", 20)]);
        kill(&mut combat, "A");
        kill(&mut combat, "B");
        assert!(!combat.next_turn());
        combat.previous_turn();
        assert_eq!(combat.turn, 0);
        assert_eq!(combat.round, 1);
    }

    #[test]
    fn empty_combat_is_a_no_op() {
        let mut combat = Combat::new("Empty");
        assert!(!combat.next_turn());
        combat.previous_turn();
        assert_eq!((combat.turn, combat.round), (0, 1));
        assert!(combat.current().is_none());
    }

    #[test]
    fn next_never_lowers_the_round() {
        let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
        let mut last = combat.round;
        for _ in 0..20 {
            combat.next_turn();
            assert!(combat.round >= last);
            last = combat.round;
        }
        assert_eq!(combat.round, 1 + 20 / 3);
    }

    #[test]
    fn previous_wraps_and_steps_the_round_back() {
        let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
        combat.next_turn();
        combat.next_turn();
        combat.next_turn();
        assert_eq!((combat.turn, combat.round), (0, 2));

        combat.previous_turn();
        assert_eq!((combat.turn, combat.round), (2, 1));

        // Round is floored at 1
        combat.set_turn(0);
        combat.previous_turn();
        assert_eq!((combat.turn, combat.round), (2, 1));
    }

    #[test]
    fn previous_skips_the_dead() {
        let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
        combat.set_turn(2);
        kill(&mut combat, "B");
        combat.previous_turn();
        assert_eq!(current_name(&combat), "A");
    }

    #[test]
    fn previous_then_next_restores_turn() {
        for start in 0..3 {
            let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
            combat.set_turn(start);
            combat.round = 4;
            combat.previous_turn();
            combat.next_turn();
            assert_eq!(combat.turn, start);
            // Crossing index 0 costs a round going back and gives one going forward.
            assert_eq!(combat.round, 4);
        }
    }

    #[test]
    fn previous_from_a_stale_turn_lands_in_range() {
        let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
        // As if restored from a save written with more combatants.
        combat.turn = 7;
        combat.round = 3;
        combat.previous_turn();
        assert_eq!(combat.turn, 2);
        assert_eq!(combat.round, 3);
        assert_eq!(current_name(&combat), "C");
    }

    #[test]
    fn removing_the_only_combatant_resets_turn() {
        let mut combat = combat_with(&[("Solo", 10)]);
        let id = combat.resolve("Solo").unwrap();
        assert!(combat.remove(id).is_some());
        assert_eq!(combat.turn, 0);
        assert!(combat.current().is_none());
    }

    #[test]
    fn removing_past_the_pointer_resets_to_top() {
        let mut combat = combat_with(&[("A", 3), ("B", 2), ("C", 1)]);
        combat.set_turn(2);
        let id = combat.resolve("A").unwrap();
        combat.remove(id);
        assert_eq!(combat.turn, 0);
        assert_eq!(current_name(&combat), "B");
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut combat = combat_with(&[("A", 3)]);
        assert!(combat.remove(CombatantId::new()).is_none());
        assert_eq!(combat.len(), 1);
    }

    #[test]
    fn set_turn_clamps() {
        let mut combat = combat_with(&[("A", 3), ("B", 2)]);
        combat.set_turn(9);
        assert_eq!(combat.turn, 1);
        let mut empty = Combat::new("Empty");
        empty.set_turn(5);
        assert_eq!(empty.turn, 0);
    }

    #[test]
    fn unique_names_get_suffixes() {
        let mut combat = Combat::new("Test");
        assert_eq!(combat.unique_name("Goblin"), "Goblin");
        combat.add(Combatant::player("Goblin", 1, 5, 12));
        assert_eq!(combat.unique_name("Goblin"), "Goblin 2");
        combat.add(Combatant::player("Goblin 2", 1, 5, 12));
        assert_eq!(combat.unique_name("Goblin"), "Goblin 3");
    }

    #[test]
    fn resolve_by_name_or_id_prefix() {
        let combat = combat_with(&[("Nyx", 14)]);
        let id = combat.combatants[0].id;
        assert_eq!(combat.resolve("nyx"), Some(id));
        let prefix = &id.0.to_string()[..6];
        assert_eq!(combat.resolve(prefix), Some(id));
        assert_eq!(combat.resolve("nobody"), None);
        assert_eq!(combat.resolve(""), None);
    }

    #[test]
    fn alive_view_filters_dead() {
        let mut combat = combat_with(&[("A", 3), ("B", 2)]);
        kill(&mut combat, "A");
        let alive: Vec<&str> = combat.alive().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(alive, vec!["B"]);
    }
}
