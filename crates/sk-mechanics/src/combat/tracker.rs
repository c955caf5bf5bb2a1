//! The GM-facing combat tracker.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sk_core::{Adjustment, Creature, Hazard};

use super::sink::{CombatSink, NullSink};
use super::{Combat, Combatant, CombatantId};
use crate::config::TrackerConfig;
use crate::dice::CheckRoll;

/// Owns at most one running [`Combat`] and persists it after every change.
///
/// Operations that target a combatant by id are no-ops when the id is
/// unknown. Adding a combatant when no combat is running starts one.
pub struct CombatTracker<S: CombatSink = NullSink> {
    combat: Option<Combat>,
    sink: S,
    config: TrackerConfig,
    rng: StdRng,
}

impl CombatTracker<NullSink> {
    /// A tracker that does not persist anything.
    pub fn in_memory(config: TrackerConfig) -> Self {
        Self::new(config, NullSink)
    }
}

impl<S: CombatSink> CombatTracker<S> {
    /// Create a tracker with no combat running.
    pub fn new(config: TrackerConfig, sink: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            combat: None,
            sink,
            config,
            rng,
        }
    }

    /// Create a tracker resuming a previously saved combat.
    pub fn resume(combat: Option<Combat>, config: TrackerConfig, sink: S) -> Self {
        let mut tracker = Self::new(config, sink);
        tracker.combat = combat;
        tracker
    }

    /// The running combat, if any.
    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    /// The sink receiving saves.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn persist(&mut self) {
        if let Err(e) = self.sink.save(self.combat.as_ref()) {
            tracing::warn!(error = %e, "failed to save combat");
        }
    }

    fn running(&mut self) -> &mut Combat {
        self.combat.get_or_insert_with(Combat::default)
    }

    /// Apply `f` to the running combat (if any) and persist.
    fn edit<T>(&mut self, f: impl FnOnce(&mut Combat) -> T) -> Option<T> {
        let out = f(self.combat.as_mut()?);
        self.persist();
        Some(out)
    }

    /// Apply `f` to one combatant and persist. Returns false if there is no
    /// such combatant.
    fn edit_combatant(&mut self, id: CombatantId, f: impl FnOnce(&mut Combatant)) -> bool {
        let Some(combatant) = self.combat.as_mut().and_then(|c| c.get_mut(id)) else {
            tracing::debug!(%id, "no such combatant");
            return false;
        };
        f(combatant);
        self.persist();
        true
    }

    /// Start a fresh combat, replacing any running one.
    pub fn start(&mut self, name: impl Into<String>) -> &Combat {
        let combat = Combat::new(name);
        tracing::debug!(name = %combat.name, "combat started");
        self.combat = Some(combat);
        self.persist();
        self.running()
    }

    /// End the running combat and drop its saved state.
    pub fn end(&mut self) {
        if let Some(combat) = self.combat.take() {
            tracing::debug!(name = %combat.name, round = combat.round, "combat ended");
        }
        self.persist();
    }

    fn push(&mut self, build: impl FnOnce(String) -> Combatant, base_name: &str) -> CombatantId {
        let combat = self.running();
        let name = combat.unique_name(base_name);
        let id = combat.add(build(name));
        tracing::debug!(%id, base_name, "combatant added");
        self.persist();
        id
    }

    /// Add a player character.
    pub fn add_player(&mut self, name: &str, initiative: i32, hp: i32, ac: i32) -> CombatantId {
        self.push(|n| Combatant::player(n, initiative, hp, ac), name)
    }

    /// Add a creature with a template. Duplicate names get a numeric suffix.
    pub fn add_creature(
        &mut self,
        creature: &Creature,
        adjustment: Adjustment,
        custom_name: Option<&str>,
    ) -> CombatantId {
        let base = custom_name.unwrap_or(&creature.name).to_string();
        self.push(
            |n| Combatant::from_creature(creature, adjustment, n),
            &base,
        )
    }

    /// Add a hazard. Duplicate names get a numeric suffix.
    pub fn add_hazard(&mut self, hazard: &Hazard, custom_name: Option<&str>) -> CombatantId {
        let base = custom_name.unwrap_or(&hazard.name).to_string();
        self.push(|n| Combatant::from_hazard(hazard, n), &base)
    }

    /// Remove a combatant.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let removed = self.combat.as_mut()?.remove(id)?;
        self.persist();
        Some(removed)
    }

    /// Set a combatant's initiative.
    pub fn set_initiative(&mut self, id: CombatantId, initiative: i32) -> bool {
        self.edit_combatant(id, |c| c.initiative = initiative)
    }

    /// Roll d20 + initiative bonus for one combatant.
    pub fn roll_initiative(&mut self, id: CombatantId) -> Option<CheckRoll> {
        let bonus = self.combat.as_ref()?.get(id)?.initiative_bonus;
        let check = CheckRoll::roll(&mut self.rng, bonus);
        self.edit_combatant(id, |c| c.initiative = check.total());
        Some(check)
    }

    /// Roll initiative for every non-player (or everyone, if configured).
    pub fn roll_all_initiative(&mut self) {
        let roll_players = self.config.roll_players;
        let Some(combat) = self.combat.as_mut() else {
            return;
        };
        for combatant in combat
            .combatants
            .iter_mut()
            .filter(|c| roll_players || !c.is_player)
        {
            combatant.initiative = CheckRoll::roll(&mut self.rng, combatant.initiative_bonus).total();
        }
        self.persist();
    }

    /// Advance the turn. Returns true if a new round started.
    pub fn next_turn(&mut self) -> bool {
        let new_round = self.edit(Combat::next_turn).unwrap_or(false);
        if let Some(combat) = &self.combat {
            tracing::debug!(turn = combat.turn, round = combat.round, new_round, "next turn");
        }
        new_round
    }

    /// Step the turn back.
    pub fn previous_turn(&mut self) {
        self.edit(Combat::previous_turn);
        if let Some(combat) = &self.combat {
            tracing::debug!(turn = combat.turn, round = combat.round, "previous turn");
        }
    }

    /// Jump to a position in the initiative order.
    pub fn set_turn(&mut self, index: usize) {
        self.edit(|c| c.set_turn(index));
    }

    /// Damage a combatant (temp HP first).
    pub fn apply_damage(&mut self, id: CombatantId, amount: i32) -> bool {
        self.edit_combatant(id, |c| c.apply_damage(amount))
    }

    /// Heal a combatant (up to max HP, reviving from 0).
    pub fn apply_healing(&mut self, id: CombatantId, amount: i32) -> bool {
        self.edit_combatant(id, |c| c.apply_healing(amount))
    }

    /// Set current HP.
    pub fn set_hp(&mut self, id: CombatantId, hp: i32) -> bool {
        self.edit_combatant(id, |c| c.set_hp(hp))
    }

    /// Set temporary HP.
    pub fn set_temp_hp(&mut self, id: CombatantId, temp_hp: i32) -> bool {
        self.edit_combatant(id, |c| c.set_temp_hp(temp_hp))
    }

    /// Set maximum HP.
    pub fn set_max_hp(&mut self, id: CombatantId, max_hp: i32) -> bool {
        self.edit_combatant(id, |c| c.set_max_hp(max_hp))
    }

    /// Add or update a condition.
    pub fn add_condition(&mut self, id: CombatantId, name: &str, value: Option<i32>) -> bool {
        self.edit_combatant(id, |c| c.add_condition(name, value))
    }

    /// Remove a condition.
    pub fn remove_condition(&mut self, id: CombatantId, name: &str) -> bool {
        self.edit_combatant(id, |c| {
            c.remove_condition(name);
        })
    }

    /// Change a condition's value; 0 or less removes it.
    pub fn update_condition_value(&mut self, id: CombatantId, name: &str, value: i32) -> bool {
        self.edit_combatant(id, |c| {
            c.update_condition_value(name, value);
        })
    }

    /// Replace a combatant's notes.
    pub fn set_notes(&mut self, id: CombatantId, notes: &str) -> bool {
        self.edit_combatant(id, |c| c.notes = notes.to_string())
    }

    /// Flip a combatant's dead flag.
    pub fn toggle_dead(&mut self, id: CombatantId) -> bool {
        self.edit_combatant(id, Combatant::toggle_dead)
    }

    /// Rename a combatant.
    pub fn rename(&mut self, id: CombatantId, name: &str) -> bool {
        self.edit_combatant(id, |c| c.name = name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{MechError, MechResult};
    use sk_core::Complexity;

    fn seeded() -> CombatTracker {
        CombatTracker::in_memory(TrackerConfig::default().with_seed(42))
    }

    #[test]
    fn adding_starts_a_combat() {
        let mut tracker = seeded();
        assert!(tracker.combat().is_none());
        tracker.add_player("Keskodai", 12, 32, 18);
        let combat = tracker.combat().unwrap();
        assert_eq!(combat.name, "Combat");
        assert_eq!(combat.round, 1);
        assert_eq!(combat.len(), 1);
    }

    #[test]
    fn duplicate_creatures_are_numbered() {
        let mut tracker = seeded();
        let goblin = Creature::new("Space Goblin", 1).with_stats(18, 16, 5);
        tracker.add_creature(&goblin, Adjustment::Normal, None);
        tracker.add_creature(&goblin, Adjustment::Elite, None);
        let id = tracker.add_creature(&goblin, Adjustment::Weak, None);
        let combat = tracker.combat().unwrap();
        let names: Vec<&str> = combat.combatants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Space Goblin", "Space Goblin 2", "Space Goblin 3"]);
        assert_eq!(combat.get(id).unwrap().max_hp, 8);
    }

    #[test]
    fn custom_names_are_respected() {
        let mut tracker = seeded();
        let vent = Hazard::new("Plasma Vent", 3, Complexity::Complex);
        let id = tracker.add_hazard(&vent, Some("Left Vent"));
        assert_eq!(tracker.combat().unwrap().get(id).unwrap().name, "Left Vent");
    }

    #[test]
    fn roll_initiative_uses_bonus() {
        let mut tracker = seeded();
        let ghoul = Creature::new("Ghoul", 3).with_stats(40, 18, 7);
        let id = tracker.add_creature(&ghoul, Adjustment::Normal, None);
        let check = tracker.roll_initiative(id).unwrap();
        assert_eq!(check.modifier, 7);
        assert!((8..=27).contains(&check.total()));
        assert_eq!(tracker.combat().unwrap().get(id).unwrap().initiative, check.total());
        assert!(tracker.roll_initiative(CombatantId::new()).is_none());
    }

    #[test]
    fn roll_all_skips_players_by_default() {
        let mut tracker = seeded();
        let pc = tracker.add_player("Pilot", -50, 20, 17);
        tracker.add_creature(&Creature::new("Drone", 0), Adjustment::Normal, None);
        tracker.roll_all_initiative();
        let combat = tracker.combat().unwrap();
        assert_eq!(combat.get(pc).unwrap().initiative, -50);
        assert!((1..=20).contains(&combat.combatants[1].initiative));

        let mut everyone =
            CombatTracker::in_memory(TrackerConfig::default().with_seed(1).with_roll_players(true));
        let pc = everyone.add_player("Pilot", -50, 20, 17);
        everyone.roll_all_initiative();
        assert!(everyone.combat().unwrap().get(pc).unwrap().initiative > 0);
    }

    #[test]
    fn turn_order_through_tracker() {
        let mut tracker = seeded();
        let a = tracker.add_player("A", 20, 10, 10);
        tracker.add_player("B", 15, 10, 10);
        tracker.add_player("C", 10, 10, 10);
        tracker.toggle_dead(a);
        // Turn 0 is A even though A is dead; next skips to B.
        assert!(!tracker.next_turn());
        assert_eq!(tracker.combat().unwrap().current().unwrap().name, "B");
        tracker.next_turn();
        assert!(tracker.next_turn());
        assert_eq!(tracker.combat().unwrap().round, 2);
        assert_eq!(tracker.combat().unwrap().current().unwrap().name, "B");
        tracker.previous_turn();
        assert_eq!(tracker.combat().unwrap().current().unwrap().name, "C");
        assert_eq!(tracker.combat().unwrap().round, 1);
    }

    #[test]
    fn turn_ops_without_combat_are_no_ops() {
        let mut tracker = seeded();
        assert!(!tracker.next_turn());
        tracker.previous_turn();
        tracker.set_turn(3);
        tracker.roll_all_initiative();
        assert!(tracker.combat().is_none());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut tracker = seeded();
        tracker.add_player("A", 1, 10, 10);
        let ghost = CombatantId::new();
        assert!(!tracker.apply_damage(ghost, 5));
        assert!(!tracker.rename(ghost, "Boo"));
        assert!(tracker.remove(ghost).is_none());
    }

    #[test]
    fn hp_and_conditions_through_tracker() {
        let mut tracker = seeded();
        let id = tracker.add_player("Tank", 5, 30, 20);
        tracker.set_temp_hp(id, 4);
        tracker.apply_damage(id, 10);
        tracker.add_condition(id, "frightened", Some(2));
        tracker.update_condition_value(id, "frightened", 1);
        tracker.set_notes(id, "holding the door");
        let c = tracker.combat().unwrap().get(id).unwrap().clone();
        assert_eq!((c.current_hp, c.temp_hp), (24, 0));
        assert_eq!(c.conditions[0].value, Some(1));
        assert_eq!(c.notes, "holding the door");

        tracker.remove_condition(id, "frightened");
        tracker.set_max_hp(id, 20);
        tracker.apply_healing(id, 50);
        tracker.set_initiative(id, 22);
        let c = tracker.combat().unwrap().get(id).unwrap();
        assert!(c.conditions.is_empty());
        assert_eq!((c.current_hp, c.max_hp, c.initiative), (20, 20, 22));
        tracker.set_hp(id, 0);
        assert!(tracker.combat().unwrap().get(id).unwrap().is_dead);
    }

    #[test]
    fn every_mutation_reaches_the_sink() {
        let saved: Rc<RefCell<Vec<Option<u32>>>> = Rc::default();
        let log = Rc::clone(&saved);
        let sink = move |c: Option<&Combat>| -> MechResult<()> {
            log.borrow_mut().push(c.map(|c| c.round));
            Ok(())
        };
        let mut tracker = CombatTracker::new(TrackerConfig::default().with_seed(3), sink);
        tracker.start("Ambush");
        let id = tracker.add_player("Solo", 10, 10, 10);
        tracker.next_turn();
        tracker.remove(id);
        tracker.end();
        assert_eq!(*saved.borrow(), vec![Some(1), Some(1), Some(2), Some(2), None]);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let sink = |_: Option<&Combat>| -> MechResult<()> { Err(MechError::NoCombat) };
        let mut tracker = CombatTracker::new(TrackerConfig::default(), sink);
        tracker.add_player("A", 1, 5, 10);
        assert_eq!(tracker.combat().unwrap().len(), 1);
    }

    #[test]
    fn resume_restores_state() {
        let mut combat = Combat::new("Saved");
        combat.round = 5;
        let tracker = CombatTracker::resume(Some(combat), TrackerConfig::default(), NullSink);
        assert_eq!(tracker.combat().unwrap().round, 5);
    }
}
