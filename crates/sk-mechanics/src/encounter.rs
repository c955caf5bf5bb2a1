//! Encounter XP calculation.
//!
//! [`compute_encounter_xp`] prices every creature and hazard slot against the
//! party level, sums them, and maps the total onto a difficulty tier using
//! budgets adjusted for party size. It is total: every roster produces a
//! result.

use serde::Serialize;
use sk_core::{Adjustment, Complexity, Encounter, EncounterCreature, EncounterHazard, PartyInfo};

use crate::difficulty::{Difficulty, adjusted_budget, difficulty_for};
use crate::xp::{self, LevelDiff};

/// Pricing of one creature slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureLine {
    /// Creature name.
    pub name: String,
    /// Number of copies.
    pub count: u32,
    /// Elite/weak template.
    pub adjustment: Adjustment,
    /// Level after the template.
    pub effective_level: i32,
    /// Effective level minus party level, before clamping.
    pub level_diff: i32,
    /// XP for one copy.
    pub xp_each: i32,
    /// XP for all copies.
    pub xp_total: i32,
}

/// Pricing of one hazard slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardLine {
    /// Hazard name.
    pub name: String,
    /// Number of copies.
    pub count: u32,
    /// Simple or complex.
    pub complexity: Complexity,
    /// Hazard level minus party level, before clamping.
    pub level_diff: i32,
    /// XP for one copy.
    pub xp_each: i32,
    /// XP for all copies.
    pub xp_total: i32,
}

/// Full XP breakdown of an encounter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterXp {
    /// Creature XP plus hazard XP.
    pub total_xp: i32,
    /// Sum over creature slots.
    pub creature_xp: i32,
    /// Sum over hazard slots.
    pub hazard_xp: i32,
    /// The moderate-tier budget for this party size.
    pub adjusted_budget: i32,
    /// Hardest tier the total reaches.
    pub difficulty: Difficulty,
    /// Per-slot creature pricing, in roster order.
    pub creatures: Vec<CreatureLine>,
    /// Per-slot hazard pricing, in roster order.
    pub hazards: Vec<HazardLine>,
}

fn times(xp_each: i32, count: u32) -> i32 {
    xp_each.saturating_mul(i32::try_from(count).unwrap_or(i32::MAX))
}

fn price_creature(slot: &EncounterCreature, party_level: i32) -> CreatureLine {
    let effective_level = slot.adjustment.effective_level(slot.creature.level);
    let level_diff = effective_level.saturating_sub(party_level);
    let xp_each = xp::CREATURE_XP.get(LevelDiff::clamped(level_diff));
    CreatureLine {
        name: slot.creature.name.clone(),
        count: slot.count,
        adjustment: slot.adjustment,
        effective_level,
        level_diff,
        xp_each,
        xp_total: times(xp_each, slot.count),
    }
}

fn price_hazard(slot: &EncounterHazard, party_level: i32) -> HazardLine {
    let hazard = &slot.hazard;
    let xp_each = xp::hazard_xp(hazard.level, hazard.complexity, party_level);
    HazardLine {
        name: hazard.name.clone(),
        count: slot.count,
        complexity: hazard.complexity,
        level_diff: hazard.level.saturating_sub(party_level),
        xp_each,
        xp_total: times(xp_each, slot.count),
    }
}

/// Price a roster of creatures and hazards against a party.
pub fn compute_encounter_xp(
    creatures: &[EncounterCreature],
    hazards: &[EncounterHazard],
    party_level: i32,
    party_size: u32,
) -> EncounterXp {
    let creatures: Vec<CreatureLine> = creatures
        .iter()
        .map(|slot| price_creature(slot, party_level))
        .collect();
    let hazards: Vec<HazardLine> = hazards
        .iter()
        .map(|slot| price_hazard(slot, party_level))
        .collect();

    let creature_xp = creatures
        .iter()
        .fold(0i32, |sum, line| sum.saturating_add(line.xp_total));
    let hazard_xp = hazards
        .iter()
        .fold(0i32, |sum, line| sum.saturating_add(line.xp_total));
    let total_xp = creature_xp.saturating_add(hazard_xp);

    tracing::debug!(
        total_xp,
        party_level,
        party_size,
        "priced {} creature and {} hazard slots",
        creatures.len(),
        hazards.len()
    );

    EncounterXp {
        total_xp,
        creature_xp,
        hazard_xp,
        adjusted_budget: adjusted_budget(party_size, Difficulty::Moderate),
        difficulty: difficulty_for(total_xp, party_size),
        creatures,
        hazards,
    }
}

/// Price a saved encounter, against its own party or an override.
pub fn evaluate(encounter: &Encounter, party: Option<PartyInfo>) -> EncounterXp {
    let party = party.unwrap_or_else(|| encounter.party());
    compute_encounter_xp(
        &encounter.creatures,
        &encounter.hazards,
        party.level,
        party.size,
    )
}
