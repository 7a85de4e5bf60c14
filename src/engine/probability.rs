//! Per-tick attack/goal probability model.
//!
//! Historically this codebase carried several diverging attack formulas;
//! they are consolidated here into a single clamped model: a small base
//! probability, an attacking modifier, a defending modifier, a possession
//! influence term and a bounded random perturbation, clamped to a fixed
//! safe band before a single Bernoulli draw.
//!
//! The clamp is a design guarantee, not an artifact: a hopelessly
//! outgunned side always keeps a non-zero chance per attempt, and no
//! rating extreme can make a goal certain.

use rand::Rng;

use crate::data::models::TeamRatings;
use crate::engine::tactics::{TacticSet, TacticSetting};

/// Chance of a goal for one attempt when everything is neutral.
pub const BASE_GOAL_PROBABILITY: f64 = 0.10;

/// Lower edge of the safe band any computed probability is clamped to.
pub const PROBABILITY_FLOOR: f64 = 0.03;

/// Upper edge of the safe band.
pub const PROBABILITY_CEILING: f64 = 0.30;

/// Magnitude of the uniform per-attempt perturbation.
pub const MAX_PERTURBATION: f64 = 0.06;

/// Weight of the attacking side's offensive tactic bundle.
const TACTIC_ATTACK_WEIGHT: f64 = 0.08;
/// Weight of the defending side's defensive tactic bundle.
const TACTIC_DEFENSE_WEIGHT: f64 = 0.08;
/// Weight of the roster-strength edge (rating model outputs).
const ROSTER_EDGE_WEIGHT: f64 = 0.10;
/// Weight of the attacking team's raw attack baseline.
const BASELINE_ATTACK_WEIGHT: f64 = 0.04;
/// Weight of the defending team's raw defense baseline.
const BASELINE_DEFENSE_WEIGHT: f64 = 0.04;
/// Weight of the relative possession advantage.
const POSSESSION_WEIGHT: f64 = 0.05;
/// How much defending pressing erodes the attacker's possession edge:
/// at pressing 100 only 40% of the advantage survives.
const PRESSING_DAMPING: f64 = 0.6;

/// One side's pre-computed inputs to the model: the rating model's roster
/// strength plus the team's baseline reference ratings.
#[derive(Debug, Clone, Copy)]
pub struct SideAssessment {
    /// Rating model output for the fielded eleven (0–100).
    pub roster_strength: f64,
    pub baseline: TeamRatings,
}

/// The pure pre-draw probability that one attack attempt scores, already
/// clamped to the safe band. `perturbation` is passed in (rather than
/// drawn here) so tests can recompute the formula exactly; values beyond
/// the documented magnitude are clamped too.
pub fn goal_probability(
    attacker: &SideAssessment,
    defender: &SideAssessment,
    attacking_tactics: &TacticSet,
    defending_tactics: &TacticSet,
    perturbation: f64,
) -> f64 {
    let attacking_modifier = TACTIC_ATTACK_WEIGHT * attacking_tactics.offensive_score()
        + BASELINE_ATTACK_WEIGHT * (attacker.baseline.attack / 100.0)
        + ROSTER_EDGE_WEIGHT * ((attacker.roster_strength - defender.roster_strength) / 100.0);

    let defending_modifier = TACTIC_DEFENSE_WEIGHT * defending_tactics.defensive_score()
        + BASELINE_DEFENSE_WEIGHT * (defender.baseline.defense / 100.0);

    let pressing = defending_tactics.get(TacticSetting::Pressing) / 100.0;
    let possession_influence = POSSESSION_WEIGHT
        * ((attacker.baseline.possession - defender.baseline.possession) / 100.0)
        * (1.0 - PRESSING_DAMPING * pressing);

    let p = BASE_GOAL_PROBABILITY + attacking_modifier - defending_modifier
        + possession_influence
        + perturbation.clamp(-MAX_PERTURBATION, MAX_PERTURBATION);

    p.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
}

/// One attack attempt: draw the perturbation, compute the clamped
/// probability, and resolve it with a single Bernoulli draw. Memoryless —
/// nothing about earlier attempts biases this one.
pub fn attempts_goal<R: Rng + ?Sized>(
    attacker: &SideAssessment,
    defender: &SideAssessment,
    attacking_tactics: &TacticSet,
    defending_tactics: &TacticSet,
    rng: &mut R,
) -> bool {
    let perturbation = rng.gen_range(-MAX_PERTURBATION..=MAX_PERTURBATION);
    let p = goal_probability(
        attacker,
        defender,
        attacking_tactics,
        defending_tactics,
        perturbation,
    );
    rng.gen_bool(p)
}
