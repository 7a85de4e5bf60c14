//! Rating model: roster → scalar team strength.
//!
//! Each player is reduced to a position-weighted composite of their ability
//! vector; team strength is the arithmetic mean of the composites. Tactics
//! optionally modulate each position group through a small linear boost.
//! This stage is fully deterministic — all randomness lives in the goal
//! probability model.

use crate::data::models::{Abilities, Player, PositionGroup};
use crate::engine::tactics::{TacticSet, TacticSetting};

/// Slope of the per-group tactic boost: a group's lever at 100 scales its
/// players' composites by +10%, at 0 by −10%, neutral at 50.
const TACTIC_BOOST_SLOPE: f64 = 0.2;

/// Ability mix per position group. Each weight row sums to 1.0, keeping
/// composites on the raw 0–100 attribute scale.
fn base_composite(group: PositionGroup, a: &Abilities) -> f64 {
    match group {
        PositionGroup::Goalkeeper => {
            a.reflexes * 0.50 + a.positioning * 0.30 + a.physical * 0.20
        }
        PositionGroup::Defence => {
            a.defending * 0.45 + a.physical * 0.25 + a.positioning * 0.15 + a.pace * 0.15
        }
        PositionGroup::Midfield => {
            a.passing * 0.40 + a.dribbling * 0.30 + a.positioning * 0.10 + a.physical * 0.10
                + a.pace * 0.10
        }
        PositionGroup::Attack => {
            a.shooting * 0.40 + a.pace * 0.25 + a.dribbling * 0.25 + a.physical * 0.10
        }
    }
}

/// The tactic lever for one position group: strikers ride mentality and
/// attack style, midfielders possession and playmaking, defenders the
/// height of the defensive line. Goalkeepers are not tactic-modulated.
fn group_boost(group: PositionGroup, tactics: &TacticSet) -> f64 {
    let lever = match group {
        PositionGroup::Goalkeeper => return 1.0,
        PositionGroup::Defence => tactics.get(TacticSetting::DefenseLine),
        PositionGroup::Midfield => {
            (tactics.get(TacticSetting::Possession) + tactics.get(TacticSetting::Playmaking)) / 2.0
        }
        PositionGroup::Attack => {
            (tactics.get(TacticSetting::Mentality) + tactics.get(TacticSetting::AttackStyle)) / 2.0
        }
    };
    1.0 + TACTIC_BOOST_SLOPE * (lever / 100.0 - 0.5)
}

/// Position-weighted composite of one player's abilities, on the same
/// 0–100 scale as the raw attributes.
pub fn player_composite(player: &Player, tactics: Option<&TacticSet>) -> f64 {
    let base = base_composite(player.position.group(), &player.abilities);
    let boost = tactics
        .map(|t| group_boost(player.position.group(), t))
        .unwrap_or(1.0);
    (base * boost).clamp(0.0, 100.0)
}

/// Mean composite across the roster, 0–100. An empty roster degrades to
/// zero strength rather than failing — roster shape is validated by the
/// host, never here.
pub fn team_strength(roster: &[Player], tactics: Option<&TacticSet>) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let total: f64 = roster.iter().map(|p| player_composite(p, tactics)).sum();
    total / roster.len() as f64
}
