//! Tactic sliders and their aggregation into scalar scores.
//!
//! A tactic is a set of twenty named 0–100 sliders. Three views of a set
//! feed the rest of the engine:
//! - `tactic_strength`: one scalar across all twenty settings, with fixed
//!   weights biased toward mentality, possession and pressing;
//! - `offensive_score` / `defensive_score`: normalised bundles of only the
//!   attack- or defence-relevant settings, consumed by the per-tick goal
//!   probability model.
//!
//! Values written outside [0,100] are clamped, never rejected — the model
//! stays total for any input.

use std::fmt;
use std::str::FromStr;

/// One named tactic slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TacticSetting {
    Mentality,
    AttackStyle,
    BuildUpTempo,
    Width,
    Risk,
    Playmaking,
    CounterAttack,
    Crossing,
    LongShots,
    Dribbling,
    Possession,
    PassRange,
    Pressing,
    DefenseLine,
    Marking,
    DefenseStyle,
    OffsideTrap,
    Aggression,
    TimeWasting,
    Compactness,
}

impl TacticSetting {
    pub const COUNT: usize = 20;

    pub const ALL: [TacticSetting; Self::COUNT] = [
        TacticSetting::Mentality,
        TacticSetting::AttackStyle,
        TacticSetting::BuildUpTempo,
        TacticSetting::Width,
        TacticSetting::Risk,
        TacticSetting::Playmaking,
        TacticSetting::CounterAttack,
        TacticSetting::Crossing,
        TacticSetting::LongShots,
        TacticSetting::Dribbling,
        TacticSetting::Possession,
        TacticSetting::PassRange,
        TacticSetting::Pressing,
        TacticSetting::DefenseLine,
        TacticSetting::Marking,
        TacticSetting::DefenseStyle,
        TacticSetting::OffsideTrap,
        TacticSetting::Aggression,
        TacticSetting::TimeWasting,
        TacticSetting::Compactness,
    ];

    /// Fixed contribution of this setting to the overall tactic strength.
    /// The weights sum to 1.0; mentality, possession and pressing are the
    /// highest-impact levers.
    pub fn weight(&self) -> f64 {
        match self {
            TacticSetting::Mentality => 0.10,
            TacticSetting::Possession => 0.10,
            TacticSetting::Pressing => 0.10,
            TacticSetting::AttackStyle => 0.06,
            TacticSetting::Playmaking => 0.06,
            TacticSetting::DefenseLine => 0.06,
            TacticSetting::BuildUpTempo => 0.05,
            TacticSetting::Risk => 0.05,
            TacticSetting::Marking => 0.05,
            TacticSetting::Width => 0.04,
            TacticSetting::CounterAttack => 0.04,
            TacticSetting::Dribbling => 0.04,
            TacticSetting::DefenseStyle => 0.04,
            TacticSetting::Aggression => 0.04,
            TacticSetting::Compactness => 0.04,
            TacticSetting::Crossing => 0.03,
            TacticSetting::LongShots => 0.03,
            TacticSetting::PassRange => 0.03,
            TacticSetting::OffsideTrap => 0.02,
            TacticSetting::TimeWasting => 0.02,
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).expect("in ALL")
    }
}

/// Offensively relevant settings and their in-bundle weights (sum 1.0),
/// consumed by the attacking modifier of the goal probability model.
const OFFENSIVE_BUNDLE: [(TacticSetting, f64); 10] = [
    (TacticSetting::Mentality, 0.20),
    (TacticSetting::AttackStyle, 0.14),
    (TacticSetting::Playmaking, 0.12),
    (TacticSetting::BuildUpTempo, 0.10),
    (TacticSetting::Risk, 0.10),
    (TacticSetting::CounterAttack, 0.08),
    (TacticSetting::Crossing, 0.07),
    (TacticSetting::LongShots, 0.07),
    (TacticSetting::Dribbling, 0.07),
    (TacticSetting::Width, 0.05),
];

/// Defensively relevant settings and their in-bundle weights (sum 1.0),
/// consumed by the defending modifier of the goal probability model.
const DEFENSIVE_BUNDLE: [(TacticSetting, f64); 5] = [
    (TacticSetting::DefenseLine, 0.25),
    (TacticSetting::Marking, 0.22),
    (TacticSetting::Pressing, 0.22),
    (TacticSetting::DefenseStyle, 0.18),
    (TacticSetting::OffsideTrap, 0.13),
];

/// One side's confirmed tactic configuration for a match. Created when the
/// side's tactics are confirmed; read-only during simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct TacticSet {
    values: [f64; TacticSetting::COUNT],
}

impl Default for TacticSet {
    fn default() -> Self {
        TacticSet {
            values: [Self::NEUTRAL; TacticSetting::COUNT],
        }
    }
}

impl TacticSet {
    /// The midpoint every setting defaults to.
    pub const NEUTRAL: f64 = 50.0;

    pub fn get(&self, setting: TacticSetting) -> f64 {
        self.values[setting.index()]
    }

    /// Write a slider value, clamped to [0,100].
    pub fn set(&mut self, setting: TacticSetting, value: f64) {
        self.values[setting.index()] = value.clamp(0.0, 100.0);
    }

    /// Builder-style `set` for presets and tests.
    pub fn with(mut self, setting: TacticSetting, value: f64) -> Self {
        self.set(setting, value);
        self
    }

    /// Aggregate the whole configuration into a single scalar in [0,1]:
    /// Σ (value/100) · weight over all twenty settings.
    pub fn tactic_strength(&self) -> f64 {
        TacticSetting::ALL
            .iter()
            .map(|s| (self.get(*s) / 100.0) * s.weight())
            .sum()
    }

    /// Weighted mean of the offensive bundle, in [0,1].
    pub fn offensive_score(&self) -> f64 {
        OFFENSIVE_BUNDLE
            .iter()
            .map(|(s, w)| (self.get(*s) / 100.0) * w)
            .sum()
    }

    /// Weighted mean of the defensive bundle, in [0,1].
    pub fn defensive_score(&self) -> f64 {
        DEFENSIVE_BUNDLE
            .iter()
            .map(|(s, w)| (self.get(*s) / 100.0) * w)
            .sum()
    }

    /// Derive the AI side's tactics from the strength gap against its
    /// opponent. The stronger side pushes mentality, possession and
    /// pressing up with the gap; the weaker side sits deeper, takes fewer
    /// risks and leans on the counter-attack. Settings the heuristic does
    /// not touch stay at the neutral midpoint.
    pub fn auto_for_opponent(own_strength: f64, opponent_strength: f64) -> TacticSet {
        let gap = (own_strength - opponent_strength).clamp(-40.0, 40.0);
        let mut tactics = TacticSet::default();
        if gap >= 0.0 {
            tactics.set(TacticSetting::Mentality, Self::NEUTRAL + gap * 0.75);
            tactics.set(TacticSetting::Possession, Self::NEUTRAL + gap * 0.75);
            tactics.set(TacticSetting::Pressing, Self::NEUTRAL + gap * 0.50);
        } else {
            let deficit = -gap;
            tactics.set(TacticSetting::DefenseLine, Self::NEUTRAL - deficit * 0.60);
            tactics.set(TacticSetting::Risk, Self::NEUTRAL - deficit * 0.50);
            tactics.set(TacticSetting::CounterAttack, Self::NEUTRAL + deficit * 0.75);
            tactics.set(TacticSetting::TimeWasting, Self::NEUTRAL + deficit * 0.25);
        }
        tactics
    }

    pub fn preset(preset: TacticPreset) -> TacticSet {
        match preset {
            TacticPreset::Balanced => TacticSet::default(),
            TacticPreset::Attacking => TacticSet::default()
                .with(TacticSetting::Mentality, 75.0)
                .with(TacticSetting::AttackStyle, 70.0)
                .with(TacticSetting::BuildUpTempo, 65.0)
                .with(TacticSetting::Risk, 65.0)
                .with(TacticSetting::Pressing, 60.0)
                .with(TacticSetting::DefenseLine, 60.0),
            TacticPreset::Defensive => TacticSet::default()
                .with(TacticSetting::Mentality, 30.0)
                .with(TacticSetting::DefenseLine, 35.0)
                .with(TacticSetting::Marking, 70.0)
                .with(TacticSetting::DefenseStyle, 70.0)
                .with(TacticSetting::Compactness, 70.0)
                .with(TacticSetting::Risk, 35.0)
                .with(TacticSetting::TimeWasting, 60.0),
            TacticPreset::Counter => TacticSet::default()
                .with(TacticSetting::Mentality, 40.0)
                .with(TacticSetting::DefenseLine, 35.0)
                .with(TacticSetting::CounterAttack, 80.0)
                .with(TacticSetting::BuildUpTempo, 70.0)
                .with(TacticSetting::Risk, 45.0)
                .with(TacticSetting::Compactness, 65.0),
            TacticPreset::HighPress => TacticSet::default()
                .with(TacticSetting::Pressing, 85.0)
                .with(TacticSetting::DefenseLine, 75.0)
                .with(TacticSetting::OffsideTrap, 65.0)
                .with(TacticSetting::Aggression, 70.0)
                .with(TacticSetting::Mentality, 60.0)
                .with(TacticSetting::BuildUpTempo, 70.0),
        }
    }
}

/// Named starting points for the user's side, selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TacticPreset {
    Balanced,
    Attacking,
    Defensive,
    Counter,
    HighPress,
}

impl fmt::Display for TacticPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TacticPreset::Balanced => "balanced",
            TacticPreset::Attacking => "attacking",
            TacticPreset::Defensive => "defensive",
            TacticPreset::Counter => "counter",
            TacticPreset::HighPress => "high-press",
        };
        f.write_str(name)
    }
}

impl FromStr for TacticPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(TacticPreset::Balanced),
            "attacking" => Ok(TacticPreset::Attacking),
            "defensive" => Ok(TacticPreset::Defensive),
            "counter" => Ok(TacticPreset::Counter),
            "high-press" | "highpress" => Ok(TacticPreset::HighPress),
            other => Err(format!(
                "unknown tactic preset '{}' (expected balanced, attacking, defensive, counter or high-press)",
                other
            )),
        }
    }
}
