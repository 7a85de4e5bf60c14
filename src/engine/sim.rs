//! The pure simulation core: one fixture, one state, one seeded RNG.
//!
//! `MatchEngine` is the tick port — the same logic is driven by the
//! real-time clock task, a manual test harness calling `tick()`, or the
//! batch `run_to_completion()` loop. It owns its randomness (seedable for
//! deterministic replay) and never touches wall-clock time itself.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::data::models::{Player, Team};
use crate::engine::commentary::{commentary_line, goal_text, pick_scorer};
use crate::engine::probability::{attempts_goal, SideAssessment};
use crate::engine::rating::team_strength;
use crate::engine::state::{MatchState, Side, MATCH_MINUTES};
use crate::engine::tactics::TacticSet;

/// Chance that a tick produces a colour-commentary line, independent of
/// either side's attack attempts.
pub const COMMENTARY_PROBABILITY: f64 = 0.22;

/// Everything the engine needs about one side: the team record, the
/// confirmed eleven and the confirmed tactic configuration.
#[derive(Debug, Clone)]
pub struct SideContext {
    pub team: Team,
    pub roster: Vec<Player>,
    pub tactics: TacticSet,
}

/// The full, validated input for one fixture. The host assembles this
/// from its squad picker and tactics screens before the clock may start.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub home: SideContext,
    pub away: SideContext,
}

/// Simulation engine for a single fixture.
pub struct MatchEngine {
    ctx: MatchContext,
    home_assessment: SideAssessment,
    away_assessment: SideAssessment,
    state: MatchState,
    rng: StdRng,
}

impl MatchEngine {
    /// Build an engine from a complete context. Ratings are computed once
    /// here — rosters and tactics are read-only for the whole match.
    pub fn new(ctx: MatchContext, seed: Option<u64>) -> Self {
        let home_assessment = SideAssessment {
            roster_strength: team_strength(&ctx.home.roster, Some(&ctx.home.tactics)),
            baseline: ctx.home.team.ratings,
        };
        let away_assessment = SideAssessment {
            roster_strength: team_strength(&ctx.away.roster, Some(&ctx.away.tactics)),
            baseline: ctx.away.team.ratings,
        };
        info!(
            "Engine ready: {} (strength {:.1}, tactics {:.2}) vs {} (strength {:.1}, tactics {:.2})",
            ctx.home.team.name,
            home_assessment.roster_strength,
            ctx.home.tactics.tactic_strength(),
            ctx.away.team.name,
            away_assessment.roster_strength,
            ctx.away.tactics.tactic_strength()
        );
        MatchEngine {
            ctx,
            home_assessment,
            away_assessment,
            state: MatchState::new(),
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn context(&self) -> &MatchContext {
        &self.ctx
    }

    /// Mark the match as live. Called by the clock on `start`; stamps
    /// kickoff on first use.
    pub fn kick_off(&mut self) {
        if self.state.ended {
            return;
        }
        if self.state.kicked_off_at.is_none() {
            self.state.kicked_off_at = Some(Utc::now());
        }
        self.state.running = true;
    }

    /// Flip the live flag without touching minute or events. Used by the
    /// clock's pause/resume; a no-op once the match has ended.
    pub fn set_running(&mut self, running: bool) {
        if !self.state.ended {
            self.state.running = running;
        }
    }

    /// Advance the match by one simulated minute.
    ///
    /// Idempotent after full time: once `ended` is set, further ticks
    /// change nothing. Minute 90 is still a playable minute; the
    /// transition to `ended` happens at the end of its tick.
    pub fn tick(&mut self) {
        if self.state.ended {
            return;
        }
        self.state.minute += 1;
        let minute = self.state.minute;

        if self.rng.gen_bool(COMMENTARY_PROBABILITY) {
            let (side, text) = commentary_line(
                &self.ctx.home.team.name,
                &self.ctx.away.team.name,
                &mut self.rng,
            );
            debug!("{}' {}", minute, text);
            self.state.record_commentary(minute, side, text);
        }

        self.attempt(Side::Home);
        self.attempt(Side::Away);

        if minute >= MATCH_MINUTES {
            self.state.ended = true;
            self.state.running = false;
            info!(
                "Full time: {} {} - {} {}",
                self.ctx.home.team.name,
                self.state.score.home,
                self.state.score.away,
                self.ctx.away.team.name
            );
        }
    }

    /// One side's attack attempt for the current minute.
    fn attempt(&mut self, side: Side) {
        let (attacker, defender) = match side {
            Side::Home => (&self.home_assessment, &self.away_assessment),
            Side::Away => (&self.away_assessment, &self.home_assessment),
        };
        let (attacking_side, defending_side) = match side {
            Side::Home => (&self.ctx.home, &self.ctx.away),
            Side::Away => (&self.ctx.away, &self.ctx.home),
        };

        if !attempts_goal(
            attacker,
            defender,
            &attacking_side.tactics,
            &defending_side.tactics,
            &mut self.rng,
        ) {
            return;
        }

        let scorer = pick_scorer(&attacking_side.roster, &mut self.rng);
        let text = goal_text(&attacking_side.team.name, scorer);
        let scorer_name = scorer.map(|p| p.name.clone());
        let minute = self.state.minute;
        info!("{}' {}", minute, text);
        self.state.record_goal(minute, side, text, scorer_name);
    }

    /// Drive the match to full time in one synchronous call — the batch
    /// face of the tick port.
    pub fn run_to_completion(&mut self) -> &MatchState {
        while !self.state.ended {
            self.tick();
        }
        &self.state
    }
}
