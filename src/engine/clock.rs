//! Real-time simulation clock: one spawned task per fixture driving the
//! pure engine at a fixed interval, one tick per simulated minute.
//!
//! The task owns the engine outright; the host controls it over a command
//! channel (`pause`/`resume`/`dispose`) and observes it through a `watch`
//! channel that carries a full `MatchState` snapshot after every
//! mutation. There is never more than one tick source per fixture, so
//! pause/resume idempotence comes for free from the single select loop.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::engine::sim::{MatchContext, MatchEngine};
use crate::engine::state::MatchState;

/// Failures surfaced by the clock's control surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `start` was invoked before the host supplied both squads and
    /// tactics. The host must not attempt to render a match in this case.
    #[error("match context is incomplete: supply both squads and tactics before starting")]
    MissingContext,
    #[error("match clock already started")]
    AlreadyStarted,
    #[error("match clock already disposed")]
    Disposed,
}

#[derive(Debug)]
enum ClockCommand {
    Pause,
    Resume,
    Dispose,
}

struct ClockTask {
    cmd_tx: mpsc::Sender<ClockCommand>,
    snapshot_rx: watch::Receiver<MatchState>,
    handle: JoinHandle<MatchState>,
}

/// Host-facing handle for one fixture's tick source.
///
/// Lifecycle: `idle → running → {paused ⇄ running} → ended/disposed`.
/// Leaving the match view must call `dispose` so no detached timer keeps
/// mutating a state nobody observes.
pub struct MatchClock {
    tick_interval: Duration,
    seed: Option<u64>,
    context: Option<MatchContext>,
    task: Option<ClockTask>,
    disposed: bool,
}

impl MatchClock {
    pub fn new(tick_interval: Duration, seed: Option<u64>) -> Self {
        MatchClock {
            tick_interval,
            seed,
            context: None,
            task: None,
            disposed: false,
        }
    }

    /// Supply the validated fixture context. Must happen before `start`.
    pub fn set_context(&mut self, context: MatchContext) {
        self.context = Some(context);
    }

    /// Transition idle → running: build the engine and spawn the single
    /// tick task. Returns a receiver of state snapshots for rendering.
    pub fn start(&mut self) -> Result<watch::Receiver<MatchState>, EngineError> {
        if self.disposed {
            return Err(EngineError::Disposed);
        }
        if self.task.is_some() {
            return Err(EngineError::AlreadyStarted);
        }
        let context = self.context.take().ok_or(EngineError::MissingContext)?;

        let mut engine = MatchEngine::new(context, self.seed);
        engine.kick_off();

        let (cmd_tx, mut cmd_rx) = mpsc::channel::<ClockCommand>(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.state().clone());
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            // First tick one full period after kickoff: 1 tick ≈ 1 minute.
            let mut interval = interval_at(Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut running = true;

            loop {
                tokio::select! {
                    cmd = cmd_rx.recv() => match cmd {
                        Some(ClockCommand::Pause) => {
                            if running {
                                running = false;
                                engine.set_running(false);
                                let _ = snapshot_tx.send(engine.state().clone());
                                info!("Match paused at {}'", engine.state().minute);
                            }
                        }
                        Some(ClockCommand::Resume) => {
                            if !running {
                                running = true;
                                engine.set_running(true);
                                let _ = snapshot_tx.send(engine.state().clone());
                                info!("Match resumed at {}'", engine.state().minute);
                            }
                        }
                        Some(ClockCommand::Dispose) | None => {
                            info!("Match clock disposed at {}'", engine.state().minute);
                            break;
                        }
                    },
                    _ = interval.tick(), if running => {
                        engine.tick();
                        let _ = snapshot_tx.send(engine.state().clone());
                        if engine.state().ended {
                            break;
                        }
                    }
                }
            }

            engine.state().clone()
        });

        let task = ClockTask {
            cmd_tx,
            snapshot_rx: snapshot_rx.clone(),
            handle,
        };
        self.task = Some(task);
        info!(
            "Match clock started ({}ms per simulated minute)",
            self.tick_interval.as_millis()
        );
        Ok(snapshot_rx)
    }

    /// running → paused. Idempotent: pausing an already-paused (or
    /// finished, or never-started) clock changes nothing.
    pub async fn pause(&self) {
        self.send(ClockCommand::Pause).await;
    }

    /// paused → running, continuing from the current minute. Idempotent.
    pub async fn resume(&self) {
        self.send(ClockCommand::Resume).await;
    }

    /// Latest published snapshot, if the clock was ever started.
    pub fn snapshot(&self) -> Option<MatchState> {
        self.task.as_ref().map(|t| t.snapshot_rx.borrow().clone())
    }

    /// Stop the tick task and wait for it to wind down, returning the
    /// final state. Safe to call at any point after `start`; the host is
    /// expected to call it when the match view is abandoned.
    pub async fn dispose(&mut self) -> Option<MatchState> {
        self.disposed = true;
        let task = self.task.take()?;
        // The task may already be gone if the match ran to full time.
        let _ = task.cmd_tx.send(ClockCommand::Dispose).await;
        match task.handle.await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Match clock task failed to join: {}", e);
                None
            }
        }
    }

    async fn send(&self, cmd: ClockCommand) {
        match &self.task {
            Some(task) => {
                // A closed channel means the match already finished; the
                // control op degrades to a no-op.
                let _ = task.cmd_tx.send(cmd).await;
            }
            None => warn!("Clock control ignored: clock not started"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{Abilities, Player, Position, Team, TeamRatings};
    use crate::engine::sim::SideContext;
    use crate::engine::state::MATCH_MINUTES;
    use crate::engine::tactics::TacticSet;

    fn roster(team: &str) -> Vec<Player> {
        let positions = [
            Position::GK,
            Position::CB,
            Position::CB,
            Position::LB,
            Position::RB,
            Position::DM,
            Position::CM,
            Position::AM,
            Position::LW,
            Position::RW,
            Position::ST,
        ];
        positions
            .iter()
            .enumerate()
            .map(|(i, pos)| Player {
                id: format!("{}-{}", team, i),
                name: format!("{} {}", team, i),
                team_id: team.to_string(),
                position: *pos,
                abilities: Abilities {
                    pace: 60.0,
                    shooting: 60.0,
                    passing: 60.0,
                    dribbling: 60.0,
                    defending: 60.0,
                    physical: 60.0,
                    positioning: 60.0,
                    reflexes: 60.0,
                },
            })
            .collect()
    }

    fn context() -> MatchContext {
        let side = |id: &str| SideContext {
            team: Team {
                id: id.to_string(),
                name: id.to_uppercase(),
                ratings: TeamRatings {
                    attack: 60.0,
                    defense: 60.0,
                    possession: 60.0,
                },
            },
            roster: roster(id),
            tactics: TacticSet::default(),
        };
        MatchContext {
            home: side("idn"),
            away: side("jpn"),
        }
    }

    #[tokio::test]
    async fn start_without_context_is_a_missing_context_error() {
        let mut clock = MatchClock::new(Duration::from_millis(10), Some(1));
        match clock.start() {
            Err(EngineError::MissingContext) => {}
            other => panic!("expected MissingContext, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let mut clock = MatchClock::new(Duration::from_millis(10), Some(1));
        clock.set_context(context());
        clock.start().unwrap();
        assert!(matches!(clock.start(), Err(EngineError::AlreadyStarted)));
        clock.dispose().await;
    }

    #[tokio::test]
    async fn dispose_at_kickoff_leaves_state_untouched() {
        // Long interval: dispose lands before the first tick can fire.
        let mut clock = MatchClock::new(Duration::from_secs(5), Some(1));
        clock.set_context(context());
        clock.start().unwrap();
        let final_state = clock.dispose().await.expect("task joins cleanly");
        assert_eq!(final_state.minute, 0);
        assert!(final_state.events.is_empty());
        assert_eq!(final_state.score.home, 0);
        assert_eq!(final_state.score.away, 0);
        assert!(!final_state.ended);
    }

    #[tokio::test]
    async fn clock_runs_the_match_to_full_time() {
        let mut clock = MatchClock::new(Duration::from_millis(1), Some(2));
        clock.set_context(context());
        let mut snapshots = clock.start().unwrap();
        while snapshots.changed().await.is_ok() {
            if snapshots.borrow().ended {
                break;
            }
        }
        let state = snapshots.borrow().clone();
        assert_eq!(state.minute, MATCH_MINUTES);
        assert!(state.ended);
        assert!(!state.running);
        assert!(state.kicked_off_at.is_some());
        assert!(state.events.iter().all(|e| e.minute <= MATCH_MINUTES));
        clock.dispose().await;
    }

    #[tokio::test]
    async fn pause_freezes_the_minute_and_double_pause_is_a_no_op() {
        let mut clock = MatchClock::new(Duration::from_millis(5), Some(3));
        clock.set_context(context());
        clock.start().unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        clock.pause().await;
        clock.pause().await;
        // Give the task time to drain the commands, then sample twice.
        tokio::time::sleep(Duration::from_millis(30)).await;
        let frozen = clock.snapshot().unwrap();
        assert!(!frozen.running);
        tokio::time::sleep(Duration::from_millis(60)).await;
        let still_frozen = clock.snapshot().unwrap();
        assert_eq!(frozen.minute, still_frozen.minute);
        assert_eq!(frozen.events.len(), still_frozen.events.len());

        clock.resume().await;
        clock.resume().await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        let moving = clock.snapshot().unwrap();
        assert!(moving.running || moving.ended);
        assert!(moving.minute > still_frozen.minute);
        clock.dispose().await;
    }

    #[tokio::test]
    async fn controls_after_full_time_are_no_ops() {
        let mut clock = MatchClock::new(Duration::from_millis(1), Some(4));
        clock.set_context(context());
        let mut snapshots = clock.start().unwrap();
        while snapshots.changed().await.is_ok() {}
        clock.pause().await;
        clock.resume().await;
        let final_state = clock.dispose().await.expect("final state available");
        assert!(final_state.ended);
        assert!(!final_state.running);
        assert_eq!(final_state.minute, MATCH_MINUTES);
    }
}
