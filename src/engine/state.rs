use chrono::{DateTime, Utc};
use serde::Serialize;

/// Regulation length of a simulated fixture, in match minutes.
pub const MATCH_MINUTES: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Goal,
    Commentary,
}

/// One entry in the append-only match log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvent {
    pub minute: u8,
    pub side: Side,
    pub kind: EventKind,
    pub text: String,
    /// Present on goal events when an attack-eligible scorer was found.
    pub scorer: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Live state of one simulated fixture. Mutated exclusively by the
/// simulation engine's tick handler; the host only ever observes
/// snapshots of it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchState {
    /// Current match minute, 0..=90, never decreasing.
    pub minute: u8,
    pub score: Score,
    /// Append-only, ordered by non-decreasing minute.
    pub events: Vec<MatchEvent>,
    /// Whether the clock is actively ticking.
    pub running: bool,
    /// Terminal flag; set once the match reaches full time.
    pub ended: bool,
    /// Wall-clock kickoff stamp, set when the clock starts.
    pub kicked_off_at: Option<DateTime<Utc>>,
}

impl Default for MatchState {
    fn default() -> Self {
        MatchState {
            minute: 0,
            score: Score::default(),
            events: Vec::new(),
            running: false,
            ended: false,
            kicked_off_at: None,
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    fn last_event_minute(&self) -> u8 {
        self.events.last().map(|e| e.minute).unwrap_or(0)
    }

    /// Append a goal event and bump the matching score counter in one
    /// step, so the score always equals the per-side goal-event count.
    pub fn record_goal(&mut self, minute: u8, side: Side, text: String, scorer: Option<String>) {
        debug_assert!(minute >= self.last_event_minute(), "event log must stay ordered");
        debug_assert!(!self.ended, "no events after full time");
        self.events.push(MatchEvent {
            minute,
            side,
            kind: EventKind::Goal,
            text,
            scorer,
        });
        match side {
            Side::Home => self.score.home += 1,
            Side::Away => self.score.away += 1,
        }
    }

    /// Append a colour-commentary event.
    pub fn record_commentary(&mut self, minute: u8, side: Side, text: String) {
        debug_assert!(minute >= self.last_event_minute(), "event log must stay ordered");
        debug_assert!(!self.ended, "no events after full time");
        self.events.push(MatchEvent {
            minute,
            side,
            kind: EventKind::Commentary,
            text,
            scorer: None,
        });
    }

    /// Count of goal events credited to one side.
    pub fn goal_events(&self, side: Side) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Goal && e.side == side)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle_and_scoreless() {
        let state = MatchState::new();
        assert_eq!(state.minute, 0);
        assert_eq!(state.score, Score::default());
        assert!(state.events.is_empty());
        assert!(!state.running);
        assert!(!state.ended);
        assert!(state.kicked_off_at.is_none());
    }

    #[test]
    fn recording_goals_keeps_score_and_log_in_lockstep() {
        let mut state = MatchState::new();
        state.record_goal(12, Side::Home, "Goal!".into(), Some("Ivar".into()));
        state.record_commentary(30, Side::Away, "Patient build-up".into());
        state.record_goal(55, Side::Away, "Goal!".into(), None);
        state.record_goal(83, Side::Home, "Goal!".into(), Some("Dani".into()));

        assert_eq!(state.score, Score { home: 2, away: 1 });
        assert_eq!(state.goal_events(Side::Home), 2);
        assert_eq!(state.goal_events(Side::Away), 1);
        assert_eq!(state.events.len(), 4);
    }

    #[test]
    fn event_minutes_are_non_decreasing() {
        let mut state = MatchState::new();
        state.record_commentary(5, Side::Home, "a".into());
        state.record_commentary(5, Side::Away, "b".into());
        state.record_goal(20, Side::Home, "c".into(), None);
        let minutes: Vec<u8> = state.events.iter().map(|e| e.minute).collect();
        let mut sorted = minutes.clone();
        sorted.sort_unstable();
        assert_eq!(minutes, sorted);
    }

    #[test]
    fn goal_without_scorer_is_recorded() {
        let mut state = MatchState::new();
        state.record_goal(44, Side::Away, "Goal!".into(), None);
        assert_eq!(state.events[0].scorer, None);
        assert_eq!(state.score.away, 1);
    }
}
