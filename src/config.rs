use clap::Parser;
use std::path::PathBuf;

use crate::engine::tactics::TacticPreset;

/// Football club match simulator
#[derive(Parser, Debug, Clone)]
#[command(name = "matchday", version, about)]
pub struct Config {
    /// Teams reference data (JSON)
    #[arg(long, env = "TEAMS_FILE", default_value = "data/teams.json")]
    pub teams_file: PathBuf,

    /// Players reference data (JSON)
    #[arg(long, env = "PLAYERS_FILE", default_value = "data/players.json")]
    pub players_file: PathBuf,

    /// Home team id
    #[arg(long, env = "HOME_TEAM", default_value = "idn")]
    pub home_team: String,

    /// Away team id
    #[arg(long, env = "AWAY_TEAM", default_value = "jpn")]
    pub away_team: String,

    /// Which side the user manages: "home" or "away" (the other side's
    /// squad and tactics are picked by the AI)
    #[arg(long, env = "PLAYER_SIDE", default_value = "home")]
    pub side: String,

    /// Tactic preset for the user's side: balanced, attacking, defensive,
    /// counter or high-press
    #[arg(long, env = "TACTIC_PRESET", default_value = "balanced")]
    pub preset: String,

    /// Real-time milliseconds per simulated minute
    #[arg(long, env = "TICK_MS", default_value = "250")]
    pub tick_ms: u64,

    /// RNG seed for deterministic replay
    #[arg(long, env = "SIM_SEED")]
    pub seed: Option<u64>,

    /// Simulate straight to full time instead of ticking in real time
    #[arg(long, env = "FAST", default_value = "false")]
    pub fast: bool,

    /// Number of headless matches to simulate; values above 1 print an
    /// aggregate report instead of a per-match feed
    #[arg(long, env = "MATCHES", default_value = "1")]
    pub matches: u32,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.home_team == self.away_team {
            anyhow::bail!("home and away team must differ");
        }
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be positive");
        }
        if self.matches == 0 {
            anyhow::bail!("matches must be at least 1");
        }
        if !matches!(self.side.as_str(), "home" | "away") {
            anyhow::bail!("side must be \"home\" or \"away\", got \"{}\"", self.side);
        }
        self.preset
            .parse::<TacticPreset>()
            .map_err(anyhow::Error::msg)?;
        Ok(())
    }
}
