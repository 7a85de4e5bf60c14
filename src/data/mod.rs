pub mod models;
pub mod squad;

pub use models::{Abilities, Player, Position, PositionGroup, Team, TeamRatings};
pub use squad::{auto_select, validate_squad, SquadError};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct TeamsFile {
    teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
struct PlayersFile {
    players: Vec<Player>,
}

/// Static reference data: every known team and player, loaded once at
/// startup. The engine never touches the files itself — it only consumes
/// rosters and team records handed to it by the host.
#[derive(Debug, Clone)]
pub struct DataSet {
    teams: Vec<Team>,
    players: Vec<Player>,
}

impl DataSet {
    /// Load and parse the two JSON reference files.
    pub fn load(teams_path: &Path, players_path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(teams_path)
            .with_context(|| format!("reading teams file {}", teams_path.display()))?;
        let teams: TeamsFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing teams file {}", teams_path.display()))?;

        let raw = fs::read_to_string(players_path)
            .with_context(|| format!("reading players file {}", players_path.display()))?;
        let players: PlayersFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing players file {}", players_path.display()))?;

        info!(
            "Reference data loaded: {} teams, {} players",
            teams.teams.len(),
            players.players.len()
        );

        Ok(DataSet {
            teams: teams.teams,
            players: players.players,
        })
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// All players registered to the given team.
    pub fn players_of(&self, team_id: &str) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect()
    }
}
