use thiserror::Error;
use tracing::info;

use super::models::{Player, Position};
use crate::engine::rating::player_composite;

/// A matchday squad is always eleven players with exactly one goalkeeper.
pub const SQUAD_SIZE: usize = 11;

/// Squad-picker validation failures. These are host-side errors: a squad
/// is rejected here, before the simulation engine is ever invoked, and the
/// engine itself never re-validates roster shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquadError {
    #[error("squad must have exactly {SQUAD_SIZE} players, got {0}")]
    WrongSize(usize),
    #[error("squad must include a goalkeeper")]
    NoGoalkeeper,
    #[error("squad must include exactly one goalkeeper, got {0}")]
    TooManyGoalkeepers(usize),
    #[error("not enough players to field a squad: {0}")]
    NotEnoughPlayers(String),
}

/// Validate a confirmed squad selection: exactly eleven players, exactly
/// one of them a goalkeeper.
pub fn validate_squad(squad: &[Player]) -> Result<(), SquadError> {
    if squad.len() != SQUAD_SIZE {
        return Err(SquadError::WrongSize(squad.len()));
    }
    let goalkeepers = squad
        .iter()
        .filter(|p| p.position == Position::GK)
        .count();
    match goalkeepers {
        0 => Err(SquadError::NoGoalkeeper),
        1 => Ok(()),
        n => Err(SquadError::TooManyGoalkeepers(n)),
    }
}

/// Pick the AI side's starting eleven from a team's full player pool: the
/// strongest goalkeeper plus the ten strongest outfielders, ranked by the
/// rating model's position-weighted composite.
pub fn auto_select(pool: &[Player]) -> Result<Vec<Player>, SquadError> {
    let mut goalkeepers: Vec<&Player> = pool
        .iter()
        .filter(|p| p.position == Position::GK)
        .collect();
    goalkeepers.sort_by(|a, b| {
        player_composite(b, None)
            .partial_cmp(&player_composite(a, None))
            .expect("composite is never NaN")
    });
    let Some(keeper) = goalkeepers.first() else {
        return Err(SquadError::NoGoalkeeper);
    };

    let mut outfield: Vec<&Player> = pool
        .iter()
        .filter(|p| p.position != Position::GK)
        .collect();
    if outfield.len() < SQUAD_SIZE - 1 {
        return Err(SquadError::NotEnoughPlayers(format!(
            "{} outfield players available, need {}",
            outfield.len(),
            SQUAD_SIZE - 1
        )));
    }
    outfield.sort_by(|a, b| {
        player_composite(b, None)
            .partial_cmp(&player_composite(a, None))
            .expect("composite is never NaN")
    });

    let mut squad: Vec<Player> = Vec::with_capacity(SQUAD_SIZE);
    squad.push((*keeper).clone());
    squad.extend(outfield[..SQUAD_SIZE - 1].iter().map(|p| (*p).clone()));

    validate_squad(&squad)?;
    info!(
        "Auto-selected squad: {} ({} in goal)",
        squad
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        keeper.name
    );
    Ok(squad)
}
