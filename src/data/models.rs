use serde::{Deserialize, Serialize};

/// On-pitch position codes used in the player reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Goalkeeper
    GK,
    /// Centre-back
    CB,
    /// Left-back
    LB,
    /// Right-back
    RB,
    /// Defensive midfielder
    DM,
    /// Central midfielder
    CM,
    /// Left midfielder
    LM,
    /// Right midfielder
    RM,
    /// Attacking midfielder
    AM,
    /// Left winger
    LW,
    /// Right winger
    RW,
    /// Striker
    ST,
}

/// Coarse position class used by the rating model's weight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionGroup {
    Goalkeeper,
    Defence,
    Midfield,
    Attack,
}

impl Position {
    pub fn group(&self) -> PositionGroup {
        match self {
            Position::GK => PositionGroup::Goalkeeper,
            Position::CB | Position::LB | Position::RB => PositionGroup::Defence,
            Position::DM | Position::CM | Position::LM | Position::RM => PositionGroup::Midfield,
            Position::AM | Position::LW | Position::RW | Position::ST => PositionGroup::Attack,
        }
    }

    /// Whether this position is in the scorer-selection pool: forwards,
    /// wingers and the attacking/central midfielders.
    pub fn is_attack_eligible(&self) -> bool {
        matches!(
            self,
            Position::ST | Position::LW | Position::RW | Position::AM | Position::CM
        )
    }
}

/// A player's raw ability vector. Every attribute is on a 0–100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Abilities {
    pub pace: f64,
    pub shooting: f64,
    pub passing: f64,
    pub dribbling: f64,
    pub defending: f64,
    pub physical: f64,
    pub positioning: f64,
    /// Shot-stopping reaction quality; only meaningful for goalkeepers.
    pub reflexes: f64,
}

/// A single player record. Immutable once loaded from the reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team_id: String,
    pub position: Position,
    pub abilities: Abilities,
}

/// Baseline team-level ratings, each 0–100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamRatings {
    pub attack: f64,
    pub defense: f64,
    pub possession: f64,
}

/// A team reference record. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub ratings: TeamRatings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_groups() {
        assert_eq!(Position::GK.group(), PositionGroup::Goalkeeper);
        assert_eq!(Position::CB.group(), PositionGroup::Defence);
        assert_eq!(Position::LB.group(), PositionGroup::Defence);
        assert_eq!(Position::DM.group(), PositionGroup::Midfield);
        assert_eq!(Position::LM.group(), PositionGroup::Midfield);
        assert_eq!(Position::ST.group(), PositionGroup::Attack);
        assert_eq!(Position::AM.group(), PositionGroup::Attack);
    }

    #[test]
    fn attack_eligibility_pool() {
        for pos in [
            Position::ST,
            Position::LW,
            Position::RW,
            Position::AM,
            Position::CM,
        ] {
            assert!(pos.is_attack_eligible(), "{:?} should be eligible", pos);
        }
        for pos in [Position::GK, Position::CB, Position::DM, Position::LB] {
            assert!(!pos.is_attack_eligible(), "{:?} should not be eligible", pos);
        }
    }

    #[test]
    fn team_ratings_flattened_in_json() {
        let json = r#"{"id":"idn","name":"Indonesia","attack":64,"defense":61,"possession":58}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.id, "idn");
        assert!((team.ratings.attack - 64.0).abs() < 1e-9);
        assert!((team.ratings.possession - 58.0).abs() < 1e-9);
    }
}
