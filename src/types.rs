//! Common types used throughout the doubles scheduler

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = u32;

/// Unique identifier for courts
pub type CourtId = u32;

/// Unique identifier for recorded match results
pub type ResultId = u32;

/// Access role of a registered player
///
/// The scheduling core never looks at this; it is carried for the
/// access-control layer in front of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Player,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Admins and super-admins may generate games and manage results
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// A registered club member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation_number: Option<String>,
    /// Selected for the next round of games
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub role: Role,
}

/// Registration request for a new player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub affiliation_number: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// A physical court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
}

/// Two players playing on the same side
///
/// Order is kept for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub player1: PlayerId,
    pub player2: PlayerId,
}

impl Pair {
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self { player1, player2 }
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.player1 == player_id || self.player2 == player_id
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.player1, self.player2]
    }
}

/// One court's match in a generated round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtPairing {
    pub court: Court,
    pub pair1: Pair,
    pub pair2: Pair,
    pub sets: u32,
    pub game_date: NaiveDate,
}

impl CourtPairing {
    /// All four participants, pair1 first
    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.pair1.player1,
            self.pair1.player2,
            self.pair2.player1,
            self.pair2.player2,
        ]
    }
}

/// Which side won a set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    #[default]
    Pair1,
    Pair2,
}

impl Winner {
    /// Winner implied by the scores; equal scores go to pair1
    pub fn from_scores(pair1_score: u32, pair2_score: u32) -> Self {
        if pair2_score > pair1_score {
            Winner::Pair2
        } else {
            Winner::Pair1
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Pair1 => write!(f, "pair1"),
            Winner::Pair2 => write!(f, "pair2"),
        }
    }
}

/// A recorded single-set result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: ResultId,
    pub pair1: Pair,
    pub pair2: Pair,
    pub court_id: CourtId,
    /// 1-based, increasing per pairing
    pub set_number: u32,
    pub pair1_score: u32,
    pub pair2_score: u32,
    pub winner: Winner,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<NaiveDate>,
}

fn default_completed() -> bool {
    true
}

impl MatchResult {
    /// Side the player was on, if they played in this set
    pub fn side_of(&self, player_id: PlayerId) -> Option<Winner> {
        if self.pair1.contains(player_id) {
            Some(Winner::Pair1)
        } else if self.pair2.contains(player_id) {
            Some(Winner::Pair2)
        } else {
            None
        }
    }

    pub fn participants(&self) -> [PlayerId; 4] {
        [
            self.pair1.player1,
            self.pair1.player2,
            self.pair2.player1,
            self.pair2.player2,
        ]
    }

    /// Whether this is the same pairing (same court, same two pairs in either order)
    pub fn same_pairing(&self, other: &NewMatchResult) -> bool {
        self.court_id == other.court_id
            && ((self.pair1 == other.pair1 && self.pair2 == other.pair2)
                || (self.pair1 == other.pair2 && self.pair2 == other.pair1))
    }
}

/// Result submission coming from the results-entry form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatchResult {
    pub pair1: Pair,
    pub pair2: Pair,
    pub court_id: CourtId,
    pub set_number: u32,
    pub pair1_score: u32,
    pub pair2_score: u32,
    /// Derived from the scores when absent
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
}

/// Aggregate statistics for one player, derived from the result history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub player_id: PlayerId,
    pub games_played: u32,
    pub games_won: u32,
    pub sets_played: u32,
    pub sets_won: u32,
    pub points: u32,
}

impl PlayerRanking {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ..Default::default()
        }
    }
}
