//! Pairing allocator: validates a round request and builds court pairings
//!
//! Validation happens before anything else, so a rejected request has no
//! effect. Players past the court capacity cutoff are returned as the
//! waiting list rather than paired.

use crate::config::pairing::PLAYERS_PER_COURT;
use crate::config::{OverflowPolicy, PairingConfig};
use crate::error::{Result, SchedulingError};
use crate::pairing::strategy::{strategy_for, PairingStrategy, SeededPlayer};
use crate::types::{Court, CourtId, CourtPairing, Player, PlayerId, PlayerRanking};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Output of one generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub pairings: Vec<CourtPairing>,
    /// Players deferred past the court capacity, in priority order
    pub waiting: Vec<Player>,
}

impl Allocation {
    /// Every paired player id, court by court
    pub fn paired_players(&self) -> Vec<PlayerId> {
        self.pairings.iter().flat_map(|p| p.players()).collect()
    }
}

pub struct PairingAllocator {
    config: PairingConfig,
    strategy: Arc<dyn PairingStrategy>,
}

impl std::fmt::Debug for PairingAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairingAllocator")
            .field("config", &self.config)
            .field("mode", &self.strategy.mode())
            .finish()
    }
}

impl PairingAllocator {
    /// Create an allocator using the strategy the config selects
    pub fn new(config: PairingConfig) -> Self {
        let strategy = strategy_for(config.mode, config.random_seed);
        Self { config, strategy }
    }

    /// Create with a custom strategy
    pub fn with_strategy(config: PairingConfig, strategy: Arc<dyn PairingStrategy>) -> Self {
        Self { config, strategy }
    }

    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// Generate one round of court pairings
    ///
    /// `ranking_points` supplies balancing points; players without an entry
    /// count as zero.
    pub fn generate_pairings(
        &self,
        players: &[Player],
        courts: &[Court],
        ranking_points: &HashMap<PlayerId, u32>,
        sets: u32,
        game_date: NaiveDate,
    ) -> Result<Allocation> {
        self.validate(players, courts, sets)?;

        let pool: Vec<SeededPlayer> = players
            .iter()
            .map(|p| SeededPlayer {
                player_id: p.id,
                points: ranking_points.get(&p.id).copied().unwrap_or(0),
            })
            .collect();

        let mut ordered = self.strategy.order_pool(pool);

        let capacity = courts.len() * PLAYERS_PER_COURT;
        let deferred = if ordered.len() > capacity {
            ordered.split_off(capacity)
        } else {
            Vec::new()
        };

        let by_id: HashMap<PlayerId, &Player> = players.iter().map(|p| (p.id, p)).collect();
        let waiting: Vec<Player> = deferred
            .iter()
            .filter_map(|s| by_id.get(&s.player_id).map(|p| (*p).clone()))
            .collect();

        let pairings: Vec<CourtPairing> = self
            .strategy
            .assign(&ordered, courts)
            .into_iter()
            .map(|m| CourtPairing {
                court: m.court,
                pair1: m.pair1,
                pair2: m.pair2,
                sets,
                game_date,
            })
            .collect();

        info!(
            "Generated {} court pairings ({} mode) for {} - {} players paired, {} waiting",
            pairings.len(),
            self.strategy.mode(),
            game_date,
            pairings.len() * PLAYERS_PER_COURT,
            waiting.len()
        );

        Ok(Allocation { pairings, waiting })
    }

    fn validate(&self, players: &[Player], courts: &[Court], sets: u32) -> Result<()> {
        let count = players.len();

        if count < PLAYERS_PER_COURT {
            return Err(SchedulingError::NotEnoughPlayers { count }.into());
        }

        if count % PLAYERS_PER_COURT != 0 {
            return Err(SchedulingError::PlayerCountNotMultipleOfFour { count }.into());
        }

        let mut seen = HashSet::with_capacity(count);
        if let Some(duplicate) = players.iter().find(|p| !seen.insert(p.id)) {
            return Err(SchedulingError::DuplicatePlayer {
                player_id: duplicate.id,
            }
            .into());
        }

        let required = match self.config.overflow {
            OverflowPolicy::Reject => count / PLAYERS_PER_COURT,
            OverflowPolicy::WaitingList => 1,
        };
        if courts.len() < required {
            return Err(SchedulingError::NotEnoughCourts {
                required,
                available: courts.len(),
            }
            .into());
        }

        if sets == 0 {
            return Err(SchedulingError::InvalidSets { sets }.into());
        }

        debug!(
            "Pairing request valid: {} players, {} courts, {} sets",
            count,
            courts.len(),
            sets
        );

        Ok(())
    }
}

/// Narrow the court list to the requested ids, keeping the list order
pub fn select_courts(courts: &[Court], selected: Option<&[CourtId]>) -> Result<Vec<Court>> {
    let Some(selected) = selected else {
        return Ok(courts.to_vec());
    };

    if let Some(&court_id) = selected
        .iter()
        .find(|id| !courts.iter().any(|c| c.id == **id))
    {
        return Err(SchedulingError::UnknownCourt { court_id }.into());
    }

    Ok(courts
        .iter()
        .filter(|c| selected.contains(&c.id))
        .cloned()
        .collect())
}

/// Ranked allocation over a rankings table with default settings
pub fn allocate_pairings(
    players: &[Player],
    courts: &[Court],
    rankings: &[PlayerRanking],
    sets: u32,
    game_date: NaiveDate,
    selected_court_ids: Option<&[CourtId]>,
) -> Result<Vec<CourtPairing>> {
    let courts = select_courts(courts, selected_court_ids)?;
    let points: HashMap<PlayerId, u32> = rankings.iter().map(|r| (r.player_id, r.points)).collect();

    let allocation = PairingAllocator::new(PairingConfig::default())
        .generate_pairings(players, &courts, &points, sets, game_date)?;
    Ok(allocation.pairings)
}
