//! Ranked standings snapshot and the cache readers share
//!
//! A rebuild produces a whole new `Standings`; the cache swaps the `Arc` under
//! a write lock so readers see either the previous or the new table.

use crate::error::{Result, SchedulingError};
use crate::ranking::engine::sort_rankings;
use crate::types::{PlayerId, PlayerRanking};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Rankings in presentation order with a lookup by player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    rankings: Vec<PlayerRanking>,
    positions: HashMap<PlayerId, usize>,
}

impl Standings {
    pub fn new(mut rankings: Vec<PlayerRanking>) -> Self {
        sort_rankings(&mut rankings);
        let positions = rankings
            .iter()
            .enumerate()
            .map(|(index, r)| (r.player_id, index))
            .collect();

        Self {
            rankings,
            positions,
        }
    }

    pub fn from_map(rankings: HashMap<PlayerId, PlayerRanking>) -> Self {
        Self::new(rankings.into_values().collect())
    }

    pub fn rankings(&self) -> &[PlayerRanking] {
        &self.rankings
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&PlayerRanking> {
        self.positions
            .get(&player_id)
            .map(|&index| &self.rankings[index])
    }

    /// 1-based table position
    pub fn position(&self, player_id: PlayerId) -> Option<usize> {
        self.positions.get(&player_id).map(|index| index + 1)
    }

    /// Current points; players without a row have none
    pub fn points(&self, player_id: PlayerId) -> u32 {
        self.get(player_id).map_or(0, |r| r.points)
    }

    /// Points keyed by player, the shape the allocator consumes
    pub fn points_by_player(&self) -> HashMap<PlayerId, u32> {
        self.rankings
            .iter()
            .map(|r| (r.player_id, r.points))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}

/// Holds the most recent full rebuild
#[derive(Debug, Default)]
pub struct StandingsCache {
    current: RwLock<Arc<Standings>>,
}

impl StandingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Result<Arc<Standings>> {
        let current = self.current.read().map_err(|_| SchedulingError::Storage {
            message: "Failed to acquire standings read lock".to_string(),
        })?;
        Ok(Arc::clone(&*current))
    }

    /// Swap in a fully rebuilt table
    pub fn replace(&self, standings: Standings) -> Result<Arc<Standings>> {
        let standings = Arc::new(standings);
        let mut current = self.current.write().map_err(|_| SchedulingError::Storage {
            message: "Failed to acquire standings write lock".to_string(),
        })?;
        *current = Arc::clone(&standings);
        Ok(standings)
    }
}
