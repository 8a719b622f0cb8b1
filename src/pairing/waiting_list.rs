//! Waiting list for players who did not fit on the courts

use crate::error::{Result, SchedulingError};
use crate::types::{Player, PlayerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingEntry {
    pub player_id: PlayerId,
    pub game_date: NaiveDate,
}

/// Trait for collecting deferred players
pub trait WaitingList: Send + Sync {
    /// Queue players for a game date, in the order given
    fn defer(&self, game_date: NaiveDate, players: &[Player]) -> Result<()>;

    /// Everyone currently waiting, oldest first
    fn entries(&self) -> Result<Vec<WaitingEntry>>;

    /// Drop all entries for a game date, returning how many were removed
    fn clear(&self, game_date: NaiveDate) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct InMemoryWaitingList {
    entries: RwLock<Vec<WaitingEntry>>,
}

impl InMemoryWaitingList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WaitingList for InMemoryWaitingList {
    fn defer(&self, game_date: NaiveDate, players: &[Player]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| SchedulingError::Storage {
            message: "Failed to acquire waiting list write lock".to_string(),
        })?;

        for player in players {
            let already_waiting = entries
                .iter()
                .any(|e| e.player_id == player.id && e.game_date == game_date);
            if !already_waiting {
                entries.push(WaitingEntry {
                    player_id: player.id,
                    game_date,
                });
            }
        }

        Ok(())
    }

    fn entries(&self) -> Result<Vec<WaitingEntry>> {
        let entries = self.entries.read().map_err(|_| SchedulingError::Storage {
            message: "Failed to acquire waiting list read lock".to_string(),
        })?;
        Ok(entries.clone())
    }

    fn clear(&self, game_date: NaiveDate) -> Result<usize> {
        let mut entries = self.entries.write().map_err(|_| SchedulingError::Storage {
            message: "Failed to acquire waiting list write lock".to_string(),
        })?;

        let before = entries.len();
        entries.retain(|e| e.game_date != game_date);
        Ok(before - entries.len())
    }
}
