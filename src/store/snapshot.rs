//! JSON snapshot of the club's records
//!
//! The binary reads one of these instead of talking to a database.

use crate::error::{Result, SchedulingError};
use crate::store::repository::InMemoryRepository;
use crate::store::validation::{
    check_participants, check_set_number, check_unique_ids, settle_winner,
};
use crate::types::{Court, CourtId, MatchResult, Player};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub courts: Vec<Court>,
    pub results: Vec<MatchResult>,
}

impl Snapshot {
    /// Parse and validate a snapshot
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(raw).context("Failed to parse snapshot JSON")?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Check the records the way result entry would have
    ///
    /// Results naming players outside the roster are left to the ranking
    /// engine's unknown-player policy.
    pub fn validate(&self) -> Result<()> {
        check_unique_ids(&self.players)?;
        check_unique_ids(&self.courts)?;
        check_unique_ids(&self.results)?;

        let courts: HashSet<CourtId> = self.courts.iter().map(|c| c.id).collect();
        for result in &self.results {
            Self::validate_result(result, &courts)
                .with_context(|| format!("Invalid match result {} in snapshot", result.id))?;
        }

        Ok(())
    }

    fn validate_result(result: &MatchResult, courts: &HashSet<CourtId>) -> Result<()> {
        check_participants(result.participants())?;
        check_set_number(result.set_number)?;
        settle_winner(result.pair1_score, result.pair2_score, Some(result.winner))?;

        if !courts.contains(&result.court_id) {
            return Err(SchedulingError::UnknownCourt {
                court_id: result.court_id,
            }
            .into());
        }
        Ok(())
    }

    /// Split into seeded in-memory repositories
    pub fn into_repositories(
        self,
    ) -> (
        InMemoryRepository<Player>,
        InMemoryRepository<Court>,
        InMemoryRepository<MatchResult>,
    ) {
        (
            InMemoryRepository::with_items(self.players),
            InMemoryRepository::with_items(self.courts),
            InMemoryRepository::with_items(self.results),
        )
    }
}
