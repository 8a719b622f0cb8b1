//! Ranking engine: rebuilds every player's statistics from the result history
//!
//! Per completed set, each participant gets:
//! - one game played and `set_number` sets played
//! - the participation points
//! - `+set_number` points (and the win counters) for a win, `-set_number` for a loss
//! - their net blowout adjustment
//!
//! The running total is clamped at zero after each set update, so the order
//! of the history matters once a player dips below zero.

use crate::config::{RankingConfig, UnknownPlayerPolicy};
use crate::error::{Result, SchedulingError};
use crate::ranking::blowout::{unique_participants, BlowoutIndex};
use crate::types::{MatchResult, Player, PlayerId, PlayerRanking};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rebuild one ranking row per roster player from the full history
    ///
    /// Incomplete results are skipped. Results naming players outside the
    /// roster are handled according to the configured `UnknownPlayerPolicy`.
    pub fn recompute_rankings(
        &self,
        players: &[Player],
        results: &[MatchResult],
    ) -> Result<HashMap<PlayerId, PlayerRanking>> {
        let mut rankings: HashMap<PlayerId, PlayerRanking> = players
            .iter()
            .map(|p| (p.id, PlayerRanking::new(p.id)))
            .collect();

        let blowouts = BlowoutIndex::build(results, &self.config);
        let mut skipped = 0usize;

        for result in results.iter().filter(|r| r.completed) {
            for player_id in unique_participants(result) {
                let Some(ranking) = rankings.get_mut(&player_id) else {
                    match self.config.unknown_players {
                        UnknownPlayerPolicy::Ignore => {
                            warn!(
                                "Result {} references unknown player {} - skipping",
                                result.id, player_id
                            );
                            skipped += 1;
                            continue;
                        }
                        UnknownPlayerPolicy::Reject => {
                            return Err(SchedulingError::UnknownPlayer { player_id }.into());
                        }
                    }
                };

                self.apply_set(ranking, result, blowouts.adjustment(player_id));
            }
        }

        debug!(
            "Rebuilt rankings for {} players from {} results ({} blowout players, {} unknown references)",
            rankings.len(),
            results.len(),
            blowouts.len(),
            skipped
        );

        Ok(rankings)
    }

    /// Rebuild and return the rows ordered for presentation
    pub fn compute_rankings(
        &self,
        players: &[Player],
        results: &[MatchResult],
    ) -> Result<Vec<PlayerRanking>> {
        let mut rankings: Vec<PlayerRanking> = self
            .recompute_rankings(players, results)?
            .into_values()
            .collect();
        sort_rankings(&mut rankings);
        Ok(rankings)
    }

    fn apply_set(&self, ranking: &mut PlayerRanking, result: &MatchResult, blowout: i64) {
        let Some(side) = result.side_of(ranking.player_id) else {
            return;
        };
        let weight = result.set_number;

        ranking.games_played = ranking.games_played.saturating_add(1);
        ranking.sets_played = ranking.sets_played.saturating_add(weight);

        let mut points = i64::from(ranking.points) + i64::from(self.config.participation_points);

        if side == result.winner {
            ranking.games_won = ranking.games_won.saturating_add(1);
            ranking.sets_won = ranking.sets_won.saturating_add(weight);
            points += i64::from(weight);
        } else {
            points -= i64::from(weight);
        }

        points += blowout;

        ranking.points = u32::try_from(points.max(0)).unwrap_or(u32::MAX);
    }
}

/// Rankings with the default point values, in presentation order
pub fn compute_rankings(players: &[Player], results: &[MatchResult]) -> Result<Vec<PlayerRanking>> {
    RankingEngine::default().compute_rankings(players, results)
}

/// Order by points descending, then player id ascending
pub fn sort_rankings(rankings: &mut [PlayerRanking]) {
    rankings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
}
