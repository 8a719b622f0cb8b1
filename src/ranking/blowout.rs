//! Per-player blowout adjustments
//!
//! A blowout is a set won without the opponent scoring a game. Every player
//! on the winning side of such a set earns the bonus, every player on the
//! losing side pays it. The engine applies a player's net adjustment on each
//! of their set updates, so the index is built once per rebuild instead of
//! rescanning the history for every update.

use crate::config::RankingConfig;
use crate::types::{MatchResult, PlayerId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct BlowoutIndex {
    adjustments: HashMap<PlayerId, i64>,
}

impl BlowoutIndex {
    /// Build from every record in the history, completed or not
    pub fn build(results: &[MatchResult], config: &RankingConfig) -> Self {
        let bonus = i64::from(config.blowout_bonus);
        let mut adjustments: HashMap<PlayerId, i64> = HashMap::new();

        for result in results
            .iter()
            .filter(|r| config.is_blowout(r.pair1_score, r.pair2_score))
        {
            for player_id in unique_participants(result) {
                let Some(side) = result.side_of(player_id) else {
                    continue;
                };
                let delta = if side == result.winner { bonus } else { -bonus };
                *adjustments.entry(player_id).or_insert(0) += delta;
            }
        }

        Self { adjustments }
    }

    /// Net blowout adjustment for a player; zero when they have none
    pub fn adjustment(&self, player_id: PlayerId) -> i64 {
        self.adjustments.get(&player_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

/// The set's participants with duplicates removed
pub(crate) fn unique_participants(result: &MatchResult) -> Vec<PlayerId> {
    let mut players = result.participants().to_vec();
    players.sort_unstable();
    players.dedup();
    players
}
