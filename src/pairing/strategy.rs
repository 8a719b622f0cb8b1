//! Pairing strategies for turning a player pool into court matches
//!
//! A strategy decides two things: the priority order of the pool (players
//! past the court capacity cutoff wait) and how the admitted players are
//! split into pairs and courts.

use crate::config::AllocationMode;
use crate::config::pairing::PLAYERS_PER_COURT;
use crate::types::{Court, Pair, PlayerId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// A pool entry with the points used for balancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededPlayer {
    pub player_id: PlayerId,
    pub points: u32,
}

/// One court's match before sets and date are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtMatch {
    pub court: Court,
    pub pair1: Pair,
    pub pair2: Pair,
}

/// Trait for pairing algorithms
pub trait PairingStrategy: Send + Sync {
    /// Which mode this strategy implements
    fn mode(&self) -> AllocationMode;

    /// Order the pool by priority, highest first
    fn order_pool(&self, pool: Vec<SeededPlayer>) -> Vec<SeededPlayer>;

    /// Split an ordered pool into pairs and put them on courts
    fn assign(&self, pool: &[SeededPlayer], courts: &[Court]) -> Vec<CourtMatch>;
}

/// Ranked snake seeding
///
/// Seed `i` partners seed `N-1-i`, so every pair mixes a strong and a weak
/// player. Pairs are then ranked by combined points and court `j` gets pair
/// `j` against pair `M-1-j`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeSeeding;

impl SnakeSeeding {
    pub fn new() -> Self {
        Self
    }

    /// Pair seed `i` with seed `N-1-i`, returning each pair with its combined points
    pub fn seed_pairs(pool: &[SeededPlayer]) -> Vec<(Pair, u64)> {
        let n = pool.len();
        (0..n / 2)
            .map(|i| {
                let top = pool[i];
                let bottom = pool[n - 1 - i];
                (
                    Pair::new(top.player_id, bottom.player_id),
                    u64::from(top.points) + u64::from(bottom.points),
                )
            })
            .collect()
    }
}

impl PairingStrategy for SnakeSeeding {
    fn mode(&self) -> AllocationMode {
        AllocationMode::Ranked
    }

    fn order_pool(&self, mut pool: Vec<SeededPlayer>) -> Vec<SeededPlayer> {
        // Stable: equal points keep input order
        pool.sort_by(|a, b| b.points.cmp(&a.points));
        pool
    }

    fn assign(&self, pool: &[SeededPlayer], courts: &[Court]) -> Vec<CourtMatch> {
        let mut pairs = Self::seed_pairs(pool);
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        let m = pairs.len();
        let mut matches = Vec::with_capacity(courts.len().min(m / 2));

        for (j, court) in courts.iter().enumerate() {
            if 2 * j + 1 >= m {
                if 2 * j + 1 == m {
                    warn!(
                        "Odd pair count ({}), pair {:?} left without an opponent",
                        m, pairs[j].0
                    );
                }
                break;
            }

            let (pair1, strength1) = pairs[j];
            let (pair2, strength2) = pairs[m - 1 - j];
            debug!(
                "{}: {:?} ({}) vs {:?} ({})",
                court.name, pair1, strength1, pair2, strength2
            );

            matches.push(CourtMatch {
                court: court.clone(),
                pair1,
                pair2,
            });
        }

        matches
    }
}

/// Uniform shuffle, then groups of four in order
///
/// Used when ranking data is missing or unwanted.
#[derive(Debug)]
pub struct RandomShuffle {
    rng: Mutex<StdRng>,
}

impl RandomShuffle {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible shuffles
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl PairingStrategy for RandomShuffle {
    fn mode(&self) -> AllocationMode {
        AllocationMode::Random
    }

    fn order_pool(&self, mut pool: Vec<SeededPlayer>) -> Vec<SeededPlayer> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        pool.shuffle(&mut *rng);
        pool
    }

    fn assign(&self, pool: &[SeededPlayer], courts: &[Court]) -> Vec<CourtMatch> {
        pool.chunks_exact(PLAYERS_PER_COURT)
            .zip(courts)
            .map(|(group, court)| CourtMatch {
                court: court.clone(),
                pair1: Pair::new(group[0].player_id, group[1].player_id),
                pair2: Pair::new(group[2].player_id, group[3].player_id),
            })
            .collect()
    }
}

/// Build the strategy for a configured mode
pub fn strategy_for(mode: AllocationMode, seed: Option<u64>) -> Arc<dyn PairingStrategy> {
    match mode {
        AllocationMode::Ranked => Arc::new(SnakeSeeding::new()),
        AllocationMode::Random => match seed {
            Some(seed) => Arc::new(RandomShuffle::with_seed(seed)),
            None => Arc::new(RandomShuffle::new()),
        },
    }
}
