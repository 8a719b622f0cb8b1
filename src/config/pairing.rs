//! Pairing allocator configuration

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which pairing strategy builds the round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Snake seeding on ranking points
    #[default]
    Ranked,
    /// Uniform shuffle, groups of four in order
    Random,
}

impl FromStr for AllocationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ranked" => Ok(AllocationMode::Ranked),
            "random" => Ok(AllocationMode::Random),
            _ => Err(anyhow!("Invalid allocation mode: {}", s)),
        }
    }
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationMode::Ranked => write!(f, "ranked"),
            AllocationMode::Random => write!(f, "random"),
        }
    }
}

/// What happens when more players are eligible than the courts can host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail validation when courts < players / 4
    #[default]
    Reject,
    /// Fill the courts and send the rest to the waiting list
    WaitingList,
}

impl FromStr for OverflowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "waiting_list" | "waiting-list" => Ok(OverflowPolicy::WaitingList),
            _ => Err(anyhow!("Invalid overflow policy: {}", s)),
        }
    }
}

/// Settings for generating a round of court pairings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Sets per match when the request does not say
    pub default_sets: u32,
    pub mode: AllocationMode,
    pub overflow: OverflowPolicy,
    /// Fixed seed for the random mode; fresh entropy when absent
    pub random_seed: Option<u64>,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            default_sets: 3,
            mode: AllocationMode::Ranked,
            overflow: OverflowPolicy::Reject,
            random_seed: None,
        }
    }
}

/// Players per court: two pairs of two
pub const PLAYERS_PER_COURT: usize = 4;
