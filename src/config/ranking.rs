//! Ranking engine configuration

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the ranking engine does with results naming players it does not know
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPlayerPolicy {
    /// Skip the unknown id and log a warning
    #[default]
    Ignore,
    /// Fail the whole rebuild
    Reject,
}

impl FromStr for UnknownPlayerPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(UnknownPlayerPolicy::Ignore),
            "reject" => Ok(UnknownPlayerPolicy::Reject),
            _ => Err(anyhow!("Invalid unknown player policy: {}", s)),
        }
    }
}

/// Point values used when rebuilding rankings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Awarded for every completed set played
    pub participation_points: u32,
    /// Added for a blowout win, subtracted for a blowout loss
    pub blowout_bonus: u32,
    /// Games won by the winning side in a blowout (opponent scores zero)
    pub blowout_games: u32,
    pub unknown_players: UnknownPlayerPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            participation_points: 1,
            blowout_bonus: 3,
            blowout_games: 6,
            unknown_players: UnknownPlayerPolicy::Ignore,
        }
    }
}

impl RankingConfig {
    /// Whether a score line counts as a blowout
    pub fn is_blowout(&self, pair1_score: u32, pair2_score: u32) -> bool {
        (pair1_score == self.blowout_games && pair2_score == 0)
            || (pair1_score == 0 && pair2_score == self.blowout_games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blowout_detection() {
        let config = RankingConfig::default();
        assert!(config.is_blowout(6, 0));
        assert!(config.is_blowout(0, 6));
        assert!(!config.is_blowout(6, 1));
        assert!(!config.is_blowout(7, 0));
        assert!(!config.is_blowout(0, 0));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "Reject".parse::<UnknownPlayerPolicy>().unwrap(),
            UnknownPlayerPolicy::Reject
        );
        assert!("drop".parse::<UnknownPlayerPolicy>().is_err());
    }
}
