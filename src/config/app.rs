//! Main application configuration
//!
//! This module defines the primary configuration structures for the doubles
//! scheduler, including environment variable loading, TOML files and validation.

use crate::config::pairing::PairingConfig;
use crate::config::ranking::RankingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub scheduling: PairingConfig,
    pub ranking: RankingConfig,
    pub courts: CourtSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Courts the club actually has
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtSettings {
    /// Names a court may be created with
    pub allowed_names: Vec<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "doubles-scheduler".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for CourtSettings {
    fn default() -> Self {
        Self {
            allowed_names: (1..=8).map(|n| format!("Court {}", n)).collect(),
        }
    }
}

impl CourtSettings {
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed_names.iter().any(|allowed| allowed == name)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Scheduling settings
        if let Ok(sets) = env::var("DEFAULT_SETS") {
            self.scheduling.default_sets = sets
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_SETS value: {}", sets))?;
        }
        if let Ok(mode) = env::var("ALLOCATION_MODE") {
            self.scheduling.mode = mode.parse()?;
        }
        if let Ok(policy) = env::var("OVERFLOW_POLICY") {
            self.scheduling.overflow = policy.parse()?;
        }
        if let Ok(seed) = env::var("RANDOM_SEED") {
            self.scheduling.random_seed = Some(
                seed.parse()
                    .map_err(|_| anyhow!("Invalid RANDOM_SEED value: {}", seed))?,
            );
        }

        // Ranking settings
        if let Ok(points) = env::var("PARTICIPATION_POINTS") {
            self.ranking.participation_points = points
                .parse()
                .map_err(|_| anyhow!("Invalid PARTICIPATION_POINTS value: {}", points))?;
        }
        if let Ok(bonus) = env::var("BLOWOUT_BONUS") {
            self.ranking.blowout_bonus = bonus
                .parse()
                .map_err(|_| anyhow!("Invalid BLOWOUT_BONUS value: {}", bonus))?;
        }
        if let Ok(policy) = env::var("UNKNOWN_PLAYER_POLICY") {
            self.ranking.unknown_players = policy.parse()?;
        }

        // Courts
        if let Ok(names) = env::var("COURT_NAMES") {
            self.courts.allowed_names = names
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.scheduling.default_sets == 0 {
        return Err(anyhow!("Default sets must be greater than 0"));
    }

    if config.ranking.blowout_games == 0 {
        return Err(anyhow!("Blowout games must be greater than 0"));
    }

    // Validate court allow-list
    if config.courts.allowed_names.is_empty() {
        return Err(anyhow!("At least one court name must be allowed"));
    }
    let mut names: Vec<&String> = config.courts.allowed_names.iter().collect();
    names.sort();
    if names.windows(2).any(|w| w[0] == w[1]) {
        return Err(anyhow!("Allowed court names must be unique"));
    }

    Ok(())
}
