//! Configuration management for the doubles scheduler
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for pairing and ranking.

pub mod app;
pub mod pairing;
pub mod ranking;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, CourtSettings, ServiceSettings};
pub use pairing::{AllocationMode, OverflowPolicy, PairingConfig};
pub use ranking::{RankingConfig, UnknownPlayerPolicy};
