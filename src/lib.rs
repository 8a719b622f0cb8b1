//! Doubles Scheduler - rankings and court pairings for a recreational club
//!
//! This crate rebuilds player standings from recorded set results and
//! generates balanced doubles pairings for the selected players.

pub mod config;
pub mod error;
pub mod pairing;
pub mod ranking;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, SchedulingError};
pub use types::*;

// Re-export key components
pub use pairing::{allocate_pairings, PairingAllocator};
pub use ranking::{compute_rankings, RankingEngine};
pub use service::{GameRequest, SchedulerService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
