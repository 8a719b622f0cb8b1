//! Points ranking derived from recorded match results
//!
//! Rankings are never stored; every query rebuilds them from the full result
//! history. `StandingsCache` holds the last rebuild for readers.

pub mod blowout;
pub mod engine;
pub mod standings;

// Re-export commonly used types
pub use blowout::BlowoutIndex;
pub use engine::{compute_rankings, sort_rankings, RankingEngine};
pub use standings::{Standings, StandingsCache};
