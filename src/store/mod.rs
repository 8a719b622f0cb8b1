//! Storage interfaces for players, courts and recorded results
//!
//! The scheduling core only ever talks to the `Repository` trait; the
//! in-memory implementation here is what the binary and tests use.

pub mod repository;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use repository::{Entity, InMemoryRepository, Repository};
pub use snapshot::Snapshot;
