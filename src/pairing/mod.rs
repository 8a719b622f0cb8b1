//! Court pairing for the next round of doubles
//!
//! This module handles validation of a round request, skill-balanced or
//! random pairing, court assignment and the waiting list for overflow.

pub mod allocator;
pub mod strategy;
pub mod waiting_list;

// Re-export commonly used types
pub use allocator::{allocate_pairings, select_courts, Allocation, PairingAllocator};
pub use strategy::{PairingStrategy, RandomShuffle, SeededPlayer, SnakeSeeding};
pub use waiting_list::{InMemoryWaitingList, WaitingEntry, WaitingList};
