//! Service layer for the doubles scheduler
//!
//! `SchedulerService` coordinates the repositories, the ranking engine and
//! the pairing allocator behind the operations the request layer exposes.

pub mod scheduler;

pub use scheduler::{GameRequest, SchedulerService};
