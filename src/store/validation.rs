//! Record checks shared by result entry and snapshot loading

use crate::error::{Result, SchedulingError};
use crate::store::repository::Entity;
use crate::types::{PlayerId, Winner};
use std::collections::HashSet;

fn invalid(reason: impl Into<String>) -> anyhow::Error {
    SchedulingError::InvalidResult {
        reason: reason.into(),
    }
    .into()
}

/// The four players of a set must all be different people
pub fn check_participants(participants: [PlayerId; 4]) -> Result<()> {
    let distinct: HashSet<PlayerId> = participants.iter().copied().collect();
    if distinct.len() != participants.len() {
        return Err(invalid("the four players must be distinct"));
    }
    Ok(())
}

pub fn check_set_number(set_number: u32) -> Result<()> {
    if set_number == 0 {
        return Err(invalid("set number starts at 1"));
    }
    Ok(())
}

/// Resolve the winner of a set
///
/// A declared winner must be the pair with the higher score. On tied scores
/// the declared winner stands, and pair1 wins when none is declared.
pub fn settle_winner(
    pair1_score: u32,
    pair2_score: u32,
    declared: Option<Winner>,
) -> Result<Winner> {
    let derived = Winner::from_scores(pair1_score, pair2_score);
    match declared {
        Some(declared) if pair1_score != pair2_score && declared != derived => {
            Err(invalid("winner must be the pair with the higher score"))
        }
        Some(declared) => Ok(declared),
        None => Ok(derived),
    }
}

/// Every record id must appear once
pub fn check_unique_ids<T: Entity>(items: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(SchedulingError::DuplicateRecord {
                entity: T::KIND,
                id: item.id(),
            }
            .into());
        }
    }
    Ok(())
}
