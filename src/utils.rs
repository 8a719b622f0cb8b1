//! Utility functions for the scheduler

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};

use crate::types::CourtId;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an ISO `YYYY-MM-DD` game date
pub fn parse_game_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid game date '{}', expected YYYY-MM-DD", raw))
}

/// Parse a comma separated list of court ids, e.g. `1,3,4`
pub fn parse_court_ids(raw: &str) -> Result<Vec<CourtId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<CourtId>()
                .map_err(|_| anyhow!("Invalid court id '{}'", part))
        })
        .collect()
}
