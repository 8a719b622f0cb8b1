//! Test fixtures and recording implementations for integration testing

#![allow(dead_code)]

use chrono::NaiveDate;
use doubles_scheduler::config::AppConfig;
use doubles_scheduler::error::Result;
use doubles_scheduler::pairing::{WaitingEntry, WaitingList};
use doubles_scheduler::service::SchedulerService;
use doubles_scheduler::store::InMemoryRepository;
use doubles_scheduler::types::{
    Court, MatchResult, NewMatchResult, Pair, Player, PlayerId, Role, Winner,
};
use std::sync::{Arc, Mutex};

/// Waiting list that records every deferral for inspection
#[derive(Debug, Default)]
pub struct RecordingWaitingList {
    deferred: Arc<Mutex<Vec<WaitingEntry>>>,
    defer_calls: Arc<Mutex<usize>>,
}

impl RecordingWaitingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `defer` was called
    pub fn defer_calls(&self) -> usize {
        self.defer_calls.lock().map(|calls| *calls).unwrap_or_default()
    }

    pub fn deferred_ids(&self) -> Vec<PlayerId> {
        self.deferred
            .lock()
            .map(|entries| entries.iter().map(|e| e.player_id).collect())
            .unwrap_or_default()
    }
}

impl WaitingList for RecordingWaitingList {
    fn defer(&self, game_date: NaiveDate, players: &[Player]) -> Result<()> {
        if let Ok(mut calls) = self.defer_calls.lock() {
            *calls += 1;
        }
        if let Ok(mut entries) = self.deferred.lock() {
            entries.extend(players.iter().map(|p| WaitingEntry {
                player_id: p.id,
                game_date,
            }));
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<WaitingEntry>> {
        Ok(self
            .deferred
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }

    fn clear(&self, game_date: NaiveDate) -> Result<usize> {
        let mut entries = self.deferred.lock().map_err(|_| {
            doubles_scheduler::SchedulingError::Storage {
                message: "poisoned".to_string(),
            }
        })?;
        let before = entries.len();
        entries.retain(|e| e.game_date != game_date);
        Ok(before - entries.len())
    }
}

pub fn game_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 13).unwrap()
}

pub fn player(id: PlayerId, selected: bool) -> Player {
    Player {
        id,
        name: format!("Player {}", id),
        alias: None,
        phone: None,
        affiliation_number: None,
        selected,
        role: Role::Player,
    }
}

/// Players `1..=count`, all selected
pub fn roster(count: u32) -> Vec<Player> {
    (1..=count).map(|id| player(id, true)).collect()
}

/// Courts `1..=count` named after their id
pub fn courts(count: u32) -> Vec<Court> {
    (1..=count)
        .map(|id| Court {
            id,
            name: format!("Court {}", id),
        })
        .collect()
}

pub fn result(
    id: u32,
    pair1: (PlayerId, PlayerId),
    pair2: (PlayerId, PlayerId),
    set_number: u32,
    scores: (u32, u32),
) -> MatchResult {
    MatchResult {
        id,
        pair1: Pair::new(pair1.0, pair1.1),
        pair2: Pair::new(pair2.0, pair2.1),
        court_id: 1,
        set_number,
        pair1_score: scores.0,
        pair2_score: scores.1,
        winner: Winner::from_scores(scores.0, scores.1),
        completed: true,
        game_date: Some(game_date()),
    }
}

pub fn submission(
    pair1: (PlayerId, PlayerId),
    pair2: (PlayerId, PlayerId),
    set_number: u32,
    scores: (u32, u32),
) -> NewMatchResult {
    NewMatchResult {
        pair1: Pair::new(pair1.0, pair1.1),
        pair2: Pair::new(pair2.0, pair2.1),
        court_id: 1,
        set_number,
        pair1_score: scores.0,
        pair2_score: scores.1,
        winner: None,
        completed: true,
        game_date: Some(game_date()),
    }
}

/// Service over in-memory repositories seeded with the given data
pub fn create_test_service(
    config: &AppConfig,
    players: Vec<Player>,
    courts: Vec<Court>,
    results: Vec<MatchResult>,
) -> (SchedulerService, Arc<RecordingWaitingList>) {
    let waiting_list = Arc::new(RecordingWaitingList::new());
    let service = SchedulerService::new(
        config,
        Arc::new(InMemoryRepository::with_items(players)),
        Arc::new(InMemoryRepository::with_items(courts)),
        Arc::new(InMemoryRepository::with_items(results)),
        waiting_list.clone(),
    );
    (service, waiting_list)
}
