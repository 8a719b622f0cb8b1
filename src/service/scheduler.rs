//! Scheduler service: the operations the request layer calls
//!
//! All data sources are injected as trait objects, so swapping the in-memory
//! repositories for a database never touches the ranking or pairing code.

use crate::config::{AppConfig, CourtSettings};
use crate::error::{Result, SchedulingError};
use crate::pairing::{
    select_courts, Allocation, InMemoryWaitingList, PairingAllocator, WaitingEntry, WaitingList,
};
use crate::ranking::{RankingEngine, Standings, StandingsCache};
use crate::store::validation::{check_participants, check_set_number, settle_winner};
use crate::store::{Repository, Snapshot};
use crate::types::{
    Court, CourtId, MatchResult, NewMatchResult, NewPlayer, Player, PlayerId, ResultId, Winner,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request to generate the next round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRequest {
    /// Falls back to the configured default
    #[serde(default)]
    pub sets: Option<u32>,
    pub game_date: NaiveDate,
    /// Restrict the round to these courts
    #[serde(default)]
    pub court_ids: Option<Vec<CourtId>>,
}

impl GameRequest {
    pub fn new(game_date: NaiveDate) -> Self {
        Self {
            sets: None,
            game_date,
            court_ids: None,
        }
    }
}

pub struct SchedulerService {
    players: Arc<dyn Repository<Player>>,
    courts: Arc<dyn Repository<Court>>,
    results: Arc<dyn Repository<MatchResult>>,
    waiting_list: Arc<dyn WaitingList>,
    engine: RankingEngine,
    allocator: PairingAllocator,
    court_settings: CourtSettings,
    standings: StandingsCache,
}

impl SchedulerService {
    /// Create a service over the given data sources
    pub fn new(
        config: &AppConfig,
        players: Arc<dyn Repository<Player>>,
        courts: Arc<dyn Repository<Court>>,
        results: Arc<dyn Repository<MatchResult>>,
        waiting_list: Arc<dyn WaitingList>,
    ) -> Self {
        Self {
            players,
            courts,
            results,
            waiting_list,
            engine: RankingEngine::new(config.ranking.clone()),
            allocator: PairingAllocator::new(config.scheduling.clone()),
            court_settings: config.courts.clone(),
            standings: StandingsCache::new(),
        }
    }

    /// Create a service backed by empty in-memory stores
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::from_snapshot(config, Snapshot::default())
    }

    /// Create a service backed by in-memory stores seeded from a snapshot
    pub fn from_snapshot(config: &AppConfig, snapshot: Snapshot) -> Self {
        let (players, courts, results) = snapshot.into_repositories();
        Self::new(
            config,
            Arc::new(players),
            Arc::new(courts),
            Arc::new(results),
            Arc::new(InMemoryWaitingList::new()),
        )
    }

    // ---- players ----

    pub fn register_player(&self, new_player: NewPlayer) -> Result<Player> {
        let name = new_player.name.trim();
        if name.is_empty() {
            return Err(SchedulingError::InvalidPlayer {
                reason: "name cannot be empty".to_string(),
            }
            .into());
        }

        let player = self.players.create(Player {
            id: 0,
            name: name.to_string(),
            alias: new_player.alias,
            phone: new_player.phone,
            affiliation_number: new_player.affiliation_number,
            selected: false,
            role: new_player.role,
        })?;

        info!("Registered player {} ({})", player.id, player.name);
        Ok(player)
    }

    pub fn players(&self) -> Result<Vec<Player>> {
        self.players.list()
    }

    fn player(&self, player_id: PlayerId) -> Result<Player> {
        self.players
            .get(player_id)?
            .ok_or_else(|| SchedulingError::UnknownPlayer { player_id }.into())
    }

    /// Flip the "selected for next round" flag
    pub fn toggle_selection(&self, player_id: PlayerId) -> Result<Player> {
        let player = self.player(player_id)?;
        let selected = !player.selected;
        self.set_selection(player_id, selected)
    }

    pub fn set_selection(&self, player_id: PlayerId, selected: bool) -> Result<Player> {
        let mut player = self.player(player_id)?;
        player.selected = selected;
        let player = self.players.update(player)?;

        debug!(
            "Player {} {} for next round",
            player_id,
            if selected { "selected" } else { "deselected" }
        );
        Ok(player)
    }

    pub fn selected_players(&self) -> Result<Vec<Player>> {
        Ok(self
            .players
            .list()?
            .into_iter()
            .filter(|p| p.selected)
            .collect())
    }

    /// Delete a player who has never appeared in a recorded result
    pub fn delete_player(&self, player_id: PlayerId) -> Result<bool> {
        let referenced = self
            .results
            .list()?
            .iter()
            .any(|r| r.side_of(player_id).is_some());
        if referenced {
            return Err(SchedulingError::PlayerReferenced { player_id }.into());
        }

        let deleted = self.players.delete(player_id)?;
        if deleted {
            info!("Deleted player {}", player_id);
        }
        Ok(deleted)
    }

    // ---- courts ----

    /// Create a court from the allow-list of court names
    pub fn create_court(&self, name: &str) -> Result<Court> {
        let name = name.trim();
        if !self.court_settings.is_allowed(name) {
            return Err(SchedulingError::CourtNameNotAllowed {
                name: name.to_string(),
            }
            .into());
        }
        if self.courts.list()?.iter().any(|c| c.name == name) {
            return Err(SchedulingError::DuplicateCourt {
                name: name.to_string(),
            }
            .into());
        }

        let court = self.courts.create(Court {
            id: 0,
            name: name.to_string(),
        })?;
        info!("Created court {} ({})", court.id, court.name);
        Ok(court)
    }

    pub fn courts(&self) -> Result<Vec<Court>> {
        self.courts.list()
    }

    // ---- results ----

    /// Record a new set result
    ///
    /// Rankings are rebuilt with the new set before it is stored, so a
    /// failed rebuild leaves the history untouched.
    pub fn submit_result(&self, submission: NewMatchResult) -> Result<MatchResult> {
        let winner = self.validate_result(&submission, None)?;
        let candidate = to_record(0, submission, winner);
        let standings = self.preview_standings(&candidate, None)?;

        let result = self.results.create(candidate)?;
        self.standings.replace(standings)?;

        info!(
            "Recorded result {} on court {}: set {} {}-{} ({} wins)",
            result.id,
            result.court_id,
            result.set_number,
            result.pair1_score,
            result.pair2_score,
            result.winner
        );
        Ok(result)
    }

    /// Replace the fields of a recorded result, keeping its id
    pub fn update_result(
        &self,
        result_id: ResultId,
        submission: NewMatchResult,
    ) -> Result<MatchResult> {
        if self.results.get(result_id)?.is_none() {
            return Err(SchedulingError::ResultNotFound { result_id }.into());
        }
        let winner = self.validate_result(&submission, Some(result_id))?;
        let candidate = to_record(result_id, submission, winner);
        let standings = self.preview_standings(&candidate, Some(result_id))?;

        let result = self.results.update(candidate)?;
        self.standings.replace(standings)?;

        info!("Updated result {}", result.id);
        Ok(result)
    }

    pub fn results(&self) -> Result<Vec<MatchResult>> {
        self.results.list()
    }

    /// Check a submission and settle the winner
    ///
    /// Set numbers of one pairing on one game date increase with the order
    /// the sets were recorded in. An update must keep its set between its
    /// recorded neighbours.
    fn validate_result(
        &self,
        submission: &NewMatchResult,
        replacing: Option<ResultId>,
    ) -> Result<Winner> {
        let invalid = |reason: String| -> anyhow::Error {
            SchedulingError::InvalidResult { reason }.into()
        };

        let participants = [
            submission.pair1.player1,
            submission.pair1.player2,
            submission.pair2.player1,
            submission.pair2.player2,
        ];
        check_participants(participants)?;

        for player_id in participants {
            if self.players.get(player_id)?.is_none() {
                return Err(SchedulingError::UnknownPlayer { player_id }.into());
            }
        }

        if self.courts.get(submission.court_id)?.is_none() {
            return Err(SchedulingError::UnknownCourt {
                court_id: submission.court_id,
            }
            .into());
        }

        check_set_number(submission.set_number)?;
        let winner = settle_winner(
            submission.pair1_score,
            submission.pair2_score,
            submission.winner,
        )?;

        let others: Vec<MatchResult> = self
            .results
            .list()?
            .into_iter()
            .filter(|r| Some(r.id) != replacing)
            .filter(|r| r.same_pairing(submission) && r.game_date == submission.game_date)
            .collect();

        let set_number = submission.set_number;
        match replacing {
            None => {
                if let Some(last) = others.iter().map(|r| r.set_number).max() {
                    if set_number <= last {
                        return Err(invalid(format!(
                            "set number must be greater than {} for this pairing",
                            last
                        )));
                    }
                }
            }
            Some(result_id) => {
                let before = others
                    .iter()
                    .filter(|r| r.id < result_id)
                    .map(|r| r.set_number)
                    .max();
                let after = others
                    .iter()
                    .filter(|r| r.id > result_id)
                    .map(|r| r.set_number)
                    .min();

                if before.is_some_and(|b| set_number <= b)
                    || after.is_some_and(|a| set_number >= a)
                {
                    return Err(invalid(format!(
                        "set {} is out of order with the other sets of this pairing",
                        set_number
                    )));
                }
            }
        }

        Ok(winner)
    }

    // ---- rankings ----

    /// Rebuild the standings from the full history and publish them
    pub fn refresh_rankings(&self) -> Result<Arc<Standings>> {
        let players = self.players.list()?;
        let results = self.results.list()?;

        let rebuilt = Standings::from_map(self.engine.recompute_rankings(&players, &results)?);
        self.standings.replace(rebuilt)
    }

    /// Standings as they would be with `candidate` recorded
    fn preview_standings(
        &self,
        candidate: &MatchResult,
        replacing: Option<ResultId>,
    ) -> Result<Standings> {
        let players = self.players.list()?;
        let mut results: Vec<MatchResult> = self
            .results
            .list()?
            .into_iter()
            .map(|r| {
                if Some(r.id) == replacing {
                    candidate.clone()
                } else {
                    r
                }
            })
            .collect();
        if replacing.is_none() {
            results.push(candidate.clone());
        }

        Ok(Standings::from_map(
            self.engine.recompute_rankings(&players, &results)?,
        ))
    }

    /// Rankings query: always a full rebuild
    pub fn rankings(&self) -> Result<Arc<Standings>> {
        self.refresh_rankings()
    }

    /// Last published standings without rebuilding
    pub fn standings(&self) -> Result<Arc<Standings>> {
        self.standings.current()
    }

    // ---- games ----

    /// Pair the selected players for the next round
    ///
    /// Overflow players are handed to the waiting list, replacing any earlier
    /// entries for the same game date.
    pub fn generate_game(&self, request: &GameRequest) -> Result<Allocation> {
        let players = self.selected_players()?;
        let courts = select_courts(&self.courts.list()?, request.court_ids.as_deref())?;
        let sets = request
            .sets
            .unwrap_or(self.allocator.config().default_sets);

        let standings = self.refresh_rankings()?;
        let allocation = self.allocator.generate_pairings(
            &players,
            &courts,
            &standings.points_by_player(),
            sets,
            request.game_date,
        )?;

        let replaced = self.waiting_list.clear(request.game_date)?;
        if replaced > 0 {
            debug!(
                "Replaced {} waiting entries for {}",
                replaced, request.game_date
            );
        }

        if !allocation.waiting.is_empty() {
            warn!(
                "{} players did not fit on {} courts and were moved to the waiting list",
                allocation.waiting.len(),
                courts.len()
            );
            self.waiting_list
                .defer(request.game_date, &allocation.waiting)?;
        }

        Ok(allocation)
    }

    pub fn waiting_list(&self) -> Result<Vec<WaitingEntry>> {
        self.waiting_list.entries()
    }
}

fn to_record(id: ResultId, submission: NewMatchResult, winner: Winner) -> MatchResult {
    MatchResult {
        id,
        pair1: submission.pair1,
        pair2: submission.pair2,
        court_id: submission.court_id,
        set_number: submission.set_number,
        pair1_score: submission.pair1_score,
        pair2_score: submission.pair2_score,
        winner,
        completed: submission.completed,
        game_date: submission.game_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OverflowPolicy, UnknownPlayerPolicy};
    use crate::types::{Pair, Role};
    use mockall::mock;

    mock! {
        pub Players {}
        impl Repository<Player> for Players {
            fn list(&self) -> Result<Vec<Player>>;
            fn get(&self, id: u32) -> Result<Option<Player>>;
            fn create(&self, item: Player) -> Result<Player>;
            fn update(&self, item: Player) -> Result<Player>;
            fn delete(&self, id: u32) -> Result<bool>;
        }
    }

    mock! {
        pub Courts {}
        impl Repository<Court> for Courts {
            fn list(&self) -> Result<Vec<Court>>;
            fn get(&self, id: u32) -> Result<Option<Court>>;
            fn create(&self, item: Court) -> Result<Court>;
            fn update(&self, item: Court) -> Result<Court>;
            fn delete(&self, id: u32) -> Result<bool>;
        }
    }

    mock! {
        pub Results {}
        impl Repository<MatchResult> for Results {
            fn list(&self) -> Result<Vec<MatchResult>>;
            fn get(&self, id: u32) -> Result<Option<MatchResult>>;
            fn create(&self, item: MatchResult) -> Result<MatchResult>;
            fn update(&self, item: MatchResult) -> Result<MatchResult>;
            fn delete(&self, id: u32) -> Result<bool>;
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 13).unwrap()
    }

    fn selected_player(id: PlayerId) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            alias: None,
            phone: None,
            affiliation_number: None,
            selected: true,
            role: Role::Player,
        }
    }

    fn seeded_service(players: u32, courts: u32) -> SchedulerService {
        let service = SchedulerService::in_memory(&AppConfig::default());
        for n in 1..=players {
            let player = service
                .register_player(NewPlayer {
                    name: format!("Player {}", n),
                    ..Default::default()
                })
                .unwrap();
            service.set_selection(player.id, true).unwrap();
        }
        for n in 1..=courts {
            service.create_court(&format!("Court {}", n)).unwrap();
        }
        service
    }

    fn submission(set_number: u32, scores: (u32, u32)) -> NewMatchResult {
        NewMatchResult {
            pair1: Pair::new(1, 2),
            pair2: Pair::new(3, 4),
            court_id: 1,
            set_number,
            pair1_score: scores.0,
            pair2_score: scores.1,
            winner: None,
            completed: true,
            game_date: Some(date()),
        }
    }

    fn scheduling_error(err: anyhow::Error) -> SchedulingError {
        err.downcast::<SchedulingError>().expect("scheduling error")
    }

    #[test]
    fn test_generate_game_reads_only_through_repositories() {
        let mut players = MockPlayers::new();
        players
            .expect_list()
            .returning(|| Ok((1..=4).map(selected_player).collect()));

        let mut courts = MockCourts::new();
        courts.expect_list().times(1).returning(|| {
            Ok(vec![Court {
                id: 1,
                name: "Court 1".to_string(),
            }])
        });

        let mut results = MockResults::new();
        results.expect_list().returning(|| Ok(Vec::new()));
        results.expect_create().never();

        let service = SchedulerService::new(
            &AppConfig::default(),
            Arc::new(players),
            Arc::new(courts),
            Arc::new(results),
            Arc::new(InMemoryWaitingList::new()),
        );

        let allocation = service.generate_game(&GameRequest::new(date())).unwrap();
        assert_eq!(allocation.pairings.len(), 1);
        assert_eq!(allocation.pairings[0].sets, 3);
    }

    #[test]
    fn test_delete_referenced_player_is_guarded() {
        let mut players = MockPlayers::new();
        players.expect_delete().never();

        let mut results = MockResults::new();
        results.expect_list().returning(|| {
            Ok(vec![MatchResult {
                id: 1,
                pair1: Pair::new(1, 2),
                pair2: Pair::new(3, 4),
                court_id: 1,
                set_number: 1,
                pair1_score: 6,
                pair2_score: 2,
                winner: Winner::Pair1,
                completed: true,
                game_date: None,
            }])
        });

        let service = SchedulerService::new(
            &AppConfig::default(),
            Arc::new(players),
            Arc::new(MockCourts::new()),
            Arc::new(results),
            Arc::new(InMemoryWaitingList::new()),
        );

        let err = scheduling_error(service.delete_player(3).unwrap_err());
        assert_eq!(err, SchedulingError::PlayerReferenced { player_id: 3 });
    }

    #[test]
    fn test_storage_failure_propagates() {
        let mut players = MockPlayers::new();
        players.expect_list().returning(|| {
            Err(SchedulingError::Storage {
                message: "connection reset".to_string(),
            }
            .into())
        });

        let service = SchedulerService::new(
            &AppConfig::default(),
            Arc::new(players),
            Arc::new(MockCourts::new()),
            Arc::new(MockResults::new()),
            Arc::new(InMemoryWaitingList::new()),
        );

        let err = scheduling_error(service.selected_players().unwrap_err());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_register_and_toggle() {
        let service = SchedulerService::in_memory(&AppConfig::default());
        let player = service
            .register_player(NewPlayer {
                name: "  Marta  ".to_string(),
                alias: Some("M".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(player.name, "Marta");
        assert!(!player.selected);

        assert!(service.toggle_selection(player.id).unwrap().selected);
        assert_eq!(service.selected_players().unwrap().len(), 1);
        assert!(!service.toggle_selection(player.id).unwrap().selected);
        assert!(service.selected_players().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let service = SchedulerService::in_memory(&AppConfig::default());
        let err = scheduling_error(service.register_player(NewPlayer::default()).unwrap_err());
        assert!(matches!(err, SchedulingError::InvalidPlayer { .. }));
    }

    #[test]
    fn test_toggle_unknown_player() {
        let service = SchedulerService::in_memory(&AppConfig::default());
        let err = scheduling_error(service.toggle_selection(9).unwrap_err());
        assert_eq!(err, SchedulingError::UnknownPlayer { player_id: 9 });
    }

    #[test]
    fn test_court_allow_list() {
        let service = SchedulerService::in_memory(&AppConfig::default());
        service.create_court("Court 1").unwrap();

        let err = scheduling_error(service.create_court("Court 1").unwrap_err());
        assert!(matches!(err, SchedulingError::DuplicateCourt { .. }));

        let err = scheduling_error(service.create_court("Parking lot").unwrap_err());
        assert!(matches!(err, SchedulingError::CourtNameNotAllowed { .. }));
    }

    #[test]
    fn test_submit_result_derives_winner_and_refreshes() {
        let service = seeded_service(4, 1);
        let result = service.submit_result(submission(1, (0, 6))).unwrap();
        assert_eq!(result.winner, Winner::Pair2);

        let standings = service.standings().unwrap();
        assert_eq!(standings.points(3), 5);
        assert_eq!(standings.points(1), 0);
        assert_eq!(standings.position(3), Some(1));
    }

    #[test]
    fn test_submit_result_rejects_wrong_winner() {
        let service = seeded_service(4, 1);
        let mut bad = submission(1, (6, 2));
        bad.winner = Some(Winner::Pair2);

        let err = scheduling_error(service.submit_result(bad).unwrap_err());
        assert!(matches!(err, SchedulingError::InvalidResult { .. }));
        assert!(service.results().unwrap().is_empty());
    }

    #[test]
    fn test_tied_scores_default_to_pair1() {
        let service = seeded_service(4, 1);
        let result = service.submit_result(submission(1, (4, 4))).unwrap();
        assert_eq!(result.winner, Winner::Pair1);
    }

    #[test]
    fn test_set_numbers_must_increase() {
        let service = seeded_service(4, 1);
        service.submit_result(submission(1, (6, 3))).unwrap();
        service.submit_result(submission(2, (2, 6))).unwrap();

        let err = scheduling_error(service.submit_result(submission(2, (6, 1))).unwrap_err());
        assert!(matches!(err, SchedulingError::InvalidResult { .. }));

        let mut swapped = submission(3, (6, 4));
        std::mem::swap(&mut swapped.pair1, &mut swapped.pair2);
        assert!(service.submit_result(swapped).is_ok());
    }

    #[test]
    fn test_submit_result_validation() {
        let service = seeded_service(4, 1);

        let mut repeated = submission(1, (6, 3));
        repeated.pair2 = Pair::new(1, 4);
        let err = scheduling_error(service.submit_result(repeated).unwrap_err());
        assert!(matches!(err, SchedulingError::InvalidResult { .. }));

        let mut unknown_court = submission(1, (6, 3));
        unknown_court.court_id = 5;
        let err = scheduling_error(service.submit_result(unknown_court).unwrap_err());
        assert_eq!(err, SchedulingError::UnknownCourt { court_id: 5 });

        let err = scheduling_error(service.submit_result(submission(0, (6, 3))).unwrap_err());
        assert!(matches!(err, SchedulingError::InvalidResult { .. }));
    }

    #[test]
    fn test_update_result_keeps_identity() {
        let service = seeded_service(4, 1);
        let original = service.submit_result(submission(1, (6, 3))).unwrap();

        let updated = service
            .update_result(original.id, submission(1, (3, 6)))
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.winner, Winner::Pair2);
        assert_eq!(service.results().unwrap().len(), 1);
        assert_eq!(service.standings().unwrap().points(3), 2);

        let err = scheduling_error(service.update_result(99, submission(1, (6, 0))).unwrap_err());
        assert_eq!(err, SchedulingError::ResultNotFound { result_id: 99 });
    }

    #[test]
    fn test_rankings_rebuilt_on_every_query() {
        let service = seeded_service(4, 1);
        service.submit_result(submission(1, (6, 4))).unwrap();

        let first = service.rankings().unwrap();
        let second = service.rankings().unwrap();
        assert_eq!(*first, *second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_generate_game_uses_standings() {
        let service = seeded_service(8, 2);
        service.submit_result(submission(1, (6, 0))).unwrap();

        let allocation = service.generate_game(&GameRequest::new(date())).unwrap();
        assert_eq!(allocation.pairings.len(), 2);

        // Players 1 and 2 lead with 5 points and are split across pairs
        let first = &allocation.pairings[0];
        assert_eq!(first.pair1.player1, 1);
        assert!(!first.pair1.contains(2));
    }

    #[test]
    fn test_generate_game_with_court_subset() {
        let service = seeded_service(4, 3);
        let mut request = GameRequest::new(date());
        request.court_ids = Some(vec![3]);
        request.sets = Some(1);

        let allocation = service.generate_game(&request).unwrap();
        assert_eq!(allocation.pairings[0].court.id, 3);
        assert_eq!(allocation.pairings[0].sets, 1);

        request.court_ids = Some(vec![7]);
        let err = scheduling_error(service.generate_game(&request).unwrap_err());
        assert_eq!(err, SchedulingError::UnknownCourt { court_id: 7 });
    }

    #[test]
    fn test_generate_game_overflow_to_waiting_list() {
        let mut config = AppConfig::default();
        config.scheduling.overflow = OverflowPolicy::WaitingList;

        let service = SchedulerService::in_memory(&config);
        for n in 1..=8 {
            let player = service
                .register_player(NewPlayer {
                    name: format!("Player {}", n),
                    ..Default::default()
                })
                .unwrap();
            service.set_selection(player.id, true).unwrap();
        }
        service.create_court("Court 1").unwrap();

        let allocation = service.generate_game(&GameRequest::new(date())).unwrap();
        assert_eq!(allocation.pairings.len(), 1);
        assert_eq!(allocation.waiting.len(), 4);
        assert_eq!(service.waiting_list().unwrap().len(), 4);

        // Regenerating the same date does not pile up entries
        service.generate_game(&GameRequest::new(date())).unwrap();
        assert_eq!(service.waiting_list().unwrap().len(), 4);
    }

    #[test]
    fn test_failed_rebuild_leaves_history_untouched() {
        let mut config = AppConfig::default();
        config.ranking.unknown_players = UnknownPlayerPolicy::Reject;

        let dangling = MatchResult {
            id: 1,
            pair1: Pair::new(1, 99),
            pair2: Pair::new(3, 4),
            court_id: 1,
            set_number: 1,
            pair1_score: 6,
            pair2_score: 3,
            winner: Winner::Pair1,
            completed: true,
            game_date: Some(date()),
        };
        let service = SchedulerService::from_snapshot(
            &config,
            Snapshot {
                players: (1..=4).map(selected_player).collect(),
                courts: vec![Court {
                    id: 1,
                    name: "Court 1".to_string(),
                }],
                results: vec![dangling],
            },
        );

        let err = scheduling_error(service.submit_result(submission(5, (6, 2))).unwrap_err());
        assert_eq!(err, SchedulingError::UnknownPlayer { player_id: 99 });
        assert_eq!(service.results().unwrap().len(), 1);

        // Correcting the dangling record makes the history rankable again
        service.update_result(1, submission(1, (6, 3))).unwrap();
        service.submit_result(submission(5, (6, 2))).unwrap();
        assert_eq!(service.results().unwrap().len(), 2);
        assert_eq!(service.standings().unwrap().points(1), 8);
    }

    #[test]
    fn test_update_keeps_set_order() {
        let service = seeded_service(4, 1);
        for set in 1..=3 {
            service.submit_result(submission(set, (6, 4))).unwrap();
        }

        for (result_id, set) in [(1, 3), (1, 4), (3, 2), (2, 1)] {
            let err = scheduling_error(
                service
                    .update_result(result_id, submission(set, (6, 4)))
                    .unwrap_err(),
            );
            assert!(matches!(err, SchedulingError::InvalidResult { .. }));
        }

        assert!(service.update_result(2, submission(2, (1, 6))).is_ok());
        assert!(service.update_result(3, submission(7, (6, 1))).is_ok());
        assert!(service.update_result(1, submission(1, (6, 0))).is_ok());
    }

    #[test]
    fn test_delete_unreferenced_player() {
        let service = seeded_service(5, 1);
        service.submit_result(submission(1, (6, 2))).unwrap();

        assert!(service.delete_player(5).unwrap());
        let err = scheduling_error(service.delete_player(1).unwrap_err());
        assert_eq!(err, SchedulingError::PlayerReferenced { player_id: 1 });
    }
}
