//! Turn-synchronization engine.
//!
//! Each public method runs one load, validate, mutate, persist cycle against a
//! single session while holding that session's lock. Records are written back
//! only when the domain transition reports a change.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::lifecycle::{self, CreateOutcome, InitialGameData, SessionSummary};
use crate::domain::protocol::{self, CommandHistory, TurnCommand};
use crate::domain::record::{GameRecord, Phase};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::sessions::SessionStore;
use crate::services::session_locks::SessionLocks;

/// Result of `create_session`: what happened, and under which id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSession {
    pub outcome: CreateOutcome,
    pub session_id: String,
}

pub struct TurnEngine {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl TurnEngine {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            locks: SessionLocks::new(),
        }
    }

    /// Name of the backing store, for health reporting.
    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    async fn load(&self, session_id: &str) -> Result<GameRecord, AppError> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| DomainError::session_not_found(session_id).into())
    }

    /// Create a session keyed by the caller. A live session under that id is
    /// reported back unchanged; an ended one is replaced.
    pub async fn create_session(
        &self,
        caller: &str,
        units: Vec<String>,
    ) -> Result<CreatedSession, AppError> {
        let _guard = self.locks.lock(caller).await;

        let mut slot = self.store.get(caller).await?;
        let outcome = lifecycle::create_session(&mut slot, caller, units)?;

        if let Some(record) = slot.as_ref().filter(|_| outcome.wrote_record()) {
            self.store.upsert(record).await?;
            info!(session_id = %caller, "session created");
        } else {
            debug!(session_id = %caller, ?outcome, "create skipped, session is live");
        }

        Ok(CreatedSession {
            outcome,
            session_id: caller.to_string(),
        })
    }

    pub async fn join_session(
        &self,
        session_id: &str,
        caller: &str,
        units: Vec<String>,
    ) -> Result<SessionSummary, AppError> {
        let _guard = self.locks.lock(session_id).await;

        let mut record = self.load(session_id).await?;
        lifecycle::join_session(&mut record, caller, units)?;
        self.store.upsert(&record).await?;

        info!(session_id, player2 = %caller, "opponent joined, session playing");
        Ok(SessionSummary::from(&record))
    }

    pub async fn concede(&self, session_id: &str, caller: &str) -> Result<(), AppError> {
        let _guard = self.locks.lock(session_id).await;

        let mut record = self.load(session_id).await?;
        lifecycle::concede(&mut record, caller)?;
        self.store.upsert(&record).await?;

        info!(session_id, conceded_by = %caller, round = record.current_round, "session ended");
        Ok(())
    }

    pub async fn query_phase(&self, session_id: &str) -> Result<Phase, AppError> {
        let _guard = self.locks.lock(session_id).await;
        Ok(self.load(session_id).await?.phase)
    }

    /// Whether an opponent has joined. Always false for player2, and for
    /// sessions that do not exist.
    pub async fn query_join_status(&self, session_id: &str, caller: &str) -> Result<bool, AppError> {
        let _guard = self.locks.lock(session_id).await;
        Ok(self
            .store
            .get(session_id)
            .await?
            .is_some_and(|record| lifecycle::has_opponent_joined(&record, caller)))
    }

    pub async fn query_in_progress(&self, session_id: &str) -> Result<bool, AppError> {
        let _guard = self.locks.lock(session_id).await;
        Ok(self.load(session_id).await?.phase == Phase::Playing)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionSummary, AppError> {
        let _guard = self.locks.lock(session_id).await;
        let record = self.load(session_id).await?;
        Ok(SessionSummary::from(&record))
    }

    pub async fn initial_game_data(&self, session_id: &str) -> Result<InitialGameData, AppError> {
        let _guard = self.locks.lock(session_id).await;
        let record = self.load(session_id).await?;
        Ok(lifecycle::initial_game_data(&record))
    }

    /// Commit the caller's payload for the current round. Out-of-turn commits
    /// are no-ops that answer with the current counters.
    pub async fn commit_command(
        &self,
        session_id: &str,
        caller: &str,
        payload: &str,
    ) -> Result<TurnCommand, AppError> {
        let _guard = self.locks.lock(session_id).await;

        let mut record = self.load(session_id).await?;
        let seat = record.require_seat(caller)?;
        let result = protocol::commit(&mut record, seat, payload);

        if result.mutated {
            self.store.upsert(&record).await?;
            if result.round_advanced {
                info!(session_id, ?seat, round = record.current_round, "round advanced");
            } else {
                debug!(session_id, ?seat, turn = record.turn(seat), "command committed, awaiting opponent");
            }
        } else {
            debug!(session_id, ?seat, round = record.current_round, "commit ignored");
        }

        Ok(result.response)
    }

    pub async fn other_player_command(
        &self,
        session_id: &str,
        caller: &str,
        round: u32,
    ) -> Result<TurnCommand, AppError> {
        let _guard = self.locks.lock(session_id).await;
        let record = self.load(session_id).await?;
        let seat = record.require_seat(caller)?;
        Ok(protocol::other_command(&record, seat, round))
    }

    pub async fn other_player_next_command(
        &self,
        session_id: &str,
        caller: &str,
    ) -> Result<TurnCommand, AppError> {
        let _guard = self.locks.lock(session_id).await;
        let record = self.load(session_id).await?;
        let seat = record.require_seat(caller)?;
        Ok(protocol::next_other_command(&record, seat))
    }

    /// Command histories as visible to `caller`. Non-participants are allowed
    /// and see both sides truncated to the synchronized rounds.
    pub async fn all_commands(
        &self,
        session_id: &str,
        caller: &str,
    ) -> Result<CommandHistory, AppError> {
        let _guard = self.locks.lock(session_id).await;
        let record = self.load(session_id).await?;
        Ok(protocol::all_commands(&record, record.seat_of(caller)))
    }
}
