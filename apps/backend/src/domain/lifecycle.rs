//! Session lifecycle transitions: create, join, concede.
//!
//! Pure functions over [`GameRecord`]; the turn engine is responsible for
//! loading, locking and persisting.

use serde::Serialize;

use crate::domain::record::{GameRecord, Phase};
use crate::domain::roster::Roster;
use crate::errors::domain::{ConflictKind, DomainError};

/// Result of a create request that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateOutcome {
    /// A fresh record was written.
    Created,
    /// A live record already exists and is being played.
    InProgress,
    /// A live record already exists and still waits for player 2.
    AwaitingOpponent,
}

impl CreateOutcome {
    pub fn wrote_record(self) -> bool {
        matches!(self, CreateOutcome::Created)
    }
}

/// Create a session keyed by the caller's identity.
///
/// `slot` holds whatever the store returned for that key. A live record is
/// left untouched and reported; an absent or Ended record is replaced with
/// a fresh one. The roster is only validated when a record would be written.
pub fn create_session(
    slot: &mut Option<GameRecord>,
    caller: &str,
    units: Vec<String>,
) -> Result<CreateOutcome, DomainError> {
    if let Some(existing) = slot.as_ref().filter(|r| r.is_live()) {
        return Ok(match existing.phase {
            Phase::Playing => CreateOutcome::InProgress,
            _ => CreateOutcome::AwaitingOpponent,
        });
    }

    let roster = Roster::parse(units)?;
    *slot = Some(GameRecord::new(caller, caller, roster));
    Ok(CreateOutcome::Created)
}

/// Seat `caller` as player 2 and start play.
pub fn join_session(
    record: &mut GameRecord,
    caller: &str,
    units: Vec<String>,
) -> Result<(), DomainError> {
    if record.player1_id == caller {
        return Err(DomainError::conflict(
            ConflictKind::SelfJoin,
            "Cannot join a game we created ourselves",
        ));
    }

    match record.phase {
        Phase::Playing => {
            return Err(DomainError::conflict(
                ConflictKind::GameInProgress,
                format!("Session {} is already in progress", record.session_id),
            ))
        }
        Phase::Ended => {
            return Err(DomainError::conflict(
                ConflictKind::GameEnded,
                format!("Session {} has ended", record.session_id),
            ))
        }
        Phase::Joining => {}
    }

    let roster = Roster::parse(units)?;
    record.player2_id = Some(caller.to_string());
    record.player2_roster = roster;
    record.phase = Phase::Playing;
    Ok(())
}

/// End the session on behalf of either participant, whatever its phase.
pub fn concede(record: &mut GameRecord, caller: &str) -> Result<(), DomainError> {
    record.require_seat(caller)?;
    record.phase = Phase::Ended;
    Ok(())
}

/// Whether the creator's opponent has arrived.
///
/// Always false for player 2 asking about themselves.
pub fn has_opponent_joined(record: &GameRecord, caller: &str) -> bool {
    if record.player2_id.as_deref() == Some(caller) {
        return false;
    }
    record.player2_id.is_some() && record.phase == Phase::Playing
}

/// Rosters and round a client needs to build its starting position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitialGameData {
    pub player1_roster: Roster,
    pub player2_roster: Roster,
    pub current_round: u32,
}

/// Starting data, populated only while the session is being played.
pub fn initial_game_data(record: &GameRecord) -> InitialGameData {
    if record.player2_id.is_some() && record.phase == Phase::Playing {
        InitialGameData {
            player1_roster: record.player1_roster.clone(),
            player2_roster: record.player2_roster.clone(),
            current_round: record.current_round,
        }
    } else {
        InitialGameData {
            player1_roster: Roster::empty(),
            player2_roster: Roster::empty(),
            current_round: 0,
        }
    }
}

/// Command-free view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub phase: Phase,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub player1_turn: u32,
    pub player2_turn: u32,
    pub current_round: u32,
}

impl From<&GameRecord> for SessionSummary {
    fn from(record: &GameRecord) -> Self {
        Self {
            session_id: record.session_id.clone(),
            phase: record.phase,
            player1_id: record.player1_id.clone(),
            player2_id: record.player2_id.clone(),
            player1_turn: record.player1_turn,
            player2_turn: record.player2_turn,
            current_round: record.current_round,
        }
    }
}
