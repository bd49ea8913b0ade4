//! Command-exchange protocol.
//!
//! Synchronisation is purely counter based. A player may commit once per
//! round (own turn == current round); when both turn counters meet, the
//! round advances and the committing player receives the opponent's move
//! for the round just closed. Out-of-turn commits and premature polls are
//! not errors: they return the current counters with an empty payload.

use serde::Serialize;

use crate::domain::record::{GameRecord, Phase, Seat};

/// Counters plus (possibly empty) opponent payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnCommand {
    pub current_round: u32,
    pub player1_turn: u32,
    pub player2_turn: u32,
    pub payload: String,
}

impl TurnCommand {
    fn from_record(record: &GameRecord, payload: String) -> Self {
        Self {
            current_round: record.current_round,
            player1_turn: record.player1_turn,
            player2_turn: record.player2_turn,
            payload,
        }
    }

    /// Current counters, nothing to hand over yet.
    pub fn waiting(record: &GameRecord) -> Self {
        Self::from_record(record, String::new())
    }

    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Outcome of [`commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub response: TurnCommand,
    /// The record changed and must be persisted.
    pub mutated: bool,
    /// This commit closed the round.
    pub round_advanced: bool,
}

/// Record `payload` as `seat`'s move for the current round.
///
/// No-op unless the session is Playing and the seat's own turn equals the
/// current round. An already-filled slot is never overwritten.
pub fn commit(record: &mut GameRecord, seat: Seat, payload: &str) -> CommitResult {
    let own_turn = record.turn(seat);
    if record.phase != Phase::Playing || own_turn != record.current_round {
        return CommitResult {
            response: TurnCommand::waiting(record),
            mutated: false,
            round_advanced: false,
        };
    }

    let (turn, commands) = record.seat_state_mut(seat);
    let idx = own_turn as usize;
    if let Some(slot) = commands.get_mut(idx).filter(|s| s.is_empty()) {
        slot.push_str(payload);
    }
    commands.push(String::new());
    *turn += 1;

    if record.player1_turn != record.player2_turn {
        return CommitResult {
            response: TurnCommand::waiting(record),
            mutated: true,
            round_advanced: false,
        };
    }

    record.current_round += 1;
    let closed_round = record.current_round - 1;
    CommitResult {
        response: other_command(record, seat, closed_round),
        mutated: true,
        round_advanced: true,
    }
}

/// The opponent's payload for `round`, if the opponent has committed it.
///
/// Rounds past the opponent's committed range come back empty.
pub fn other_command(record: &GameRecord, seat: Seat, round: u32) -> TurnCommand {
    let opponent = seat.opponent();
    let payload = if round < record.turn(opponent) {
        record
            .commands(opponent)
            .get(round as usize)
            .cloned()
            .unwrap_or_default()
    } else {
        String::new()
    };
    TurnCommand::from_record(record, payload)
}

/// The opponent's move for the latest round both players have committed.
///
/// Only answers when both turn counters are even, so nobody sees a move
/// for a round they have not committed themselves. Once the round has
/// advanced the same (stale) answer keeps coming back; clients detect that
/// from the counters.
pub fn next_other_command(record: &GameRecord, seat: Seat) -> TurnCommand {
    let turns = record.turns_for(seat);
    match turns.own.checked_sub(1) {
        Some(last) if turns.own == turns.other => other_command(record, seat, last),
        _ => TurnCommand::waiting(record),
    }
}

/// Both players' histories as visible to `viewer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandHistory {
    pub player1: Vec<String>,
    pub player2: Vec<String>,
}

/// Full own history, opponent's history cut at the current round.
///
/// Non-participants (`viewer == None`) see both sides cut at the current round.
pub fn all_commands(record: &GameRecord, viewer: Option<Seat>) -> CommandHistory {
    let synced = |seat: Seat| -> Vec<String> {
        let cmds = record.commands(seat);
        cmds[..cmds.len().min(record.current_round as usize)].to_vec()
    };

    match viewer {
        Some(Seat::Player1) => CommandHistory {
            player1: record.player1_commands.clone(),
            player2: synced(Seat::Player2),
        },
        Some(Seat::Player2) => CommandHistory {
            player1: synced(Seat::Player1),
            player2: record.player2_commands.clone(),
        },
        None => CommandHistory {
            player1: synced(Seat::Player1),
            player2: synced(Seat::Player2),
        },
    }
}
