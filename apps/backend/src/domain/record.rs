//! Persisted per-session state.

use serde::{Deserialize, Serialize};

use crate::domain::roster::Roster;
use crate::errors::domain::DomainError;

/// Session lifecycle.
///
/// Moves Joining → Playing → Ended. Only a brand-new record resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Created, waiting for the second player.
    Joining,
    /// Both players present; commits are accepted.
    Playing,
    /// Conceded. Still queryable, never playable again.
    Ended,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Joining => "JOINING",
            Phase::Playing => "PLAYING",
            Phase::Ended => "ENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "JOINING" => Some(Phase::Joining),
            "PLAYING" => Some(Phase::Playing),
            "ENDED" => Some(Phase::Ended),
            _ => None,
        }
    }
}

/// Which side of the session a caller plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    pub fn opponent(self) -> Self {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }
}

/// Turn counters seen from one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPair {
    pub own: u32,
    pub other: u32,
}

/// One two-player match.
///
/// Command vectors always carry exactly one open (empty) trailing slot:
/// `playerN_commands.len() == playerN_turn + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub session_id: String,
    pub phase: Phase,
    pub player1_id: String,
    /// `None` until someone joins.
    pub player2_id: Option<String>,
    pub player1_roster: Roster,
    pub player2_roster: Roster,
    pub player1_turn: u32,
    pub player2_turn: u32,
    pub current_round: u32,
    pub player1_commands: Vec<String>,
    pub player2_commands: Vec<String>,
}

impl GameRecord {
    /// Fresh record in the Joining phase with all counters at zero.
    pub fn new(session_id: impl Into<String>, creator: impl Into<String>, roster: Roster) -> Self {
        Self {
            session_id: session_id.into(),
            phase: Phase::Joining,
            player1_id: creator.into(),
            player2_id: None,
            player1_roster: roster,
            player2_roster: Roster::empty(),
            player1_turn: 0,
            player2_turn: 0,
            current_round: 0,
            player1_commands: vec![String::new()],
            player2_commands: vec![String::new()],
        }
    }

    /// Joining or Playing.
    pub fn is_live(&self) -> bool {
        self.phase != Phase::Ended
    }

    pub fn seat_of(&self, caller: &str) -> Option<Seat> {
        if self.player1_id == caller {
            Some(Seat::Player1)
        } else if self.player2_id.as_deref() == Some(caller) {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn require_seat(&self, caller: &str) -> Result<Seat, DomainError> {
        self.seat_of(caller).ok_or_else(|| {
            DomainError::not_participant(format!(
                "{caller} is not playing in session {}",
                self.session_id
            ))
        })
    }

    pub fn turn(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1_turn,
            Seat::Player2 => self.player2_turn,
        }
    }

    pub fn turns_for(&self, seat: Seat) -> TurnPair {
        TurnPair {
            own: self.turn(seat),
            other: self.turn(seat.opponent()),
        }
    }

    pub fn commands(&self, seat: Seat) -> &[String] {
        match seat {
            Seat::Player1 => &self.player1_commands,
            Seat::Player2 => &self.player2_commands,
        }
    }

    pub(crate) fn seat_state_mut(&mut self, seat: Seat) -> (&mut u32, &mut Vec<String>) {
        match seat {
            Seat::Player1 => (&mut self.player1_turn, &mut self.player1_commands),
            Seat::Player2 => (&mut self.player2_turn, &mut self.player2_commands),
        }
    }

    /// Structural invariants every observable record satisfies.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        for seat in [Seat::Player1, Seat::Player2] {
            let turn = self.turn(seat) as usize;
            let len = self.commands(seat).len();
            if len != turn + 1 {
                return Err(format!(
                    "{seat:?} has {len} command slots for turn {turn}"
                ));
            }
            if self.commands(seat).last().is_some_and(|s| !s.is_empty()) {
                return Err(format!("{seat:?} trailing command slot is not open"));
            }
        }

        let low = self.player1_turn.min(self.player2_turn);
        let high = self.player1_turn.max(self.player2_turn);
        if self.current_round > low {
            return Err(format!(
                "round {} ahead of turns ({}, {})",
                self.current_round, self.player1_turn, self.player2_turn
            ));
        }
        if high > self.current_round + 1 {
            return Err(format!(
                "turn {high} more than one ahead of round {}",
                self.current_round
            ));
        }

        if self.phase != Phase::Joining {
            if self.player2_id.is_none() {
                return Err("second player missing outside Joining".to_string());
            }
            if !self.player1_roster.is_valid() || !self.player2_roster.is_valid() {
                return Err("invalid roster outside Joining".to_string());
            }
        }

        Ok(())
    }
}
