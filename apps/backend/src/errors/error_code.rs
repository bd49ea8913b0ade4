//! Error codes for the Skirmish backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Skirmish backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Caller identity
    /// Missing or blank caller id header
    MissingCallerId,
    /// Caller is not one of the two players
    NotAParticipant,

    // Request Validation
    /// Roster does not hold exactly three units
    InvalidRosterSize,
    /// Roster repeats a unit type
    DuplicateRosterUnits,
    /// Invalid session id in the path
    InvalidSessionId,
    /// Invalid round index in the path
    InvalidRound,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Session not found
    SessionNotFound,
    /// General not found error
    NotFound,

    // Lifecycle Conflicts
    /// Session already has two players
    GameInProgress,
    /// Session has ended
    GameEnded,
    /// Creator tried to join their own session
    SelfJoin,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Store error
    StoreError,
    /// Store unavailable
    StoreUnavailable,
    /// Store timeout
    StoreTimeout,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Get the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCallerId => "MISSING_CALLER_ID",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::InvalidRosterSize => "INVALID_ROSTER_SIZE",
            Self::DuplicateRosterUnits => "DUPLICATE_ROSTER_UNITS",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::InvalidRound => "INVALID_ROUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::GameInProgress => "GAME_IN_PROGRESS",
            Self::GameEnded => "GAME_ENDED",
            Self::SelfJoin => "SELF_JOIN",
            Self::Conflict => "CONFLICT",
            Self::StoreError => "STORE_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
