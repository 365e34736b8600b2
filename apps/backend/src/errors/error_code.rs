//! Error codes surfaced in problem-details responses.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Hand value is not ROCK, PAPER or SCISSORS
    InvalidHand,
    /// `state` query parameter is not active, closed or all
    InvalidStateFilter,
    ValidationError,
    /// Malformed JSON or path
    BadRequest,

    // Not found
    GameNotFound,
    NotFound,

    // Conflicts
    /// No free game code could be allocated
    GameCodeConflict,
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 14] = [
        Self::InvalidHand,
        Self::InvalidStateFilter,
        Self::ValidationError,
        Self::BadRequest,
        Self::GameNotFound,
        Self::NotFound,
        Self::GameCodeConflict,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::ConfigError,
        Self::Internal,
    ];

    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHand => "INVALID_HAND",
            Self::InvalidStateFilter => "INVALID_STATE_FILTER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::GameCodeConflict => "GAME_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
