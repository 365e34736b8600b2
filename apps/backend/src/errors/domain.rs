//! Domain-level error type used across services and repos.
//!
//! HTTP- and DB-agnostic. Handlers return `Result<T, AppError>` and convert
//! through `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// A stored record does not satisfy the game record invariants.
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    GameCodeConflict,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidHand,
    InvalidStateFilter,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input or business rule violation
    Validation(ValidationKind, String),
    Conflict(ConflictKind, String),
    NotFound(NotFoundKind, String),
    /// Operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn game_not_found(code: &str) -> Self {
        Self::not_found(NotFoundKind::Game, format!("Game {code} not found"))
    }

    pub fn data_corruption(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::DataCorruption, detail)
    }
}

impl From<game_rules::ParseError> for DomainError {
    fn from(e: game_rules::ParseError) -> Self {
        match e {
            game_rules::ParseError::Hand(_) => {
                Self::validation(ValidationKind::InvalidHand, e.to_string())
            }
            game_rules::ParseError::State(_) => {
                Self::validation(ValidationKind::InvalidStateFilter, e.to_string())
            }
            game_rules::ParseError::Outcome(_) => {
                Self::validation(ValidationKind::Other("Outcome".into()), e.to_string())
            }
        }
    }
}
