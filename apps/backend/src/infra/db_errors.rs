//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos convert with `?` through the
//! `From` impl below, and handlers map `DomainError` to `AppError`.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Postgres names the constraint (`games_pkey`); SQLite names the column.
fn is_game_code_violation(msg: &str) -> bool {
    msg.contains("games_pkey") || msg.contains("games.code")
}

pub fn map_db_err(e: DbErr) -> DomainError {
    let msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, error = %msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&msg) {
        warn!(trace_id = %trace_id, error = %msg, "Unique constraint violation");
        if is_game_code_violation(&msg) {
            return DomainError::conflict(ConflictKind::GameCodeConflict, "Game code already exists");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    // SQLite gives up after its busy timeout with "database is locked".
    if msg.contains("timeout") || msg.contains("timed out") || msg.contains("database is locked")
    {
        warn!(trace_id = %trace_id, error = %msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, error = %msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
