use std::future::Future;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::DbInfraError;

pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Run `f` while holding a session-level Postgres advisory lock.
///
/// The pool must have exactly one connection so that lock and unlock land on
/// the same session. The lock is released whether `f` succeeds or fails.
pub async fn with_pg_advisory_lock<T, F, Fut>(
    pool: &DatabaseConnection,
    key: &str,
    f: F,
) -> Result<T, DbInfraError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let lock_id = pg_lock_id(key);
    let backend = pool.get_database_backend();

    pool.execute(Statement::from_string(
        backend,
        format!("SELECT pg_advisory_lock({lock_id})"),
    ))
    .await
    .map_err(|e| DbInfraError::Migration {
        message: format!("failed to acquire migration lock: {e}"),
    })?;
    debug!(lock_id, "migration lock acquired");

    let out = f().await;

    if let Err(e) = pool
        .execute(Statement::from_string(
            backend,
            format!("SELECT pg_advisory_unlock({lock_id})"),
        ))
        .await
    {
        warn!(lock_id, error = %e, "failed to release migration lock");
    }

    out
}
