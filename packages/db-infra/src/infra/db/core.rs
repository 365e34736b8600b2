use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;
use crate::infra::db::locking::with_pg_advisory_lock;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

/// Writers wait this long for a SQLite lock before failing with "database is locked".
pub const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(url: &str, kind: DbKind, max_connections: u32) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    match kind {
        // Every sqlite::memory: connection is a separate database.
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            opt.min_connections(1).max_connections(max_connections);
        }
    }

    if kind.is_sqlite() {
        let wal = kind == DbKind::SqliteFile;
        opt.map_sqlx_sqlite_opts(move |sqlite| {
            let sqlite = sqlite
                .busy_timeout(SQLITE_BUSY_TIMEOUT)
                .pragma("foreign_keys", "ON");
            if wal {
                sqlite
                    .pragma("journal_mode", "WAL")
                    .pragma("synchronous", "NORMAL")
            } else {
                sqlite
            }
        });
    }
    opt
}

/// Open a connection pool for `owner`. Postgres connects are retried a few
/// times so the backend can start alongside its database container.
pub async fn connect(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, kind, owner)?;
    let opt = connect_options(&url, kind, 10);

    info!(db_kind = %kind, url = %sanitize_db_url(&url), "db=connect");

    let connect_once = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt).await.map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to {kind}: {e}"),
            })
        }
    };

    match kind {
        DbKind::Postgres => retry_connection(connect_once, 5, 500).await,
        DbKind::SqliteFile | DbKind::SqliteMemory => connect_once().await,
    }
}

/// Single-connection pool with owner credentials, used for migrations.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, kind, DbOwner::Owner)?;
    let opt = connect_options(&url, kind, 1);

    let connect_once = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt).await.map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to {kind} (admin pool): {e}"),
            })
        }
    };

    match kind {
        DbKind::Postgres => retry_connection(connect_once, 5, 500).await,
        DbKind::SqliteFile | DbKind::SqliteMemory => connect_once().await,
    }
}

/// Mask the password in a connection string for logging and lock keys.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if colon_pos > auth_part.find("://").map_or(0, |p| p + 2) => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

/// Run a migration command with owner credentials.
///
/// On Postgres the run is serialized across processes with an advisory lock
/// so several instances starting at once do not race on the schema.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let pool = build_admin_pool(env, kind).await?;
    run_migration_on(&pool, env, kind, command).await
}

/// Like `orchestrate_migration`, on a pool the caller already holds.
pub async fn run_migration_on(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(env = ?env, db_kind = %kind, cmd = ?command, "migrate=orchestrate");

    let run = || async {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::Migration {
                message: format!("migration execution failed: {e}"),
            })
    };

    match kind {
        DbKind::Postgres => {
            let url = make_conn_spec(env, kind, DbOwner::Owner)?;
            let key = format!("rps:migrate:{}", sanitize_db_url(&url));
            with_pg_advisory_lock(pool, &key, run).await
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => run().await,
    }
}
