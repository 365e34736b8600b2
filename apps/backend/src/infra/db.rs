use db_infra::config::db::{DbKind, DbOwner, RuntimeEnv};
use db_infra::{connect, run_migration_on};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Connect and bring the schema up to date.
///
/// In-memory SQLite has a single connection, so migrations run on the app
/// pool itself; every other kind migrates through a separate owner pool.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect(env, kind, DbOwner::App).await?;

    match kind {
        DbKind::SqliteMemory => run_migration_on(&conn, env, kind, MigrationCommand::Up).await?,
        DbKind::Postgres | DbKind::SqliteFile => {
            db_infra::orchestrate_migration(env, kind, MigrationCommand::Up).await?
        }
    }

    info!(env = ?env, db_kind = %kind, "db=ready");
    Ok(conn)
}
