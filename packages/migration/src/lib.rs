//! Schema migrations for the games store.

use std::str::FromStr;

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

// keep filename + module name in sync
mod m20240601_000001_create_games;
mod m20240601_000002_add_outcome_to_games;

pub use m20240601_000002_add_outcome_to_games::backfill_outcomes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_games::Migration),
            Box::new(m20240601_000002_add_outcome_to_games::Migration),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl FromStr for MigrationCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "reset" => Ok(Self::Reset),
            "refresh" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "Unknown command: {other}. Use: up | down | fresh | reset | refresh | status"
            )),
        }
    }
}

/// Run one migration command against an already-open connection.
///
/// Shared by the migration CLI, application startup and tests.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = DbDiagnostics::collect(db).await?;
    tracing::info!(
        cmd = ?command,
        backend = %before.backend,
        db = %before.name,
        defined = before.defined,
        applied = before.applied,
        "migrate=start"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let after = DbDiagnostics::collect(db).await?;
                tracing::info!(cmd = ?command, applied = after.applied, "migrate=done");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(cmd = ?command, backend = %before.backend, error = %e, "migrate=failed");
            Err(e)
        }
    }
}

#[derive(Debug)]
struct DbDiagnostics {
    backend: String,
    name: String,
    applied: usize,
    defined: usize,
}

impl DbDiagnostics {
    async fn collect(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let name = match backend {
            DatabaseBackend::Postgres => {
                let stmt = Statement::from_string(backend, "select current_database() as name");
                match db.query_one(stmt).await? {
                    Some(row) => row.try_get("", "name")?,
                    None => "<unknown>".to_string(),
                }
            }
            DatabaseBackend::Sqlite => {
                let stmt = Statement::from_string(
                    backend,
                    "SELECT file FROM pragma_database_list WHERE name = 'main'",
                );
                match db.query_one(stmt).await? {
                    Some(row) => match row.try_get::<String>("", "file") {
                        Ok(file) if file.is_empty() => ":memory:".to_string(),
                        Ok(file) => file,
                        Err(_) => "<unknown>".to_string(),
                    },
                    None => "<unknown>".to_string(),
                }
            }
            _ => "<unsupported>".to_string(),
        };

        Ok(Self {
            backend: format!("{backend:?}"),
            name,
            applied: count_applied_migrations(db).await.unwrap_or(0),
            defined: Migrator::migrations().len(),
        })
    }
}

/// Number of applied migrations; 0 when the bookkeeping table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the latest applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
