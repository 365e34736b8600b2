//! Database selection and connection-string construction from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Runtime environment the process is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Database engine and storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// Lives as long as its single pooled connection.
    SqliteMemory,
}

impl DbKind {
    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }

    /// Read `RPS_DB_KIND`, defaulting to Postgres when unset.
    pub fn from_env() -> Result<Self, DbInfraError> {
        match env::var("RPS_DB_KIND") {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(DbKind::Postgres),
            Err(e) => Err(DbInfraError::config(format!("RPS_DB_KIND: {e}"))),
        }
    }
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unsupported database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteFile => "sqlite-file",
            DbKind::SqliteMemory => "sqlite-memory",
        };
        f.write_str(s)
    }
}

/// Which set of credentials to connect with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application access (DML only)
    App,
    /// Schema owner, used for migrations
    Owner,
}

/// Build the connection string for the given environment, engine and owner.
pub fn make_conn_spec(env: RuntimeEnv, kind: DbKind, owner: DbOwner) -> Result<String, DbInfraError> {
    match kind {
        DbKind::Postgres => postgres_url(env, owner),
        DbKind::SqliteFile => {
            let path = sqlite_file_path(env)?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn postgres_url(env: RuntimeEnv, owner: DbOwner) -> Result<String, DbInfraError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(env)?;
    let (username, password) = credentials(owner)?;

    let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
    let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let name = must_var("TEST_DB")?;
            if !name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{name}'"
                )));
            }
            Ok(name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((must_var("RPS_OWNER_USER")?, must_var("RPS_OWNER_PASSWORD")?)),
    }
}

fn sqlite_file_path(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env::var("RPS_SQLITE_FILE") {
        Ok(path) if !path.trim().is_empty() => Ok(path),
        _ => match env {
            RuntimeEnv::Prod => Err(DbInfraError::config(
                "Required environment variable 'RPS_SQLITE_FILE' is not set",
            )),
            RuntimeEnv::Test => Ok("rps_test.sqlite".to_string()),
        },
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}
