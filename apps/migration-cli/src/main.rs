use std::str::FromStr;

use clap::{Parser, ValueEnum};
use db_infra::config::db::{DbKind, RuntimeEnv};
use db_infra::orchestrate_migration;
use migration::MigrationCommand;
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

/// In-memory SQLite is left out on purpose: the database would vanish when
/// the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Schema migrations for the rock-paper-scissors games store")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = MigrationCommand::from_str)]
    command: MigrationCommand,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database engine
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let env = RuntimeEnv::from(args.env);
    let kind = DbKind::from(args.db);

    match orchestrate_migration(env, kind, args.command).await {
        Ok(()) => info!(cmd = ?args.command, db_kind = %kind, "migration finished"),
        Err(e) => {
            error!(cmd = ?args.command, db_kind = %kind, error = %e, "migration failed");
            std::process::exit(1);
        }
    }
}
