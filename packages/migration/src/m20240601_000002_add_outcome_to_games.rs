use game_rules::{GameState, Hand, PvpOutcome};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};
use sea_orm_migration::sea_query::{ColumnDef, Expr, Query, Table};

use crate::m20240601_000001_create_games::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GamesOutcome {
    Outcome,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Games::Table)
                    .add_column(ColumnDef::new(GamesOutcome::Outcome).string_len(16).null())
                    .to_owned(),
            )
            .await?;

        let updated = backfill_outcomes(manager.get_connection()).await?;
        tracing::info!(updated, "backfilled outcome for closed games");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Games::Table)
                    .drop_column(GamesOutcome::Outcome)
                    .to_owned(),
            )
            .await
    }
}

/// Compute and store the outcome of every CLOSED game.
///
/// Safe to run more than once: an outcome is a pure function of the two
/// stored hands, so rewriting it changes nothing. Rows whose hands do not
/// parse are left untouched. Returns the number of rows written.
pub async fn backfill_outcomes<C>(db: &C) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let backend: DatabaseBackend = db.get_database_backend();

    let select = Query::select()
        .columns([Games::Code, Games::Player1, Games::Player2])
        .from(Games::Table)
        .and_where(Expr::col(Games::State).eq(GameState::Closed.as_str()))
        .to_owned();

    let rows = db.query_all(backend.build(&select)).await?;

    let mut updated = 0u64;
    for row in rows {
        let code: String = row.try_get("", "code")?;
        let player1: Option<String> = row.try_get("", "player_1")?;
        let player2: Option<String> = row.try_get("", "player_2")?;

        let hands = match (player1.as_deref(), player2.as_deref()) {
            (Some(p1), Some(p2)) => p1.parse::<Hand>().ok().zip(p2.parse::<Hand>().ok()),
            _ => None,
        };
        let Some((p1, p2)) = hands else {
            tracing::warn!(code = %code, "skipping closed game with unreadable hands");
            continue;
        };

        let outcome = PvpOutcome::of(p1, p2);
        let update = Query::update()
            .table(Games::Table)
            .value(GamesOutcome::Outcome, outcome.as_str())
            .and_where(Expr::col(Games::Code).eq(code.as_str()))
            .to_owned();

        updated += db.execute(backend.build(&update)).await?.rows_affected();
    }

    Ok(updated)
}
