//! SeaORM adapter for the games table, generic over ConnectionTrait.

use sea_orm::sea_query::{CaseStatement, Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::games;

pub mod dto;

pub use dto::{GameClose, GameUpsert};

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(code.to_string()).one(conn).await
}

pub async fn find_by_code_and_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    state: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Code.eq(code))
        .filter(games::Column::State.eq(state))
        .one(conn)
        .await
}

pub async fn find_all_by_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: &str,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::State.eq(state))
        .order_by_asc(games::Column::Code)
        .all(conn)
        .await
}

/// Insert, or overwrite every column of the row with the same code.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpsert,
) -> Result<games::Model, sea_orm::DbErr> {
    let code = dto.code.clone();
    let active = games::ActiveModel {
        code: Set(dto.code),
        player1: Set(dto.player1),
        player2: Set(dto.player2),
        state: Set(dto.state),
        outcome: Set(dto.outcome),
    };

    games::Entity::insert(active)
        .on_conflict(
            OnConflict::column(games::Column::Code)
                .update_columns([
                    games::Column::Player1,
                    games::Column::Player2,
                    games::Column::State,
                    games::Column::Outcome,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_code(conn, &code)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("game {code}")))
}

/// Insert unless the code is already taken. Returns whether a row was written.
///
/// `ON CONFLICT DO NOTHING` keeps the transaction usable on Postgres, where a
/// failed insert would abort it.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpsert,
) -> Result<bool, sea_orm::DbErr> {
    let active = games::ActiveModel {
        code: Set(dto.code),
        player1: Set(dto.player1),
        player2: Set(dto.player2),
        state: Set(dto.state),
        outcome: Set(dto.outcome),
    };
    let inserted = games::Entity::insert(active)
        .on_conflict(
            OnConflict::column(games::Column::Code)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(inserted > 0)
}

/// Conditional close in a single statement, then refetch:
///
/// ```sql
/// UPDATE games
///    SET player_2 = ?, state = ?,
///        outcome = CASE UPPER(TRIM(player_1)) WHEN ? THEN ? ... END
///  WHERE code = ? AND state = ?
/// ```
///
/// The outcome is picked from `dto.outcomes` by the stored first hand, so
/// nothing is read before the write. A first hand missing from the table
/// leaves `outcome` NULL, which the repo reports as corruption.
///
/// Returns `None` when no row matched, either because the code is unknown
/// or because another writer closed it first.
pub async fn close_if_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameClose,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    let mut outcome = CaseStatement::new();
    for (first, decided) in dto.outcomes {
        outcome = outcome.case(
            Expr::expr(Expr::cust("UPPER(TRIM(player_1))")).eq(first),
            Expr::val(decided),
        );
    }

    let result = games::Entity::update_many()
        .col_expr(games::Column::Player2, Expr::value(dto.player2))
        .col_expr(games::Column::Outcome, outcome.into())
        .col_expr(games::Column::State, Expr::value(dto.new_state))
        .filter(games::Column::Code.eq(dto.code.as_str()))
        .filter(games::Column::State.eq(dto.expected_state))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }

    find_by_code(conn, &dto.code).await
}
