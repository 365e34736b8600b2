//! Game record store.

use game_rules::{GameState, Hand, PvpOutcome};
use sea_orm::ConnectionTrait;

use crate::adapters::games_sea::{self as games_adapter, GameClose, GameUpsert};
use crate::domain::GameRecord;
use crate::entities::games;
use crate::errors::domain::DomainError;

impl TryFrom<games::Model> for GameRecord {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, value: &str| {
            DomainError::data_corruption(format!(
                "game {}: unreadable {field} value '{value}'",
                model.code
            ))
        };

        let parse_hand = |field: &str, raw: &Option<String>| -> Result<Option<Hand>, DomainError> {
            raw.as_deref()
                .map(|v| v.parse::<Hand>().map_err(|_| corrupt(field, v)))
                .transpose()
        };

        let player1 = parse_hand("player_1", &model.player1)?;
        let player2 = parse_hand("player_2", &model.player2)?;
        let state = model
            .state
            .parse::<GameState>()
            .map_err(|_| corrupt("state", &model.state))?;
        let outcome = model
            .outcome
            .as_deref()
            .map(|v| v.parse::<PvpOutcome>().map_err(|_| corrupt("outcome", v)))
            .transpose()?;

        let record = GameRecord {
            code: model.code.clone(),
            player1,
            player2,
            state,
            outcome,
        };
        record.check_invariants()?;
        Ok(record)
    }
}

impl From<&GameRecord> for GameUpsert {
    fn from(record: &GameRecord) -> Self {
        GameUpsert {
            code: record.code.clone(),
            player1: record.player1.map(|h| h.as_str().to_string()),
            player2: record.player2.map(|h| h.as_str().to_string()),
            state: record.state.as_str().to_string(),
            outcome: record.outcome.map(|o| o.as_str().to_string()),
        }
    }
}

fn to_domain(model: Option<games::Model>) -> Result<Option<GameRecord>, DomainError> {
    model.map(GameRecord::try_from).transpose()
}

/// Insert or overwrite the record with the same code.
pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    record: &GameRecord,
) -> Result<GameRecord, DomainError> {
    record.check_invariants()?;
    let model = games_adapter::upsert(conn, GameUpsert::from(record)).await?;
    GameRecord::try_from(model)
}

/// Insert a new record unless its code is taken. `false` means taken.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    record: &GameRecord,
) -> Result<bool, DomainError> {
    record.check_invariants()?;
    Ok(games_adapter::insert_if_absent(conn, GameUpsert::from(record)).await?)
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<GameRecord>, DomainError> {
    to_domain(games_adapter::find_by_code(conn, code).await?)
}

pub async fn find_by_code_and_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    state: GameState,
) -> Result<Option<GameRecord>, DomainError> {
    to_domain(games_adapter::find_by_code_and_state(conn, code, state.as_str()).await?)
}

/// All records in `state`, ordered by code.
pub async fn find_all_by_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state: GameState,
) -> Result<Vec<GameRecord>, DomainError> {
    games_adapter::find_all_by_state(conn, state.as_str())
        .await?
        .into_iter()
        .map(GameRecord::try_from)
        .collect()
}

/// Compare-and-swap close. `None` means the game was not ACTIVE (or absent)
/// at the moment of the update.
///
/// The outcome is decided by the rules for every first hand up front, so the
/// close is one conditional write with no read before it.
pub async fn close_if_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    player2: Hand,
) -> Result<Option<GameRecord>, DomainError> {
    let dto = GameClose {
        code: code.to_string(),
        player2: player2.as_str().to_string(),
        outcomes: Hand::ALL
            .into_iter()
            .map(|first| {
                (
                    first.as_str().to_string(),
                    PvpOutcome::of(first, player2).as_str().to_string(),
                )
            })
            .collect(),
        expected_state: GameState::Active.as_str().to_string(),
        new_state: GameState::Closed.as_str().to_string(),
    };
    to_domain(games_adapter::close_if_state(conn, dto).await?)
}
