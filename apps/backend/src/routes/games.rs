//! Player-vs-player game routes.

use std::str::FromStr;

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpRequest, HttpResponse};
use game_rules::{GameState, Hand, PvpOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::{GameRecord, GameView};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::extractors::ValidatedJson;
use crate::services::games::GameService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub first_hand: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHandRequest {
    pub second_hand: String,
}

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub code: String,
}

/// What anyone may see of an ACTIVE game.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub code: String,
    pub state: GameState,
}

#[derive(Debug, Serialize)]
pub struct GameDetails {
    pub code: String,
    pub state: GameState,
    pub player1: Option<Hand>,
    pub player2: Option<Hand>,
    pub outcome: Option<PvpOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GameResponse {
    Summary(GameSummary),
    Details(GameDetails),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllGamesResponse {
    pub active_games: Vec<GameSummary>,
    pub closed_games: Vec<GameDetails>,
}

impl From<GameRecord> for GameSummary {
    fn from(record: GameRecord) -> Self {
        Self {
            code: record.code,
            state: record.state,
        }
    }
}

impl From<GameRecord> for GameDetails {
    fn from(record: GameRecord) -> Self {
        Self {
            code: record.code,
            state: record.state,
            player1: record.player1,
            player2: record.player2,
            outcome: record.outcome,
        }
    }
}

impl From<GameView> for GameResponse {
    fn from(view: GameView) -> Self {
        match view {
            GameView::Pending { code } => GameResponse::Summary(GameSummary {
                code,
                state: GameState::Active,
            }),
            GameView::Settled(record) => GameResponse::Details(record.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    Active,
    Closed,
    All,
}

impl FromStr for StateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StateFilter::Active),
            "closed" => Ok(StateFilter::Closed),
            "all" => Ok(StateFilter::All),
            other => Err(DomainError::validation(
                ValidationKind::InvalidStateFilter,
                format!("Unknown state filter '{other}'; expected active, closed or all"),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub state: Option<String>,
}

fn parse_hand(raw: &str) -> Result<Hand, AppError> {
    raw.parse::<Hand>()
        .map_err(|e| AppError::from(DomainError::from(e)))
}

/// POST /games
async fn create_game(
    http_req: HttpRequest,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let first_hand = parse_hand(&body.into_inner().first_hand)?;
    let service = GameService::new(app_state.code_length());
    let mut rng = StdRng::from_os_rng();

    let code = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok::<_, AppError>(service.create_game(txn, &mut rng, first_hand).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/games/{code}")))
        .json(CreateGameResponse { code }))
}

/// PUT /games/{code}
async fn submit_second_hand(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: ValidatedJson<SubmitHandRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let second_hand = parse_hand(&body.into_inner().second_hand)?;
    let service = GameService::new(app_state.code_length());

    let closed = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok::<_, AppError>(service.submit_second_hand(txn, &code, second_hand).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameDetails::from(closed)))
}

/// GET /games/{code}
async fn get_game(
    http_req: HttpRequest,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let service = GameService::new(app_state.code_length());

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(service.get_game(txn, &code).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(view)))
}

/// GET /games?state=active|closed|all
async fn list_games(
    http_req: HttpRequest,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = match query.state.as_deref() {
        Some(raw) => raw.parse::<StateFilter>()?,
        None => StateFilter::All,
    };
    let service = GameService::new(app_state.code_length());

    let (active, closed) = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let active = match filter {
                StateFilter::Active | StateFilter::All => service.list_active(txn).await?,
                StateFilter::Closed => Vec::new(),
            };
            let closed = match filter {
                StateFilter::Closed | StateFilter::All => service.list_closed(txn).await?,
                StateFilter::Active => Vec::new(),
            };
            Ok::<_, AppError>((active, closed))
        })
    })
    .await?;

    let active: Vec<GameSummary> = active.into_iter().map(GameSummary::from).collect();
    let closed: Vec<GameDetails> = closed.into_iter().map(GameDetails::from).collect();

    let response = match filter {
        StateFilter::Active => HttpResponse::Ok().json(active),
        StateFilter::Closed => HttpResponse::Ok().json(closed),
        StateFilter::All => HttpResponse::Ok().json(AllGamesResponse {
            active_games: active,
            closed_games: closed,
        }),
    };
    Ok(response)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    )
    .service(
        web::resource("/{code}")
            .route(web::get().to(get_game))
            .route(web::put().to(submit_second_hand)),
    );
}
