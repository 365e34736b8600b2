//! Player-vs-computer routes.

use actix_web::{web, HttpResponse};
use game_rules::{Hand, PvcOutcome};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::HandParam;
use crate::services::computer::{play_against_computer, random_hand};

#[derive(Debug, Serialize)]
pub struct RandomHandResponse {
    pub hand: Hand,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub computer: Hand,
    pub player: Hand,
    pub outcome: PvcOutcome,
}

/// GET /random-hand
async fn get_random_hand() -> Result<HttpResponse, AppError> {
    let hand = random_hand(&mut rand::rng());
    Ok(HttpResponse::Ok().json(RandomHandResponse { hand }))
}

/// GET /play/{hand}
async fn play(hand: HandParam) -> Result<HttpResponse, AppError> {
    let result = play_against_computer(&mut rand::rng(), hand.0);
    Ok(HttpResponse::Ok().json(PlayResponse {
        computer: result.computer,
        player: result.player,
        outcome: result.outcome,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/random-hand", web::get().to(get_random_hand))
        .route("/play/{hand}", web::get().to(play));
}
