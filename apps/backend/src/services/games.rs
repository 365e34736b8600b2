//! Two-player game lifecycle: ACTIVE on creation, CLOSED on the second hand.

use game_rules::{GameState, Hand};
use rand::Rng;
use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::domain::{GameRecord, GameView};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::games;
use crate::utils::game_code::next_code;

/// Fresh codes drawn before giving up on finding a free one.
pub const MAX_CODE_ATTEMPTS: usize = 5;

pub struct GameService {
    code_length: usize,
}

impl GameService {
    pub fn new(code_length: usize) -> Self {
        Self { code_length }
    }

    /// Store a new ACTIVE game holding `first_hand` and return its code.
    pub async fn create_game<C, R>(
        &self,
        conn: &C,
        rng: &mut R,
        first_hand: Hand,
    ) -> Result<String, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
        R: Rng + Send + ?Sized,
    {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = next_code(rng, self.code_length);
            if !games::create(conn, &GameRecord::open(code.clone(), first_hand)).await? {
                debug!(attempt, "generated game code already taken");
                continue;
            }

            info!(code = %code, "game created");
            return Ok(code);
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "no free game code");
        Err(DomainError::conflict(
            ConflictKind::GameCodeConflict,
            format!("Could not allocate a free game code after {MAX_CODE_ATTEMPTS} attempts"),
        ))
    }

    /// Close an ACTIVE game with the second hand.
    ///
    /// The ACTIVE lookup and the close are one conditional update, so of
    /// several concurrent submissions exactly one matches. Unknown codes,
    /// CLOSED games and lost races all report NotFound.
    pub async fn submit_second_hand<C>(
        &self,
        conn: &C,
        code: &str,
        second_hand: Hand,
    ) -> Result<GameRecord, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        match games::close_if_active(conn, code, second_hand).await? {
            Some(closed) => {
                if let Some(outcome) = closed.outcome {
                    info!(code = %code, outcome = %outcome, "game closed");
                }
                Ok(closed)
            }
            None => {
                debug!(code = %code, "no ACTIVE game to close");
                Err(DomainError::game_not_found(code))
            }
        }
    }

    pub async fn get_game<C>(&self, conn: &C, code: &str) -> Result<GameView, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        games::find_by_code(conn, code)
            .await?
            .map(GameView::from)
            .ok_or_else(|| DomainError::game_not_found(code))
    }

    pub async fn list_active<C>(&self, conn: &C) -> Result<Vec<GameRecord>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        games::find_all_by_state(conn, GameState::Active).await
    }

    pub async fn list_closed<C>(&self, conn: &C) -> Result<Vec<GameRecord>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        games::find_all_by_state(conn, GameState::Closed).await
    }
}
