use game_rules::{GameState, Hand, PvpOutcome};

use crate::errors::domain::DomainError;

/// One persisted game.
///
/// `player2` and `outcome` are present exactly when the game is CLOSED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub code: String,
    pub player1: Option<Hand>,
    pub player2: Option<Hand>,
    pub state: GameState,
    pub outcome: Option<PvpOutcome>,
}

impl GameRecord {
    /// A freshly created game: first hand committed, waiting for the second.
    pub fn open(code: impl Into<String>, first_hand: Hand) -> Self {
        Self {
            code: code.into(),
            player1: Some(first_hand),
            player2: None,
            state: GameState::Active,
            outcome: None,
        }
    }

    /// Reject records whose fields disagree with their state.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let consistent = match self.state {
            GameState::Active => {
                self.player1.is_some() && self.player2.is_none() && self.outcome.is_none()
            }
            GameState::Closed => match (self.player1, self.player2, self.outcome) {
                (Some(p1), Some(p2), Some(outcome)) => PvpOutcome::of(p1, p2) == outcome,
                _ => false,
            },
        };

        if consistent {
            Ok(())
        } else {
            Err(DomainError::data_corruption(format!(
                "game {} is {} but its hands and outcome do not match",
                self.code, self.state
            )))
        }
    }
}

/// What a reader may see of a game: hands stay hidden until it is CLOSED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameView {
    Pending { code: String },
    Settled(GameRecord),
}

impl From<GameRecord> for GameView {
    fn from(record: GameRecord) -> Self {
        match record.state {
            GameState::Active => GameView::Pending { code: record.code },
            GameState::Closed => GameView::Settled(record),
        }
    }
}

#[cfg(test)]
impl GameRecord {
    /// A CLOSED record as the rules would settle it.
    pub(crate) fn settled(code: impl Into<String>, first: Hand, second: Hand) -> Self {
        Self {
            code: code.into(),
            player1: Some(first),
            player2: Some(second),
            state: GameState::Closed,
            outcome: Some(PvpOutcome::of(first, second)),
        }
    }
}
