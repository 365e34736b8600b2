use thiserror::Error;

/// Failure to parse one of the rule vocabulary names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid hand: {0}")]
    Hand(String),
    #[error("Invalid game state: {0}")]
    State(String),
    #[error("Invalid outcome: {0}")]
    Outcome(String),
}
