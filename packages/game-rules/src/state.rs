//! Game lifecycle states.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Lifecycle of a two-player game: created ACTIVE, closed exactly once.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameState {
    Active,
    Closed,
}

impl GameState {
    pub const ALL: [GameState; 2] = [GameState::Active, GameState::Closed];

    pub const fn as_str(self) -> &'static str {
        match self {
            GameState::Active => "ACTIVE",
            GameState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GameState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::State(s.to_string()))
    }
}
