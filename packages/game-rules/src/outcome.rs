//! Outcome engine: one cyclic rule, three output vocabularies.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::hand::Hand;

/// Result of comparing a first hand against a second hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Decision {
    FirstWins,
    SecondWins,
    Draw,
}

/// Decide the winner of `first` against `second`.
///
/// Equal hands draw. If `second` is the hand that beats `first`, the second
/// hand wins; otherwise the first does.
pub fn decide(first: Hand, second: Hand) -> Decision {
    if first == second {
        Decision::Draw
    } else if first.beaten_by() == second {
        Decision::SecondWins
    } else {
        Decision::FirstWins
    }
}

/// Outcome of a game between two human players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PvpOutcome {
    Player1Win,
    Player2Win,
    Draw,
}

impl PvpOutcome {
    pub const ALL: [PvpOutcome; 3] = [
        PvpOutcome::Player1Win,
        PvpOutcome::Player2Win,
        PvpOutcome::Draw,
    ];

    pub fn of(player1: Hand, player2: Hand) -> Self {
        match decide(player1, player2) {
            Decision::FirstWins => PvpOutcome::Player1Win,
            Decision::SecondWins => PvpOutcome::Player2Win,
            Decision::Draw => PvpOutcome::Draw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PvpOutcome::Player1Win => "PLAYER_1_WIN",
            PvpOutcome::Player2Win => "PLAYER_2_WIN",
            PvpOutcome::Draw => "DRAW",
        }
    }
}

/// Outcome of a game between a player and the computer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PvcOutcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

impl PvcOutcome {
    pub const ALL: [PvcOutcome; 3] = [
        PvcOutcome::PlayerWin,
        PvcOutcome::ComputerWin,
        PvcOutcome::Draw,
    ];

    /// The computer's hand is the first hand, the player's the second.
    pub fn of(computer: Hand, player: Hand) -> Self {
        match decide(computer, player) {
            Decision::FirstWins => PvcOutcome::ComputerWin,
            Decision::SecondWins => PvcOutcome::PlayerWin,
            Decision::Draw => PvcOutcome::Draw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PvcOutcome::PlayerWin => "PLAYER_WIN",
            PvcOutcome::ComputerWin => "COMPUTER_WIN",
            PvcOutcome::Draw => "DRAW",
        }
    }
}

impl fmt::Display for PvpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PvcOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PvpOutcome {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PvpOutcome::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::Outcome(s.to_string()))
    }
}

impl FromStr for PvcOutcome {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PvcOutcome::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::Outcome(s.to_string()))
    }
}
