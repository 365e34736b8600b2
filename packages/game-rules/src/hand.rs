//! The three hands and the cyclic "beaten by" relation.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    /// All hands in cycle order. Each hand is beaten by its successor.
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    fn index(self) -> usize {
        match self {
            Hand::Rock => 0,
            Hand::Paper => 1,
            Hand::Scissors => 2,
        }
    }

    /// Hand at `index` in cycle order, wrapping around.
    pub fn from_index(index: usize) -> Hand {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The single hand that beats this one.
    pub fn beaten_by(self) -> Hand {
        Self::from_index(self.index() + 1)
    }

    /// The single hand this one beats.
    pub fn beats(self) -> Hand {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Hand::Rock => "ROCK",
            Hand::Paper => "PAPER",
            Hand::Scissors => "SCISSORS",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Trimming makes values read back from fixed-width CHAR columns parse too.
impl FromStr for Hand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Hand::ALL
            .into_iter()
            .find(|hand| hand.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::Hand(s.to_string()))
    }
}
