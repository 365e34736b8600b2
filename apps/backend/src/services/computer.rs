//! Playing against the computer. Nothing here is persisted.

use game_rules::{Hand, PvcOutcome};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvcGameResult {
    pub computer: Hand,
    pub player: Hand,
    pub outcome: PvcOutcome,
}

/// Uniformly random hand.
pub fn random_hand<R: Rng + ?Sized>(rng: &mut R) -> Hand {
    Hand::from_index(rng.random_range(0..Hand::ALL.len()))
}

pub fn play_against_computer<R: Rng + ?Sized>(rng: &mut R, player: Hand) -> PvcGameResult {
    let computer = random_hand(rng);
    PvcGameResult {
        computer,
        player,
        outcome: PvcOutcome::of(computer, player),
    }
}
