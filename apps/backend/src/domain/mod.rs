//! Domain types. The rules themselves live in the `game-rules` crate.

pub mod game;

pub use game::{GameRecord, GameView};
pub use game_rules::{decide, Decision, GameState, Hand, PvcOutcome, PvpOutcome};
