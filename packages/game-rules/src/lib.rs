//! Rock-paper-scissors rules shared by the backend and the schema migrations.
//!
//! Everything here is pure: no I/O, no randomness, no persistence.

pub mod error;
pub mod hand;
pub mod outcome;
pub mod serde_impls;
pub mod state;


pub use error::ParseError;
pub use hand::Hand;
pub use outcome::{decide, Decision, PvcOutcome, PvpOutcome};
pub use state::GameState;
