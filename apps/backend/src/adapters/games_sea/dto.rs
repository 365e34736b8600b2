//! DTOs for the games_sea adapter. Values are already in column form.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameUpsert {
    pub code: String,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub state: String,
    pub outcome: Option<String>,
}

/// Settle an ACTIVE game; applied only while the row is still ACTIVE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClose {
    pub code: String,
    pub player2: String,
    /// Outcome for each possible stored first hand: `(player_1, outcome)`
    pub outcomes: Vec<(String, String)>,
    /// State value that must currently be stored
    pub expected_state: String,
    pub new_state: String,
}
