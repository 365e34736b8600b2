use sea_orm::DatabaseConnection;

use crate::config::app::DEFAULT_CODE_LENGTH;

/// Shared resources handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Optional so route tests can run without a database.
    db: Option<DatabaseConnection>,
    code_length: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, code_length: usize) -> Self {
        Self {
            db: Some(db),
            code_length,
        }
    }

    pub fn new_without_db() -> Self {
        Self {
            db: None,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }
}
