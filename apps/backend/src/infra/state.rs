use db_infra::config::db::{DbKind, RuntimeEnv};

use crate::config::app::DEFAULT_CODE_LENGTH;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builds `AppState` for the server and for tests.
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    code_length: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Test,
            db_kind: None,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length;
        self
    }

    /// Connects and migrates when a database was requested.
    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.env, kind).await?;
                Ok(AppState::new(conn, self.code_length))
            }
            None => Ok(AppState::new_without_db()),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
