//! Server settings read from the environment.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_CODE_LENGTH: usize = 8;
pub const CODE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Length of generated game codes
    pub code_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl ServerConfig {
    /// `BACKEND_HOST`, `BACKEND_PORT` and `GAME_CODE_LENGTH`, each optional.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = parse_var("BACKEND_PORT")?.unwrap_or(defaults.port);
        let code_length = parse_var("GAME_CODE_LENGTH")?.unwrap_or(defaults.code_length);

        if !CODE_LENGTH_RANGE.contains(&code_length) {
            return Err(AppError::config(format!(
                "GAME_CODE_LENGTH must be between {} and {}, got {code_length}",
                CODE_LENGTH_RANGE.start(),
                CODE_LENGTH_RANGE.end()
            )));
        }

        Ok(Self {
            host,
            port,
            code_length,
        })
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::config(format!("{name}: {e}"))),
    }
}
