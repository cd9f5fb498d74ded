/// Error types, one enum per concern.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield must be finite and larger than {min}x{min}, got {width}x{height}")]
    Playfield { width: f32, height: f32, min: f32 },
    #[error("{field} must be a positive, finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("enemy_fire_chance must be within [0, 1], got {0}")]
    FireChance(f64),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a run could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("log in before starting a run")]
    NotAuthenticated,
    #[error("a run is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("user {0} does not exist")]
    UserNotFound(String),
    #[error("incorrect username or password")]
    WrongPassword,
    #[error("user {0} already exists")]
    UserExists(String),
    #[error("username must be non-empty and contain no whitespace")]
    InvalidUsername,
    #[error("password must be at least {min} characters")]
    InvalidPassword { min: usize },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score store holds malformed data: {0}")]
    Format(#[from] serde_json::Error),
}
