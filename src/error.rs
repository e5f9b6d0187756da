//! Startup error type
//!
//! Every variant is fatal: `main` reports it and exits with a non-zero status.
//! Per-request failures never reach this type; they become HTTP statuses.

use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("static root '{}' is not accessible: {source}", path.display())]
    MissingRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("static root '{}' is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to open log file: {0}")]
    Logger(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
