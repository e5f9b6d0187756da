//! Logger module
//!
//! Provides logging utilities for the preview server:
//! - Server lifecycle logging
//! - Error, warning and debug logging with a level filter
//! - File-based logging support
//!
//! No per-request access log is written.

mod format;
pub mod writer;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Log severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = Level::parse(&config.logging.level).unwrap_or(Level::Info);
    writer::init(config.logging.log_file.as_deref(), level)
}

fn write(level: Level, message: &str) {
    match writer::get() {
        Some(w) => {
            if w.enabled(level) {
                w.write(level, &format::format_line(level, message));
            }
        }
        // Not initialized (tests, early startup): everything but debug goes to the console
        None => {
            if level != Level::Debug {
                writer::write_console(level, &format::format_line(level, message));
            }
        }
    }
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write(Level::Debug, message);
}

pub fn log_warning(message: &str) {
    write(Level::Warn, message);
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    log_info("======================================");
    log_info("Preview server started successfully");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Serving directory: {}", root.display()));
    log_info(&format!(
        "SPA fallback document: /{}",
        config.static_files.index_file
    ));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.log_file {
        log_info(&format!("Log file: {path}"));
    }
    log_info("======================================");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}
