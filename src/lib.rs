//! Static asset preview server for single-page applications
//!
//! Serves a pre-built directory over HTTP/1.1 with:
//! - SPA fallback: extension-less paths are answered with the entry document
//! - Fixed `Content-Type` for JavaScript and CSS
//! - Cross-origin isolation headers on every response

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config};
pub use error::{Result, ServerError};
pub use server::Server;
