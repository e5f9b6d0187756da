//! Request handler module
//!
//! Responsible for request dispatch: SPA path rewriting and static file
//! serving under the server root.

pub mod router;
pub mod spa;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
