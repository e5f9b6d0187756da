//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the request handler: content types,
//! injected headers, cache validators, range parsing and response builders.

pub mod conditional;
pub mod headers;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use headers::{inject_isolation_headers, inject_server_header};
pub use response::{
    build_400_response, build_403_response, build_404_response, build_405_response,
    build_options_response, HttpResponse,
};
