//! Response header injection
//!
//! Headers that must be present on every response, including errors.

use hyper::header::{HeaderName, HeaderValue, SERVER};
use hyper::Response;

pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

pub const EMBEDDER_POLICY_VALUE: &str = "cross-origin";
pub const OPENER_POLICY_VALUE: &str = "same-origin";

/// Insert the cross-origin isolation headers, replacing any existing values
pub fn inject_isolation_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(
        CROSS_ORIGIN_EMBEDDER_POLICY,
        HeaderValue::from_static(EMBEDDER_POLICY_VALUE),
    );
    headers.insert(
        CROSS_ORIGIN_OPENER_POLICY,
        HeaderValue::from_static(OPENER_POLICY_VALUE),
    );
}

/// Set the `Server` header unless the name is empty or not a valid header value
pub fn inject_server_header<B>(response: &mut Response<B>, server_name: &str) {
    if server_name.is_empty() {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(SERVER, value);
    }
}
