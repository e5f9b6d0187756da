//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, SPA path
//! rewriting, static file lookup and header injection, composed explicitly.

use crate::config::AppState;
use crate::handler::{spa, static_files};
use crate::http::{self, HttpResponse};
use crate::logger;
use hyper::header::{HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, RANGE};
use hyper::{HeaderMap, Method, Request};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

impl<'a> RequestContext<'a> {
    pub fn new(path: &'a str, method: &Method, headers: &HeaderMap) -> Self {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        Self {
            path,
            is_head: *method == Method::HEAD,
            if_none_match: header(IF_NONE_MATCH),
            if_modified_since: header(IF_MODIFIED_SINCE),
            range_header: header(RANGE),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Every response leaving this function carries the cross-origin isolation
/// headers, whatever its status.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<HttpResponse, Infallible> {
    // Bodies are never read; keep only the head across the await
    let (parts, _) = req.into_parts();
    let mut response = dispatch(&parts.method, parts.uri.path(), &parts.headers, &state).await;

    http::inject_isolation_headers(&mut response);
    http::inject_server_header(&mut response, &state.config.http.server_name);
    Ok(response)
}

async fn dispatch(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    state: &AppState,
) -> HttpResponse {
    if let Some(resp) = check_http_method(method) {
        return resp;
    }

    let served_path = spa::rewrite_path(path, state.index_path());
    if served_path != path {
        logger::log_debug(&format!("SPA fallback: {path} -> {served_path}"));
    }

    let ctx = RequestContext::new(served_path, method, headers);
    static_files::serve(&ctx, state.root(), state.index_file()).await
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_debug(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}
