//! HTTP cache validator module
//!
//! Derives `ETag` and `Last-Modified` from file metadata and evaluates
//! conditional requests (RFC 7232).

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache validators of one served file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Quoted strong `ETag`, e.g. `"1f4-65e1c2a0"`
    pub etag: String,
    /// Modification time truncated to whole seconds
    pub last_modified: Option<DateTime<Utc>>,
}

impl Validators {
    /// Build validators from file size and modification time
    ///
    /// The `ETag` combines both, so it changes whenever the file is rebuilt
    /// without hashing its contents on every request.
    pub fn new(len: u64, modified: Option<SystemTime>) -> Self {
        let last_modified = modified
            .map(DateTime::<Utc>::from)
            .and_then(|t| DateTime::from_timestamp(t.timestamp(), 0));
        let mtime = last_modified.map_or(0, |t| t.timestamp());
        Self {
            etag: format!("\"{len:x}-{mtime:x}\""),
            last_modified,
        }
    }

    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        Self::new(meta.len(), meta.modified().ok())
    }

    /// `Last-Modified` header value in IMF-fixdate form
    pub fn last_modified_header(&self) -> Option<String> {
        self.last_modified.map(format_http_date)
    }

    /// Whether a GET/HEAD should be answered with 304 Not Modified
    ///
    /// `If-None-Match` takes precedence; `If-Modified-Since` is only
    /// consulted when it is absent.
    pub fn is_not_modified(
        &self,
        if_none_match: Option<&str>,
        if_modified_since: Option<&str>,
    ) -> bool {
        if let Some(inm) = if_none_match {
            return etag_matches(inm, &self.etag);
        }

        match (if_modified_since.and_then(parse_http_date), self.last_modified) {
            (Some(since), Some(modified)) => modified <= since,
            _ => false,
        }
    }
}

/// Weak comparison against a client `If-None-Match` list
///
/// Supports a single `ETag`, comma separated lists, `W/` prefixes and `*`.
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let ours = strip_weak(etag);
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || strip_weak(candidate) == ours
    })
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an IMF-fixdate (RFC 2822 syntax) HTTP date
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
