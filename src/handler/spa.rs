//! Single-page-application fallback
//!
//! Client-side routes such as `/settings` or `/app/profile` have no file
//! behind them, so they are answered with the entry document and the
//! application's router interprets the URL after load.

/// Map a request path to the path that should be served
///
/// A path whose final segment contains no `.` is rewritten to `index_path`.
/// This includes `/` and any path ending in `/`, whose final segment is
/// empty. Every other path is returned unchanged; whether the file exists is
/// decided later.
///
/// # Examples
/// ```
/// use spa_preview_server::handler::spa::rewrite_path;
/// assert_eq!(rewrite_path("/dashboard", "/index.html"), "/index.html");
/// assert_eq!(rewrite_path("/bundle.js", "/index.html"), "/bundle.js");
/// ```
pub fn rewrite_path<'a>(path: &'a str, index_path: &'a str) -> &'a str {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    if last_segment.contains('.') {
        path
    } else {
        index_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "/index.html";

    #[test]
    fn test_extensionless_paths_fall_back() {
        for path in ["/", "/dashboard", "/a/b/c", "/settings/", "/v1.2/profile", ""] {
            assert_eq!(rewrite_path(path, INDEX), INDEX, "path {path:?}");
        }
    }

    #[test]
    fn test_paths_with_extension_unchanged() {
        for path in [
            "/app.js",
            "/styles.css",
            "/img/logo.png",
            "/favicon.ico",
            "/missing.png",
            "/index.html",
            "/.well-known",
        ] {
            assert_eq!(rewrite_path(path, INDEX), path);
        }
    }

    #[test]
    fn test_custom_entry_document() {
        assert_eq!(rewrite_path("/profile", "/app.html"), "/app.html");
    }
}
