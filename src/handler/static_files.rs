//! Static file serving module
//!
//! Resolves request paths under the server root, evaluates conditional and
//! range headers, and builds the file response.

use crate::handler::router::RequestContext;
use crate::http::conditional::Validators;
use crate::http::range::{self, RangeOutcome};
use crate::http::{self as proto, mime, response, HttpResponse};
use crate::logger;
use hyper::body::Bytes;
use percent_encoding::percent_decode_str;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Why a request path could not be mapped to a file
#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// Undecodable or otherwise malformed path (400)
    BadRequest,
    /// Path escapes the server root (403)
    Forbidden,
    /// Nothing servable at the path (404)
    NotFound,
}

/// A file inside the server root, ready to be read
#[derive(Debug)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub metadata: std::fs::Metadata,
}

/// Serve the file addressed by `ctx.path` (already rewritten) from `root`
pub async fn serve(ctx: &RequestContext<'_>, root: &Path, index_file: &str) -> HttpResponse {
    let file = match resolve(root, ctx.path, index_file).await {
        Ok(f) => f,
        Err(ResolveError::BadRequest) => return proto::build_400_response(ctx.is_head),
        Err(ResolveError::Forbidden) => return proto::build_403_response(ctx.is_head),
        Err(ResolveError::NotFound) => return proto::build_404_response(ctx.is_head),
    };

    match build_file_response(ctx, &file).await {
        Ok(resp) => resp,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file.path.display()
            ));
            proto::build_404_response(ctx.is_head)
        }
    }
}

/// Map a request path to a file beneath `root`
///
/// `root` must be canonical. The path is percent-decoded and normalised;
/// `..` may not climb above the root and the canonical target (after
/// following symlinks) must still lie inside it.
pub async fn resolve(
    root: &Path,
    request_path: &str,
    index_file: &str,
) -> Result<ResolvedFile, ResolveError> {
    let segments = normalize_segments(request_path)?;

    let mut candidate = root.to_path_buf();
    candidate.extend(&segments);

    let mut path = canonicalize_within(root, &candidate, request_path).await?;
    let mut metadata = fs::metadata(&path).await.map_err(|_| ResolveError::NotFound)?;

    // No listing: a directory is only servable through its index file
    if metadata.is_dir() {
        path = canonicalize_within(root, &path.join(index_file), request_path).await?;
        metadata = fs::metadata(&path).await.map_err(|_| ResolveError::NotFound)?;
    }

    if !metadata.is_file() {
        return Err(ResolveError::NotFound);
    }

    Ok(ResolvedFile { path, metadata })
}

/// Decode a URL path into plain path segments
pub fn normalize_segments(request_path: &str) -> Result<Vec<String>, ResolveError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ResolveError::BadRequest)?;

    let mut segments: Vec<String> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(ResolveError::Forbidden);
                }
            }
            s if s.contains('\0') || s.contains('\\') => return Err(ResolveError::BadRequest),
            s => segments.push(s.to_string()),
        }
    }
    Ok(segments)
}

async fn canonicalize_within(
    root: &Path,
    candidate: &Path,
    request_path: &str,
) -> Result<PathBuf, ResolveError> {
    let canonical = match fs::canonicalize(candidate).await {
        Ok(p) => p,
        // File not found is common (404), no need to log
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(ResolveError::NotFound),
        Err(e) => {
            logger::log_debug(&format!(
                "Cannot resolve '{}': {e}",
                candidate.display()
            ));
            return Err(ResolveError::NotFound);
        }
    };

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return Err(ResolveError::Forbidden);
    }

    Ok(canonical)
}

async fn build_file_response(
    ctx: &RequestContext<'_>,
    file: &ResolvedFile,
) -> std::io::Result<HttpResponse> {
    let validators = Validators::from_metadata(&file.metadata);
    if validators.is_not_modified(ctx.if_none_match.as_deref(), ctx.if_modified_since.as_deref()) {
        return Ok(response::build_304_response(&validators));
    }

    let content_type = mime::content_type_for(&file.path);
    let total_size = file.metadata.len();

    match range::evaluate(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Unsatisfiable => Ok(response::build_416_response(total_size)),
        RangeOutcome::Partial(span) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                read_span(&file.path, span.start, span.length()).await?
            };
            Ok(response::build_partial_response(
                body,
                &content_type,
                &validators,
                span,
                total_size,
            ))
        }
        RangeOutcome::Full => {
            let (body, content_length) = if ctx.is_head {
                (Bytes::new(), total_size)
            } else {
                // The file may have changed since it was stat'ed
                let bytes = Bytes::from(fs::read(&file.path).await?);
                let len = bytes.len() as u64;
                (bytes, len)
            };
            Ok(response::build_file_response(
                body,
                content_length,
                &content_type,
                &validators,
            ))
        }
    }
}

async fn read_span(path: &Path, start: u64, len: u64) -> std::io::Result<Bytes> {
    let mut file = fs::File::open(path).await?;
    file.seek(SeekFrom::Start(start)).await?;

    let len = usize::try_from(len).map_err(|e| std::io::Error::new(ErrorKind::InvalidInput, e))?;
    let mut buf = vec![0; len];
    file.read_exact(&mut buf).await?;
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &str) -> Result<Vec<String>, ResolveError> {
        normalize_segments(path)
    }

    #[test]
    fn test_normalize_plain_paths() {
        assert_eq!(segments("/index.html").unwrap(), vec!["index.html"]);
        assert_eq!(segments("/img//logo.png").unwrap(), vec!["img", "logo.png"]);
        assert_eq!(segments("/./a/./b.js").unwrap(), vec!["a", "b.js"]);
        assert!(segments("/").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_decodes_percent_escapes() {
        assert_eq!(segments("/my%20file.txt").unwrap(), vec!["my file.txt"]);
        assert_eq!(segments("/a/%2e%2e/b.js").unwrap(), vec!["b.js"]);
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert_eq!(segments("/../../etc/passwd"), Err(ResolveError::Forbidden));
        assert_eq!(segments("/a/../../secret"), Err(ResolveError::Forbidden));
        assert_eq!(segments("/%2e%2e/secret.txt"), Err(ResolveError::Forbidden));
        assert_eq!(segments("/%2E%2E%2Fsecret.txt"), Err(ResolveError::Forbidden));
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert_eq!(segments("/%ff%fe.js"), Err(ResolveError::BadRequest));
        assert_eq!(segments("/a%00.js"), Err(ResolveError::BadRequest));
        assert_eq!(segments("/..%5c..%5cwin.ini"), Err(ResolveError::BadRequest));
    }

    async fn fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist");
        std::fs::create_dir_all(root.join("assets")).unwrap();
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();
        std::fs::write(root.join("assets/app.js"), "console.log(1)").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
        let root = root.canonicalize().unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_resolve_existing_file() {
        let (_dir, root) = fixture().await;
        let file = resolve(&root, "/assets/app.js", "index.html").await.unwrap();
        assert_eq!(file.path, root.join("assets/app.js"));
        assert_eq!(file.metadata.len(), 14);
    }

    #[tokio::test]
    async fn test_resolve_directory_uses_index() {
        let (_dir, root) = fixture().await;
        let file = resolve(&root, "/", "index.html").await.unwrap();
        assert_eq!(file.path, root.join("index.html"));

        // assets/ has no index file
        assert_eq!(
            resolve(&root, "/assets", "index.html").await.unwrap_err(),
            ResolveError::NotFound
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let (_dir, root) = fixture().await;
        assert_eq!(
            resolve(&root, "/missing.png", "index.html").await.unwrap_err(),
            ResolveError::NotFound
        );
    }

    #[tokio::test]
    async fn test_resolve_blocks_traversal() {
        let (_dir, root) = fixture().await;
        assert_eq!(
            resolve(&root, "/../secret.txt", "index.html").await.unwrap_err(),
            ResolveError::Forbidden
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_blocks_symlink_escape() {
        let (dir, root) = fixture().await;
        std::os::unix::fs::symlink(dir.path().join("secret.txt"), root.join("leak.txt")).unwrap();
        assert_eq!(
            resolve(&root, "/leak.txt", "index.html").await.unwrap_err(),
            ResolveError::Forbidden
        );
    }

    #[tokio::test]
    async fn test_read_span() {
        let (_dir, root) = fixture().await;
        let bytes = read_span(&root.join("assets/app.js"), 8, 3).await.unwrap();
        assert_eq!(bytes, "log");
    }
}
