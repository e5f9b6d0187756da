//! MIME type detection module
//!
//! Returns the Content-Type for a served file. A small override table wins
//! over the standard extension database so that browsers accept scripts and
//! stylesheets loaded as modules.

use std::borrow::Cow;
use std::path::Path;

/// Extensions whose content type is fixed regardless of the system database
const OVERRIDES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("css", "text/css"),
];

/// Get MIME Content-Type for a file path
///
/// # Examples
/// ```
/// use std::path::Path;
/// use spa_preview_server::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("main.js")), "application/javascript");
/// assert_eq!(content_type_for(Path::new("logo.png")), "image/png");
/// assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> Cow<'static, str> {
    if let Some(ct) = override_for(path) {
        return Cow::Borrowed(ct);
    }
    Cow::Owned(
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    )
}

fn override_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    OVERRIDES
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, ct)| *ct)
}
