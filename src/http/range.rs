//! HTTP Range request parsing module
//!
//! Single `bytes=` ranges only (RFC 7233). Multi-range requests are answered
//! with the full representation.

/// Inclusive byte span within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub const fn length(self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for a file of `total` bytes
    pub fn content_range(self, total: u64) -> String {
        format!("bytes {}-{}/{total}", self.start, self.end)
    }
}

/// Outcome of evaluating a `Range` header against a file size
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve the full file with 200
    Full,
    /// Serve the span with 206
    Partial(ByteRange),
    /// Answer 416 with `Content-Range: bytes */<len>`
    Unsatisfiable,
}

/// Evaluate a `Range` header
///
/// # Examples
/// ```
/// use spa_preview_server::http::range::{evaluate, ByteRange, RangeOutcome};
///
/// assert_eq!(
///     evaluate(Some("bytes=0-99"), 1000),
///     RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(evaluate(None, 1000), RangeOutcome::Full);
/// ```
pub fn evaluate(range_header: Option<&str>, file_size: u64) -> RangeOutcome {
    let Some(ranges) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if ranges.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((first, last)) = ranges.split_once('-') else {
        return RangeOutcome::Full;
    };

    match (first.trim(), last.trim()) {
        ("", suffix) => suffix_range(suffix, file_size),
        (start, end) => bounded_range(start, end, file_size),
    }
}

/// `bytes=-500`: the last 500 bytes
fn suffix_range(suffix: &str, file_size: u64) -> RangeOutcome {
    let Ok(n) = suffix.parse::<u64>() else {
        return RangeOutcome::Full;
    };
    if n == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(n),
        end: file_size - 1,
    })
}

/// `bytes=0-99` or `bytes=100-`
fn bounded_range(start: &str, end: &str, file_size: u64) -> RangeOutcome {
    let Ok(start) = start.parse::<u64>() else {
        return RangeOutcome::Full;
    };
    let end = if end.is_empty() {
        None
    } else {
        match end.parse::<u64>() {
            Ok(e) => Some(e),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if let Some(e) = end {
        if start > e {
            return RangeOutcome::Full;
        }
    }
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let last = file_size - 1;
    RangeOutcome::Partial(ByteRange {
        start,
        end: end.map_or(last, |e| e.min(last)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(start: u64, end: u64) -> RangeOutcome {
        RangeOutcome::Partial(ByteRange { start, end })
    }

    #[test]
    fn test_no_range() {
        assert_eq!(evaluate(None, 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("items=0-9"), 100), RangeOutcome::Full);
    }

    #[test]
    fn test_bounded_and_open_ranges() {
        assert_eq!(evaluate(Some("bytes=0-9"), 100), partial(0, 9));
        assert_eq!(evaluate(Some("bytes=50-"), 100), partial(50, 99));
        assert_eq!(evaluate(Some("bytes=90-500"), 100), partial(90, 99));
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(evaluate(Some("bytes=-20"), 100), partial(80, 99));
        assert_eq!(evaluate(Some("bytes=-500"), 100), partial(0, 99));
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(evaluate(Some("bytes=200-"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate(Some("bytes=-0"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate(Some("bytes=0-"), 0), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn test_malformed_falls_back_to_full() {
        assert_eq!(evaluate(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("bytes=0-9,20-29"), 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("bytes=9-0"), 100), RangeOutcome::Full);
        assert_eq!(evaluate(Some("bytes=5"), 100), RangeOutcome::Full);
    }

    #[test]
    fn test_content_range() {
        let r = ByteRange { start: 0, end: 3 };
        assert_eq!(r.length(), 4);
        assert_eq!(r.content_range(10), "bytes 0-3/10");
    }
}
