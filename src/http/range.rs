//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing for partial asset downloads.

/// A resolved byte range with inclusive bounds within the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes covered by the range
    #[cfg(test)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of parsing a `Range` header against a file of known size
#[derive(Debug)]
pub enum RangeOutcome {
    /// Range is valid and resolved against the file size; serve 206
    Satisfiable(ByteRange),
    /// Range lies entirely outside the file; serve 416
    Unsatisfiable,
    /// No header, multi-range, or malformed; serve the full body
    Ignored,
}

/// Parse an HTTP `Range` header (single range, `bytes` unit only).
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Multi-range requests and non-byte units are ignored rather than
/// rejected, which serves the full content.
///
/// # Examples
/// ```
/// use homedock_server::http::range::{parse_range_header, RangeOutcome};
///
/// assert!(matches!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeOutcome::Satisfiable(_)
/// ));
/// assert!(matches!(parse_range_header(None, 1000), RangeOutcome::Ignored));
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(ranges) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Ignored;
    };

    // Single range only
    if ranges.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // Nothing inside an empty file is addressable
    if file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Satisfiable(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        e.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header_is_ignored() {
        assert!(matches!(parse_range_header(None, 100), RangeOutcome::Ignored));
    }

    #[test]
    fn test_fixed_range() {
        match parse_range_header(Some("bytes=0-9"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, 9);
                assert_eq!(r.len(), 10);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn test_open_ended_range() {
        match parse_range_header(Some("bytes=50-"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 50);
                assert_eq!(r.end, 99);
                assert_eq!(r.len(), 50);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn test_suffix_range() {
        match parse_range_header(Some("bytes=-20"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 80);
                assert_eq!(r.end, 99);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn test_oversized_suffix_covers_whole_file() {
        match parse_range_header(Some("bytes=-500"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 0);
                assert_eq!(r.end, 99);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        match parse_range_header(Some("bytes=90-200"), 100) {
            RangeOutcome::Satisfiable(r) => {
                assert_eq!(r.start, 90);
                assert_eq!(r.end, 99);
            }
            _ => panic!("expected Satisfiable"),
        }
    }

    #[test]
    fn test_start_beyond_file_is_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_empty_file_is_unsatisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=0-"), 0),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_malformed_and_multi_range_are_ignored() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Ignored
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeOutcome::Ignored
        ));
    }
}
