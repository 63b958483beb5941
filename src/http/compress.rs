//! Gzip compression filter module
//!
//! Decides whether a static response body should be gzip-encoded and
//! produces the encoded bytes.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Extensions whose content compresses well enough to bother
pub const COMPRESSIBLE_EXTENSIONS: &[&str] = &["html", "css", "js", "json", "svg", "xml", "txt"];

/// Check whether the client's `Accept-Encoding` header allows gzip
pub fn client_accepts_gzip(accept_encoding: Option<&str>) -> bool {
    accept_encoding.is_some_and(|value| {
        value.split(',').any(|entry| {
            // Strip any quality parameter: "gzip;q=0.8" -> "gzip"
            entry
                .split(';')
                .next()
                .map(str::trim)
                .is_some_and(|token| token.eq_ignore_ascii_case("gzip"))
        })
    })
}

/// Decide whether an asset should be served gzip-encoded
pub fn should_compress(extension: Option<&str>, accept_encoding: Option<&str>) -> bool {
    let compressible = extension.is_some_and(|ext| {
        COMPRESSIBLE_EXTENSIONS
            .iter()
            .any(|c| ext.eq_ignore_ascii_case(c))
    });
    compressible && client_accepts_gzip(accept_encoding)
}

/// Gzip-encode the full asset body
pub fn gzip_encode(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(data.len() / 2),
        Compression::default(),
    );
    encoder.write_all(data)?;
    encoder.finish()
}

/// Percentage saved by compression, for the access log
#[allow(clippy::cast_precision_loss)]
pub fn savings_percent(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_accept_encoding_parsing() {
        assert!(client_accepts_gzip(Some("gzip")));
        assert!(client_accepts_gzip(Some("gzip, deflate, br")));
        assert!(client_accepts_gzip(Some("deflate, gzip;q=0.8")));
        assert!(client_accepts_gzip(Some("GZIP")));
        assert!(!client_accepts_gzip(Some("deflate, br")));
        assert!(!client_accepts_gzip(Some("identity")));
        assert!(!client_accepts_gzip(None));
    }

    #[test]
    fn test_should_compress_gating() {
        assert!(should_compress(Some("html"), Some("gzip")));
        assert!(should_compress(Some("json"), Some("gzip, br")));
        assert!(!should_compress(Some("png"), Some("gzip")));
        assert!(!should_compress(Some("html"), Some("br")));
        assert!(!should_compress(None, Some("gzip")));
    }

    #[test]
    fn test_gzip_round_trip() {
        let original = b"<html><body>HomeDock dashboard</body></html>".repeat(16);
        let compressed = gzip_encode(&original).expect("encode");
        assert!(compressed.len() < original.len());

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_savings_percent() {
        assert!((savings_percent(1000, 250) - 75.0).abs() < f64::EPSILON);
        assert!((savings_percent(0, 0) - 0.0).abs() < f64::EPSILON);
    }
}
