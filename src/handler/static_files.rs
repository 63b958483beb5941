//! Static asset delivery module
//!
//! Serves the dashboard files: path resolution with traversal
//! protection, `index.html` for directories, MIME detection, ETag/304,
//! single-range 206, and the gzip compression filter for text assets.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::http::{self, cache, compress, mime, range::RangeOutcome, response};
use crate::logger;

/// Request headers that shape an asset response
#[derive(Debug, Default)]
pub struct AssetRequest {
    pub path: String,
    pub is_head: bool,
    pub accept_encoding: Option<String>,
    pub if_none_match: Option<String>,
    pub range: Option<String>,
}

/// Serve a static asset from the served-files root
pub async fn serve(root: &str, request: &AssetRequest) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_path(root, &request.path) else {
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(_) => return http::build_404_response(),
    };

    let extension = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let content_type = mime::content_type_for(extension.as_deref());
    let etag = cache::entity_tag(&content);

    if cache::matches_if_none_match(request.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    // Ranges are always served from the raw bytes
    match http::parse_range_header(request.range.as_deref(), content.len()) {
        RangeOutcome::Satisfiable(r) => {
            let body = Bytes::from(content[r.start..=r.end].to_vec());
            return response::build_partial_response(
                body,
                content_type,
                &etag,
                r.start,
                r.end,
                content.len(),
                request.is_head,
            );
        }
        RangeOutcome::Unsatisfiable => return http::build_416_response(content.len()),
        RangeOutcome::Ignored => {}
    }

    if compress::should_compress(extension.as_deref(), request.accept_encoding.as_deref()) {
        match compress::gzip_encode(&content) {
            Ok(compressed) => {
                logger::log_compression(
                    &request.path,
                    content.len(),
                    compressed.len(),
                    compress::savings_percent(content.len(), compressed.len()),
                );
                return response::build_gzip_response(
                    Bytes::from(compressed),
                    content_type,
                    &etag,
                    request.is_head,
                );
            }
            Err(e) => {
                // Serve uncompressed rather than failing the request
                logger::log_error(&format!("Failed to gzip '{}': {e}", request.path));
            }
        }
    }

    response::build_asset_response(Bytes::from(content), content_type, &etag, request.is_head)
}

/// Resolve a request path against the root, rejecting anything that
/// escapes it. Directory paths resolve to their `index.html`.
fn resolve_path(root: &str, request_path: &str) -> Option<PathBuf> {
    let clean = request_path.trim_start_matches('/').replace("..", "");
    let mut file_path = Path::new(root).join(&clean);

    let root_canonical = Path::new(root).canonicalize().ok()?;

    if file_path.is_dir() || clean.is_empty() || clean.ends_with('/') {
        file_path = file_path.join("index.html");
    }

    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    Some(canonical)
}
