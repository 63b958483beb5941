//! HTTP response building module
//!
//! Builders for every response shape the handlers produce, decoupled from
//! the business logic that chooses them.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Build the CORS preflight response: 200 with an empty body.
///
/// The common header layer adds the Access-Control headers afterwards.
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON response from any serializable value.
///
/// The document is pretty-printed with 2-space indentation; `serde_json`
/// leaves non-ASCII characters unescaped.
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build a JSON error body: `{"error": "<message>"}`
pub fn build_json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("JSON error", &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build a plain-text response with the given status
pub fn build_plain_response(status: StatusCode, text: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error("plain", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the wallpaper redirect: 302 with cache-busting headers so the
/// browser re-resolves a fresh image on every visit.
pub fn build_wallpaper_redirect(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(302)
        .header("Location", location)
        .header(
            "Cache-Control",
            "no-store, no-cache, must-revalidate, max-age=0",
        )
        .header("Pragma", "no-cache")
        .header("Expires", "0")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("302", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a full static asset response with `ETag` and range support advertised
pub fn build_asset_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a gzip-encoded static asset response
pub fn build_gzip_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Encoding", "gzip")
        .header("Content-Length", content_length)
        .header("Vary", "Accept-Encoding")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200 gzip", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_is_200_with_empty_body() {
        let response = build_preflight_response();
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn test_wallpaper_redirect_headers() {
        let response = build_wallpaper_redirect("https://www.bing.com/th?id=abc");
        assert_eq!(response.status(), 302);
        assert_eq!(
            response.headers()["Location"],
            "https://www.bing.com/th?id=abc"
        );
        assert_eq!(
            response.headers()["Cache-Control"],
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(response.headers()["Pragma"], "no-cache");
        assert_eq!(response.headers()["Expires"], "0");
    }

    #[test]
    fn test_json_error_is_json_typed() {
        let response =
            build_json_error(StatusCode::INTERNAL_SERVER_ERROR, "Config load failed: boom");
        assert_eq!(response.status(), 500);
        assert_eq!(response.headers()["Content-Type"], "application/json");
    }

    #[test]
    fn test_head_suppresses_asset_body_but_keeps_length() {
        let response = build_asset_response(Bytes::from("hello"), "text/plain", "\"e1\"", true);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "5");
    }

    #[test]
    fn test_gzip_response_announces_encoding() {
        let response =
            build_gzip_response(Bytes::from("x"), "text/html; charset=utf-8", "\"e2\"", false);
        assert_eq!(response.headers()["Content-Encoding"], "gzip");
        assert_eq!(response.headers()["Vary"], "Accept-Encoding");
    }
}
