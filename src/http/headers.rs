//! Common response header module
//!
//! Every response leaves the router with the same CORS and security header
//! set, plus a path-dependent cache policy.

use hyper::header::{HeaderValue, CACHE_CONTROL};
use hyper::Response;

/// Cache policy for `/api/` paths
const API_CACHE_POLICY: &str = "no-cache, no-store, must-revalidate";

/// Cache policy for everything else
const DEFAULT_CACHE_POLICY: &str = "max-age=3600";

/// Apply the CORS, security and cache headers shared by all handlers.
///
/// A `Cache-Control` header already set by the handler (the wallpaper
/// redirect's cache-busting trio) is left untouched; otherwise the
/// path-based policy is filled in.
pub fn apply_common_headers<B>(response: &mut Response<B>, path: &str) {
    let headers = response.headers_mut();

    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert("Access-Control-Max-Age", HeaderValue::from_static("86400"));

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("X-XSS-Protection", HeaderValue::from_static("1; mode=block"));

    if !headers.contains_key(CACHE_CONTROL) {
        let policy = if path.starts_with("/api/") {
            API_CACHE_POLICY
        } else {
            DEFAULT_CACHE_POLICY
        };
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(policy));
    }
}
