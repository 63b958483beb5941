//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by all handlers: response builders,
//! the common header set, MIME detection, `ETag` handling, Range parsing and
//! the gzip compression filter.

pub mod cache;
pub mod compress;
pub mod headers;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use headers::apply_common_headers;
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_416_response, build_json_error,
    build_json_response, build_plain_response, build_preflight_response, build_wallpaper_redirect,
};
