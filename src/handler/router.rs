//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. An explicit ordered routing
//! table maps method + path pattern to exactly one handler; static
//! serving is the final catch-all entry rather than a hidden default.
//! Every response then passes through the common header layer and is
//! logged by outcome severity.

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderMap, CONTENT_LENGTH};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::{Arc, OnceLock};

use crate::config::AppState;
use crate::handler::api;
use crate::handler::static_files::{self, AssetRequest};
use crate::http;
use crate::logger::{self, RequestLogRecord};

/// Handler selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    ConfigRead,
    ConfigWrite,
    WallpaperRedirect,
    Health,
    Preflight,
    StaticAsset,
    NotFound,
}

/// Path pattern in the routing table
enum PathPattern {
    Exact(&'static str),
    Prefix(&'static str),
    Any,
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(p) => path == *p,
            Self::Prefix(p) => path.starts_with(p),
            Self::Any => true,
        }
    }
}

/// One routing table entry
struct RouteSpec {
    methods: Vec<Method>,
    pattern: PathPattern,
    kind: RouteKind,
}

/// The routing table, evaluated top to bottom once per request
fn routes() -> &'static [RouteSpec] {
    static ROUTES: OnceLock<Vec<RouteSpec>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        vec![
            RouteSpec {
                methods: vec![Method::OPTIONS],
                pattern: PathPattern::Any,
                kind: RouteKind::Preflight,
            },
            RouteSpec {
                methods: vec![Method::GET],
                pattern: PathPattern::Prefix("/api/config"),
                kind: RouteKind::ConfigRead,
            },
            RouteSpec {
                methods: vec![Method::POST, Method::PUT],
                pattern: PathPattern::Prefix("/api/config"),
                kind: RouteKind::ConfigWrite,
            },
            RouteSpec {
                methods: vec![Method::GET],
                pattern: PathPattern::Prefix("/bing-wallpaper"),
                kind: RouteKind::WallpaperRedirect,
            },
            RouteSpec {
                methods: vec![Method::GET],
                pattern: PathPattern::Exact("/health"),
                kind: RouteKind::Health,
            },
            // Catch-all: everything else a browser GETs is a dashboard asset
            RouteSpec {
                methods: vec![Method::GET, Method::HEAD],
                pattern: PathPattern::Any,
                kind: RouteKind::StaticAsset,
            },
        ]
    })
}

/// Select the handler for a request; unmatched method/path pairs get 404
pub fn resolve_route(method: &Method, path: &str) -> RouteKind {
    routes()
        .iter()
        .find(|route| route.methods.contains(method) && route.pattern.matches(path))
        .map_or(RouteKind::NotFound, |route| route.kind)
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let accept_encoding = header_string(req.headers(), "accept-encoding");
    let if_none_match = header_string(req.headers(), "if-none-match");
    let range = header_string(req.headers(), "range");

    let mut response = match resolve_route(&method, &path) {
        RouteKind::Preflight => http::build_preflight_response(),
        RouteKind::ConfigRead => api::read_config(&state.store).await,
        RouteKind::ConfigWrite => api::write_config(req, &state.store).await,
        RouteKind::WallpaperRedirect => {
            api::wallpaper_redirect(query.as_deref(), &state.wallpaper).await
        }
        RouteKind::Health => api::health(),
        RouteKind::StaticAsset => {
            let asset = AssetRequest {
                path: path.clone(),
                is_head: method == Method::HEAD,
                accept_encoding,
                if_none_match,
                range,
            };
            static_files::serve(&state.config.static_files.root, &asset).await
        }
        RouteKind::NotFound => http::build_404_response(),
    };

    http::apply_common_headers(&mut response, &path);

    if state.cached_access_log.load(Ordering::Relaxed) {
        let extra = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .map_or_else(|| "-".to_string(), |len| format!("{len} bytes"));
        logger::log_request(&RequestLogRecord::new(
            method.to_string(),
            path,
            response.status().as_u16(),
            extra,
        ));
    }

    Ok(response)
}

/// Extract a header value as an owned string, ignoring non-UTF-8 values
fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
