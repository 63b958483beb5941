// API handlers module
// Config read/write, the wallpaper redirect and the health probe

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response, StatusCode};

use crate::http;
use crate::logger;
use crate::store::ConfigStore;
use crate::wallpaper::WallpaperClient;

/// Identity reported by the health probe
const SERVER_NAME: &str = "HomeDock Dev Server";
const SERVER_VERSION: &str = "1.0.0";

/// GET /api/config — the stored document, or the default when nothing
/// has been saved yet. Load failures surface as a 500 with the cause.
pub async fn read_config(store: &ConfigStore) -> Response<Full<Bytes>> {
    match store.load().await {
        Ok(document) => http::build_json_response(StatusCode::OK, &document),
        Err(e) => http::build_json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Config load failed: {e}"),
        ),
    }
}

/// POST|PUT /api/config — full document replacement
pub async fn write_config(req: Request<Incoming>, store: &ConfigStore) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return http::build_json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Config save failed: {e}"),
            );
        }
    };

    save_config_bytes(store, &body).await
}

/// Parse, validate and persist a replacement document
pub async fn save_config_bytes(store: &ConfigStore, body: &[u8]) -> Response<Full<Bytes>> {
    match store.save_bytes(body).await {
        Ok(()) => {
            logger::log_info(&format!("Config saved to {}", store.path().display()));
            http::build_json_response(StatusCode::OK, &serde_json::json!({"status": "success"}))
        }
        Err(e) => http::build_json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Config save failed: {e}"),
        ),
    }
}

/// GET /bing-wallpaper — 302 to a freshly chosen image
pub async fn wallpaper_redirect(
    query: Option<&str>,
    client: &WallpaperClient,
) -> Response<Full<Bytes>> {
    match client.resolve(query).await {
        Ok(wallpaper) => {
            logger::log_wallpaper_selected(&wallpaper.title);
            http::build_wallpaper_redirect(&wallpaper.url)
        }
        Err(e) => http::build_plain_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch Bing wallpaper: {e}"),
        ),
    }
}

/// GET /health — static liveness document, no side effects
pub fn health() -> Response<Full<Bytes>> {
    http::build_json_response(
        StatusCode::OK,
        &serde_json::json!({
            "status": "ok",
            "server": SERVER_NAME,
            "version": SERVER_VERSION,
        }),
    )
}
