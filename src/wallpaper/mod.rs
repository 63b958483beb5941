//! External wallpaper resolver module
//!
//! Proxies the Bing image-archive lookup: fetch the day's manifest,
//! pick one entry uniformly at random, and hand back an absolute image
//! URL for the redirect. The manifest is never persisted.

use rand::seq::SliceRandom;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::WallpaperConfig;

#[derive(Debug, Error)]
pub enum WallpaperError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("no images in provider response")]
    EmptyManifest,
}

/// Transient manifest returned by the provider. Anything beyond `url`
/// and `title` is ignored; schema drift shows up as an empty manifest
/// or a decode error, never a crash.
#[derive(Debug, Deserialize)]
struct ImageArchive {
    #[serde(default)]
    images: Vec<ArchiveImage>,
}

#[derive(Debug, Deserialize)]
struct ArchiveImage {
    url: String,
    #[serde(default)]
    title: String,
}

/// A chosen wallpaper, resolved to an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWallpaper {
    pub url: String,
    pub title: String,
}

/// Client for the wallpaper provider, shared across requests
pub struct WallpaperClient {
    http: reqwest::Client,
    api_base: String,
    image_origin: String,
    market: String,
    count: u32,
}

impl WallpaperClient {
    /// Build the shared HTTP client with the fetch timeout and the
    /// browser-like identity the provider expects.
    pub fn new(config: &WallpaperConfig) -> Result<Self, WallpaperError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            image_origin: config.image_origin.clone(),
            market: config.market.clone(),
            count: config.count,
        })
    }

    /// Build the provider request URL. `mkt`, `idx` and `n` from the
    /// incoming query string override the configured defaults.
    pub fn request_url(&self, query: Option<&str>) -> String {
        let idx = query_param(query, "idx").unwrap_or("0");
        let market = query_param(query, "mkt").unwrap_or(&self.market);
        let count =
            query_param(query, "n").map_or_else(|| self.count.to_string(), ToString::to_string);

        format!(
            "{}?format=js&idx={idx}&n={count}&mkt={market}",
            self.api_base
        )
    }

    /// Fetch the manifest and choose one image uniformly at random
    pub async fn resolve(&self, query: Option<&str>) -> Result<ResolvedWallpaper, WallpaperError> {
        let url = self.request_url(query);

        let archive: ImageArchive = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let choice = archive
            .images
            .choose(&mut rand::thread_rng())
            .ok_or(WallpaperError::EmptyManifest)?;

        Ok(ResolvedWallpaper {
            url: format!("{}{}", self.image_origin, choice.url),
            title: choice.title.clone(),
        })
    }
}

/// Extract a single non-empty query parameter value
fn query_param<'a>(query: Option<&'a str>, name: &str) -> Option<&'a str> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}
