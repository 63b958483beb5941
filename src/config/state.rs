// Application state module
// Immutable per-process context handed to every request handler

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize};

use super::types::Config;
use crate::store::ConfigStore;
use crate::wallpaper::{WallpaperClient, WallpaperError};

/// Application state shared across connections.
///
/// Nothing here is mutated after construction except the connection
/// counter; the config store's file is the only cross-request state.
pub struct AppState {
    pub config: Config,
    pub store: ConfigStore,
    pub wallpaper: WallpaperClient,

    // Cached config value for lock-free access on the request path
    pub cached_access_log: AtomicBool,

    // Active connection count, for the optional max_connections cap
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Build the shared state from loaded configuration
    pub fn new(config: Config) -> Result<Self, WallpaperError> {
        let store = ConfigStore::new(Path::new(&config.store.data_dir));
        let wallpaper = WallpaperClient::new(&config.wallpaper)?;

        Ok(Self {
            cached_access_log: AtomicBool::new(config.logging.access_log),
            active_connections: AtomicUsize::new(0),
            config,
            store,
            wallpaper,
        })
    }
}
