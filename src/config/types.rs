// Configuration types module
// Defines the startup configuration consumed by the server core

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tls: TlsConfig,
    pub static_files: StaticConfig,
    pub store: StoreConfig,
    pub wallpaper: WallpaperConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listening endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// TLS configuration.
///
/// TLS is attempted only when explicitly enabled; both PEM files must
/// then exist and parse, otherwise startup fails.
#[derive(Debug, Deserialize, Clone)]
pub struct TlsConfig {
    pub enabled: bool,
    pub cert_file: String,
    pub key_file: String,
}

/// Served-files root for the dashboard assets
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    pub root: String,
}

/// Location of the persisted application-config document
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub data_dir: String,
}

/// Upstream wallpaper provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WallpaperConfig {
    /// Image-archive endpoint, without query parameters
    pub api_base: String,
    /// Origin prefixed to the relative image URLs in the manifest
    pub image_origin: String,
    /// Default market forwarded to the provider
    pub market: String,
    /// Default number of manifest entries requested
    pub count: u32,
    /// Hard bound on the outbound fetch
    pub timeout_secs: u64,
    /// Browser-like identity; the provider rejects bare clients
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection-level tuning
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}
