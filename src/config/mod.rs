// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, LoggingConfig, PerformanceConfig, ServerConfig, StaticConfig, StoreConfig, TlsConfig,
    WallpaperConfig,
};

impl Config {
    /// Load configuration from the default `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension),
    /// layered under `HOMEDOCK`-prefixed environment overrides and the
    /// built-in defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("HOMEDOCK").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("tls.enabled", false)?
            .set_default("tls.cert_file", "localhost.pem")?
            .set_default("tls.key_file", "localhost-key.pem")?
            .set_default("static_files.root", ".")?
            .set_default("store.data_dir", ".")?
            .set_default(
                "wallpaper.api_base",
                "https://www.bing.com/HPImageArchive.aspx",
            )?
            .set_default("wallpaper.image_origin", "https://www.bing.com")?
            .set_default("wallpaper.market", "zh-CN")?
            .set_default("wallpaper.count", 8)?
            .set_default("wallpaper.timeout_secs", 10)?
            .set_default(
                "wallpaper.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            )?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("does-not-exist").expect("defaults should load");
        assert_eq!(cfg.server.port, 8000);
        assert!(!cfg.tls.enabled);
        assert_eq!(cfg.store.data_dir, ".");
        assert_eq!(cfg.static_files.root, ".");
        assert_eq!(cfg.wallpaper.timeout_secs, 10);
        assert_eq!(cfg.wallpaper.market, "zh-CN");
        assert!(cfg.wallpaper.api_base.starts_with("https://www.bing.com"));
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist").expect("defaults should load");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }
}
