//! HomeDock server library
//!
//! A local HTTP(S) server for the HomeDock dashboard: serves the static
//! single-page app, stores its JSON configuration document, proxies the
//! Bing daily-wallpaper lookup, and answers health probes.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
pub mod wallpaper;
