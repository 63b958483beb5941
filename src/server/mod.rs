//! Server module
//!
//! Listener setup, the accept loop, and per-connection serving for
//! plain HTTP and TLS.

pub mod connection;
pub mod listener;
pub mod tls;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

/// Bind the configured address and serve requests until the process exits.
///
/// Binding failure (or a broken TLS setup when TLS is enabled) propagates
/// to `main`, terminating the process with a non-zero status.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;

    let acceptor = if config.tls.enabled {
        Some(tls::build_acceptor(
            &config.tls.cert_file,
            &config.tls.key_file,
        )?)
    } else {
        None
    };

    let listener = listener::bind_listener(addr)?;
    let state = Arc::new(AppState::new(config)?);

    logger::log_server_start(&addr, acceptor.is_some(), &state.config);

    loop {
        let (stream, _peer_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
                continue;
            }
        };

        if !try_acquire_slot(&state) {
            drop(stream);
            continue;
        }

        let state = Arc::clone(&state);
        match acceptor.clone() {
            Some(acceptor) => {
                tokio::spawn(async move {
                    match acceptor.accept(stream).await {
                        Ok(tls_stream) => connection::serve_connection(tls_stream, state).await,
                        Err(e) => {
                            logger::log_warning(&format!("TLS handshake failed: {e}"));
                            state.active_connections.fetch_sub(1, Ordering::SeqCst);
                        }
                    }
                });
            }
            None => {
                tokio::spawn(async move {
                    connection::serve_connection(stream, state).await;
                });
            }
        }
    }
}

/// Increment the connection counter, enforcing the optional cap.
/// Incrementing before the check avoids a race between two accepts.
fn try_acquire_slot(state: &AppState) -> bool {
    let prev = state.active_connections.fetch_add(1, Ordering::SeqCst);

    if let Some(max) = state.config.performance.max_connections {
        if prev >= usize::try_from(max).unwrap_or(usize::MAX) {
            state.active_connections.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev}/{max}. Connection rejected."
            ));
            return false;
        }
    }

    true
}
