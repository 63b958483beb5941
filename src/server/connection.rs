// Connection handling module
// Serves one accepted stream with hyper's HTTP/1 stack

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection, then release its counter slot.
///
/// Generic over the stream type so plain TCP and TLS connections share
/// one path. The caller has already incremented `active_connections`.
pub async fn serve_connection<I>(stream: I, state: Arc<AppState>)
where
    I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let io = TokioIo::new(stream);

    let keep_alive = state.config.performance.keep_alive_timeout > 0;
    let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    ));

    let mut builder = http1::Builder::new();
    if keep_alive {
        builder.keep_alive(true);
    }

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let state = Arc::clone(&service_state);
            async move { handler::handle_request(req, state).await }
        }),
    );

    match tokio::time::timeout(timeout_duration, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection timeout after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    }

    state.active_connections.fetch_sub(1, Ordering::SeqCst);
}
