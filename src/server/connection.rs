// Connection handling module
// Serves a single accepted TCP connection over HTTP/1.1

use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 connection settings (keep-alive, header casing)
/// 3. Serves the connection with the request handler
/// 4. Applies the optional connection timeout
///
/// Malformed requests are answered with 400 by hyper's parser and only end
/// this connection.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let timeout_secs = state.config.performance.connection_timeout;

        let mut builder = http1::Builder::new();
        builder
            .keep_alive(state.config.performance.keep_alive)
            .title_case_headers(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
        );

        let result = if timeout_secs > 0 {
            match tokio::time::timeout(Duration::from_secs(timeout_secs), conn).await {
                Ok(r) => r,
                Err(_) => {
                    logger::log_warning(&format!(
                        "Connection from {peer_addr} timed out after {timeout_secs} seconds"
                    ));
                    return;
                }
            }
        } else {
            conn.await
        };

        match result {
            Ok(()) => {}
            // Clients closing idle keep-alive connections are routine
            Err(err) if err.is_incomplete_message() => {}
            Err(err) if err.is_parse() => {
                logger::log_warning(&format!("Malformed request from {peer_addr}: {err}"));
            }
            Err(err) => logger::log_connection_error(&err),
        }
    });
}
