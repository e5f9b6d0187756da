// Server module entry point
// Binds the listener and runs the accept loop

pub mod connection;
pub mod listener;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::error::{Result, ServerError};
use crate::logger;

pub use listener::create_listener;

/// A bound, not yet running, static asset server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured address
    ///
    /// Must be called from within a Tokio runtime. Use port 0 to let the OS
    /// pick a free port.
    pub fn bind(state: AppState) -> Result<Self> {
        let addr = state.config.get_socket_addr()?;
        let bind_err = |source| ServerError::Bind { addr, source };
        let listener = create_listener(addr).map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        Ok(Self {
            listener,
            local_addr,
            state: Arc::new(state),
        })
    }

    /// Address actually bound, with the OS-assigned port resolved
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Accept connections until the task is dropped or the process ends
    ///
    /// Each connection is served in its own task; accept errors are logged
    /// and do not stop the loop.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    connection::handle_connection(stream, peer_addr, Arc::clone(&self.state));
                }
                Err(e) => {
                    logger::log_error(&format!("Failed to accept connection: {e}"));
                }
            }
        }
    }
}
