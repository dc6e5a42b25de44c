//! Accept loop.
//!
//! Every accepted connection is handed to its own detached Tokio task, and
//! the loop goes straight back to `accept()`. Tasks share nothing but the
//! read-only [`Config`].

pub mod listener;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::Connection;
use listener::Listener;

/// Pause after a failed accept, so descriptor exhaustion does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server {
    config: Arc<Config>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serves forever.
    pub async fn run(&self, listener: Listener) {
        self.run_until(listener, std::future::pending::<()>()).await
    }

    /// Serves until `shutdown` completes. Connections already dispatched keep
    /// running in their own tasks.
    pub async fn run_until<F>(&self, listener: Listener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }

                accepted = listener.accept() => match accepted {
                    Ok((socket, peer)) => self.dispatch(socket, peer),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }
    }

    fn dispatch(&self, socket: TcpStream, peer: SocketAddr) {
        info!(%peer, "Accepted connection");

        let config = Arc::clone(&self.config);
        let span = tracing::info_span!("connection", %peer);

        tokio::spawn(
            async move {
                let conn = Connection::new(socket, config);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
