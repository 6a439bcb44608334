//! API server lifecycle — starts and stops the axum HTTP server.
//!
//! Pattern: bind → spawn background task → return a handle carrying a
//! shutdown channel. The caller decides when to stop; in-flight
//! requests drain before the task exits.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// The address the server actually bound, with the resolved port.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shut down the server gracefully. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Bind `bind_addr` and serve the API router in a background task.
///
/// Port 0 binds an ephemeral port; read the real one from
/// [`ApiServer::addr`].
pub async fn start_api_server(ctx: ApiContext, bind_addr: &str) -> anyhow::Result<ApiServer> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;

    let addr = listener
        .local_addr()
        .context("failed to read the bound server address")?;

    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}
