//! Web relay for SocioAI
//!
//! Serves the chat page, relays messages to a [`FlowClient`] and returns the
//! reply together with any table and chart series found in it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod logs;
pub mod page;
pub mod routes;

pub use config::WebUiConfig;
pub use error::ApiError;
pub use routes::{build_router, AppState, HealthResponse};

use axum::Router;
use socio_core::{ChartConfig, FlowClient, Result, SocioError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Relay HTTP server
pub struct WebUiServer {
    config: WebUiConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: Option<SocketAddr>,
}

impl WebUiServer {
    /// Create a server relaying to `flow`
    pub fn new(config: WebUiConfig, flow: Arc<dyn FlowClient>, chart_config: ChartConfig) -> Self {
        Self {
            config,
            state: AppState::new(flow, chart_config),
            shutdown_tx: None,
            local_addr: None,
        }
    }

    /// Router for this server
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Address the server is bound to, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Whether the server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    async fn bind(&self) -> Result<tokio::net::TcpListener> {
        let addr = self.config.bind_addr();
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| SocioError::config(format!("Failed to bind to {}: {}", addr, e)))
    }

    /// Bind and serve in the background until [`stop`](Self::stop)
    pub async fn start(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.local_addr.filter(|_| self.is_running()) {
            return Ok(addr);
        }

        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        let router = self.router();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                error!("Server error: {}", e);
            }
        });

        info!("SocioAI relay listening on http://{}", addr);
        self.shutdown_tx = Some(tx);
        self.local_addr = Some(addr);
        Ok(addr)
    }

    /// Signal a background server to shut down
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("SocioAI relay stopped");
        }
        Ok(())
    }

    /// Serve in the foreground until Ctrl+C
    pub async fn run_until_ctrl_c(self) -> Result<()> {
        let listener = self.bind().await?;
        info!("SocioAI relay listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
            })
            .await?;
        Ok(())
    }
}
