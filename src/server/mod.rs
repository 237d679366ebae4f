//! Backend HTTP service.
//!
//! Routes:
//! - `GET /api/hello` → `{"message": <greeting>}`
//! - `POST /api/base64/encode` with `{"text": string}` → `{"base64": string}`
//! - `GET /health` → `{"status": "healthy", ...}`

pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServerConfig};
use crate::service::{ENCODE_PATH, HELLO_PATH};
use crate::shutdown::ShutdownManager;

pub use error::ApiError;

/// Errors from starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    greeting: Arc<str>,
}

impl AppState {
    pub fn new(greeting: impl Into<Arc<str>>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.greeting.as_str())
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(HELLO_PATH, get(handlers::hello))
        .route(ENCODE_PATH, post(handlers::encode_base64))
        .route("/health", get(health::health))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

pub struct AppServer {
    addr: SocketAddr,
    /// Bound at construction so the port is held until `run()`.
    listener: TcpListener,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl AppServer {
    /// Bind the configured address.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = config.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("Server bound to {}", addr);

        Ok(Self {
            addr,
            listener,
            state: AppState::from_config(config),
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind for the `serve` command. A failure is logged and turned into the
    /// process exit code.
    pub async fn bind_or_exit(config: &ServerConfig) -> Result<Self, ExitCode> {
        Self::bind(config).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to start server");
            ExitCode::FAILURE
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until a shutdown signal arrives.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting server on {}", self.addr);

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::warn!("Failed to install signal handlers: {}", e);
                    shutdown.signal_shutdown();
                }
            })
            .into_future()
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
