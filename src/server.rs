// ABOUTME: HTTP server assembly and lifecycle for the notification hub
// ABOUTME: Builds the axum router, serves it, and shuts the topic registry down before draining
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Notification Hub Server
//!
//! Open count-watch streams never finish on their own, so graceful shutdown
//! first shuts the topic registry down. That ends every streaming session and
//! lets axum finish draining connections.

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, NotificationRoutes};
use crate::sse::SseRoutes;
use anyhow::{Context, Result};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the notification API and live count streams
pub struct NotificationHubServer {
    resources: Arc<ServerResources>,
}

impl NotificationHubServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Shared resources backing this server
    #[must_use]
    pub fn resources(&self) -> &Arc<ServerResources> {
        &self.resources
    }

    /// Build the full application router
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(NotificationRoutes::routes(self.resources.clone()))
            .merge(SseRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.resources.config))
    }

    /// Bind the configured address and serve until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.resources.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr().context("Listener has no local address")?;
        info!(address = %local_addr, "Notification hub listening");

        let registry = self.resources.registry.clone();
        let router = self.router();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown requested, closing live streams");
                registry.shutdown();
            })
            .await
            .context("HTTP server failed")?;

        info!("Notification hub stopped");
        Ok(())
    }
}

/// Resolve on Ctrl-C, or on SIGTERM where supported
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
