// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores, server resources, and routers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `notification_hub`

use anyhow::Result;
use axum::Router;
use notification_hub::{
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    database_plugins::NotificationStore,
    models::{CreateNotificationRequest, Notification},
    resources::ServerResources,
    server::NotificationHubServer,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        // Another test harness may already own the global subscriber
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration for tests: in-memory store, short keep-alive
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::Memory;
    config.sse.keepalive_interval_secs = 1;
    config
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new("sqlite::memory:").await?))
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(test_config()).await
}

/// Server resources over a fresh in-memory database with custom configuration
pub async fn create_test_resources_with(config: ServerConfig) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(database, Arc::new(config))))
}

/// Server resources over an arbitrary store
pub fn resources_for_store(store: Arc<dyn NotificationStore>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(store, Arc::new(test_config())))
}

/// Full application router
pub fn create_test_router(resources: &Arc<ServerResources>) -> Router {
    NotificationHubServer::new(resources.clone()).router()
}

/// Create-notification request for `user_id`
pub fn notification_request(user_id: Uuid, title: &str) -> CreateNotificationRequest {
    CreateNotificationRequest {
        title: title.to_owned(),
        content: format!("{title} content"),
        user_id,
        order_id: 42,
    }
}

/// Store a notification directly, bypassing routes and broadcasts
pub async fn store_notification(
    resources: &ServerResources,
    user_id: Uuid,
    title: &str,
) -> Result<Notification> {
    Ok(resources
        .store
        .create_notification(&notification_request(user_id, title))
        .await?)
}
