// ABOUTME: Main library entry point for the notification hub service
// ABOUTME: Per-user notification storage with live unread counts streamed over Server-Sent Events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Notification Hub
//!
//! Stores notifications addressed to individual users and keeps every open
//! client informed of the user's unread count.
//!
//! ## Architecture
//!
//! - **Store**: `NotificationStore` over SQLite (`database`)
//! - **Topic registry**: maps a user id to the subscription channels listening on it
//! - **Streaming sessions**: one per open count-watch connection; wakes on a
//!   broadcast, re-reads the count, emits an SSE `message` event
//! - **Routes**: REST endpoints that commit to the store and then broadcast
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use notification_hub::config::environment::ServerConfig;
//! use notification_hub::database::Database;
//! use notification_hub::resources::ServerResources;
//! use notification_hub::server::{shutdown_signal, NotificationHubServer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(Arc::new(database), config));
//!
//!     NotificationHubServer::new(resources)
//!         .run(shutdown_signal())
//!         .await
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// SQLite notification storage
pub mod database;

/// Storage abstraction
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Notification data models
pub mod models;

/// Shared server resources
pub mod resources;

/// REST route handlers
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Live notification counts over Server-Sent Events
pub mod sse;
