// ABOUTME: Centralized resource container shared by every route and streaming session
// ABOUTME: Holds the notification store, topic registry, event enricher, and server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! One `ServerResources` is built at startup and handed to the router as shared
//! state, so the store, the registry, and the enricher are created exactly once.

use crate::config::environment::ServerConfig;
use crate::database_plugins::NotificationStore;
use crate::sse::{EventEnricher, TopicRegistry, UnreadCountEnricher};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Notification storage
    pub store: Arc<dyn NotificationStore>,
    /// Topic registry and broadcast dispatcher
    pub registry: Arc<TopicRegistry>,
    /// Payload builder for count-watch streams
    pub enricher: Arc<dyn EventEnricher>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the registry and the unread-count enricher around `store`
    pub fn new(store: Arc<dyn NotificationStore>, config: Arc<ServerConfig>) -> Self {
        let registry = Arc::new(TopicRegistry::new(config.sse.channel_capacity));
        let enricher: Arc<dyn EventEnricher> = Arc::new(UnreadCountEnricher::new(store.clone()));

        Self {
            store,
            registry,
            enricher,
            config,
        }
    }
}
