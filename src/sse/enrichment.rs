// ABOUTME: Turns raw broadcast triggers into the payload a streaming session emits
// ABOUTME: Provides the unread-count enricher used by count-watch and a pass-through variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database_plugins::NotificationStore;
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Data carried by one SSE `message` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Human-readable description of what triggered the event
    pub message: String,
    /// Unread count for the topic's user, present on count-watch streams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Render a trigger the way clients display it
#[must_use]
pub fn format_trigger(trigger: &str) -> String {
    format!("notification: [{trigger}]")
}

/// Builds the outgoing payload for a delivered trigger
///
/// An error closes the session that asked for enrichment.
#[async_trait]
pub trait EventEnricher: Send + Sync {
    /// Produce the payload for `trigger` on `topic`
    async fn enrich(&self, topic: &str, trigger: &str) -> AppResult<EventPayload>;
}

/// Re-reads the user's unread count on every delivery
///
/// Reading at delivery time means a dropped trigger never leaves a client with a
/// stale count once any later trigger arrives.
pub struct UnreadCountEnricher {
    store: Arc<dyn NotificationStore>,
}

impl UnreadCountEnricher {
    /// Create an enricher backed by `store`
    #[must_use]
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventEnricher for UnreadCountEnricher {
    async fn enrich(&self, topic: &str, trigger: &str) -> AppResult<EventPayload> {
        let user_id = Uuid::parse_str(topic)?;
        let count = self.store.count_unread_by_user(user_id).await?;

        Ok(EventPayload {
            message: format_trigger(trigger),
            count: Some(count),
        })
    }
}

/// Emits the trigger unchanged and without a count
pub struct PassthroughEnricher;

#[async_trait]
impl EventEnricher for PassthroughEnricher {
    async fn enrich(&self, _topic: &str, trigger: &str) -> AppResult<EventPayload> {
        Ok(EventPayload {
            message: trigger.to_owned(),
            count: None,
        })
    }
}
