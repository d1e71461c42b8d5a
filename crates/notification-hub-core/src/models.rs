// ABOUTME: Notification data models shared by the store, routes, and CLI
// ABOUTME: Defines the persisted notification record and the request payloads that produce it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Notification`: a persisted notification addressed to one user
//! - `CreateNotificationRequest`: body accepted by the create endpoint
//! - `NotificationFilter`: query accepted by the list endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification addressed to a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification ID
    pub id: Uuid,
    /// Short headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Recipient; also the broadcast topic key
    pub user_id: Uuid,
    /// Order the notification refers to
    pub order_id: i64,
    /// Whether the recipient has read it
    pub is_read: bool,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
    /// Last modification time, `None` until first update
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationRequest {
    /// Short headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Recipient
    pub user_id: Uuid,
    /// Order the notification refers to
    #[serde(default)]
    pub order_id: i64,
}

/// Filter for listing notifications
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Restrict to one recipient
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl NotificationFilter {
    /// Filter that matches every notification of one user
    #[must_use]
    pub const fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Topic key under which a user's streaming sessions are registered
#[must_use]
pub fn topic_for_user(user_id: Uuid) -> String {
    user_id.to_string()
}
