// ABOUTME: Storage abstraction for notification records
// ABOUTME: Defines the NotificationStore trait consumed by routes, enrichers, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::models::{CreateNotificationRequest, Notification, NotificationFilter};
use async_trait::async_trait;
use uuid::Uuid;

/// Core storage abstraction for notifications
///
/// All implementations must be thread-safe; a single store is shared by every
/// request handler and every streaming session.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a new, unread notification and return it
    async fn create_notification(
        &self,
        request: &CreateNotificationRequest,
    ) -> AppResult<Notification>;

    /// List notifications, newest first, optionally restricted to one user
    async fn list_notifications(&self, filter: &NotificationFilter)
        -> AppResult<Vec<Notification>>;

    /// Fetch one notification by id
    async fn get_notification(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Mark a notification read and return its updated state
    ///
    /// Fails with `ResourceNotFound` when the id is unknown.
    async fn mark_notification_read(&self, id: Uuid) -> AppResult<Notification>;

    /// Number of unread notifications addressed to `user_id`
    async fn count_unread_by_user(&self, user_id: Uuid) -> AppResult<i64>;
}
