// ABOUTME: Notification database operations for create, list, lookup, mark-read, and unread counts
// ABOUTME: Implements NotificationStore over the SQLite pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::database_plugins::NotificationStore;
use crate::errors::{AppError, AppResult};
use crate::models::{CreateNotificationRequest, Notification, NotificationFilter};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, title, content, user_id, order_id, is_read, created_at, updated_at FROM notifications";

/// Fixed-width RFC 3339 so lexical order on the TEXT column is chronological
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_notification(row: &SqliteRow) -> AppResult<Notification> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;

    Ok(Notification {
        id: Uuid::parse_str(&id)?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        user_id: Uuid::parse_str(&user_id)?,
        order_id: row.try_get("order_id")?,
        is_read: row.try_get::<i64, _>("is_read")? != 0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl NotificationStore for Database {
    async fn create_notification(
        &self,
        request: &CreateNotificationRequest,
    ) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: request.title.clone(),
            content: request.content.clone(),
            user_id: request.user_id,
            order_id: request.order_id,
            is_read: false,
            created_at: Utc::now().trunc_subsecs(6),
            updated_at: None,
        };

        sqlx::query(
            r"
            INSERT INTO notifications (id, title, content, user_id, order_id, is_read, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
            ",
        )
        .bind(notification.id.to_string())
        .bind(&notification.title)
        .bind(&notification.content)
        .bind(notification.user_id.to_string())
        .bind(notification.order_id)
        .bind(timestamp(notification.created_at))
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create notification: {e}")))?;

        tracing::debug!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Notification stored"
        );
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> AppResult<Vec<Notification>> {
        let rows = match filter.user_id {
            Some(user_id) => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC"
                ))
                .bind(user_id.to_string())
                .fetch_all(self.pool())
                .await
            }
            None => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"
                ))
                .fetch_all(self.pool())
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list notifications: {e}")))?;

        rows.iter().map(row_to_notification).collect()
    }

    async fn get_notification(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to get notification: {e}")))?;

        row.as_ref().map(row_to_notification).transpose()
    }

    async fn mark_notification_read(&self, id: Uuid) -> AppResult<Notification> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1, updated_at = ?1 WHERE id = ?2",
        )
        .bind(timestamp(Utc::now()))
        .bind(id.to_string())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to mark notification read: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Notification"));
        }

        self.get_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification"))
    }

    async fn count_unread_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND is_read = 0",
        )
        .bind(user_id.to_string())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to count unread notifications: {e}")))?;

        Ok(count)
    }
}
