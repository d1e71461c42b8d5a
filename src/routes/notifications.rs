// ABOUTME: Notification REST route handlers for create, list, detail, mark-read, and unread count
// ABOUTME: Wraps every success in a message/data envelope and broadcasts to the recipient's topic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Notification routes
//!
//! Create and mark-read commit to the store first and only then broadcast a
//! trigger to the recipient's topic, so any count re-read by a woken stream
//! already reflects the change.

use crate::constants::triggers::{CREATE_NOTIFICATION, READ_NOTIFICATION};
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{topic_for_user, CreateNotificationRequest, Notification, NotificationFilter};
use crate::resources::ServerResources;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Success envelope returned by every notification endpoint
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiMessage<T> {
    /// Human-readable outcome
    pub message: String,
    /// Payload, omitted when there is none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiMessage<T> {
    fn with_data(message: &str, data: T) -> Json<Self> {
        Json(Self {
            message: message.to_owned(),
            data: Some(data),
        })
    }
}

/// Unread count payload
#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCount {
    /// Recipient
    pub user_id: Uuid,
    /// Unread notifications for the recipient
    pub count: i64,
}

/// Replace the message of a storage failure, keeping client errors as they are
fn describe(error: AppError, message: &str) -> AppError {
    match error.code {
        ErrorCode::ResourceNotFound | ErrorCode::InvalidInput | ErrorCode::InvalidFormat => error,
        code => AppError::new(code, message).with_source(error),
    }
}

fn parse_id(raw: &str, param: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::invalid_input(format!("please add path param `{param}`")))
}

/// Notification routes implementation
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/notification",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/notification/:id",
                get(Self::handle_get).put(Self::handle_mark_read),
            )
            .route("/notification/count/:user_id", get(Self::handle_count))
            .with_state(resources)
    }

    /// List notifications, newest first, optionally for one user
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        filter: Result<Query<NotificationFilter>, QueryRejection>,
    ) -> Result<impl IntoResponse, AppError> {
        let Query(filter) = filter.map_err(|rejection| {
            AppError::invalid_input("failed to serialize query")
                .with_details(serde_json::json!({ "reason": rejection.body_text() }))
        })?;

        let notifications = resources
            .store
            .list_notifications(&filter)
            .await
            .map_err(|e| describe(e, "failed to get notifications"))?;

        Ok(ApiMessage::with_data(
            "get notifications success",
            notifications,
        ))
    }

    /// Store a notification and wake the recipient's streams
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<CreateNotificationRequest>, JsonRejection>,
    ) -> Result<impl IntoResponse, AppError> {
        let Json(request) = body.map_err(|rejection| {
            AppError::invalid_input("failed to serialize request body")
                .with_details(serde_json::json!({ "reason": rejection.body_text() }))
        })?;

        let notification = resources
            .store
            .create_notification(&request)
            .await
            .map_err(|e| describe(e, "failed to create notifications"))?;

        Self::announce(&resources, &notification, CREATE_NOTIFICATION);

        Ok(ApiMessage::with_data(
            "create notifications success",
            notification,
        ))
    }

    /// Fetch one notification
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let id = parse_id(&id, "id")?;

        let notification = resources
            .store
            .get_notification(id)
            .await
            .map_err(|e| describe(e, "failed to get notification detail"))?
            .ok_or_else(|| AppError::not_found("Notification"))?;

        Ok(ApiMessage::with_data(
            "get notification detail success",
            notification,
        ))
    }

    /// Mark one notification read and wake the recipient's streams
    async fn handle_mark_read(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let id = parse_id(&id, "id")?;

        let notification = resources
            .store
            .mark_notification_read(id)
            .await
            .map_err(|e| describe(e, "failed to read notification"))?;

        Self::announce(&resources, &notification, READ_NOTIFICATION);

        Ok(ApiMessage::with_data(
            "read notification success",
            notification,
        ))
    }

    /// Current unread count for one user
    async fn handle_count(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let user_id = parse_id(&user_id, "user_id")?;

        let count = resources
            .store
            .count_unread_by_user(user_id)
            .await
            .map_err(|e| describe(e, "failed to get count notifications"))?;

        Ok(ApiMessage::with_data(
            "get count notifications success",
            UnreadCount { user_id, count },
        ))
    }

    fn announce(resources: &ServerResources, notification: &Notification, trigger: &str) {
        let delivered = resources
            .registry
            .broadcast(&topic_for_user(notification.user_id), trigger);

        AppLogger::log_notification_event(
            &notification.user_id.to_string(),
            &notification.id.to_string(),
            trigger,
            delivered,
        );
    }
}
