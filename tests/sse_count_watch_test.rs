// ABOUTME: Integration tests for the count-watch SSE endpoint
// ABOUTME: Exercises priming, fan-out, isolation, disconnect cleanup, shutdown, and store failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    create_test_resources, create_test_resources_with, create_test_router, notification_request,
    resources_for_store, store_notification, test_config,
};
use helpers::axum_test::{AxumTestRequest, SseRead};
use notification_hub::{
    database_plugins::NotificationStore,
    errors::{AppError, AppResult},
    models::{CreateNotificationRequest, Notification, NotificationFilter},
};
use std::time::Duration;
use uuid::Uuid;

const QUIET: Duration = Duration::from_millis(300);

fn watch_uri(user_id: Uuid) -> String {
    format!("/notification/count-watch/{user_id}")
}

async fn wait_for_subscribers(
    resources: &notification_hub::resources::ServerResources,
    topic: &str,
    expected: usize,
) {
    for _ in 0..50 {
        if resources.registry.subscriber_count(topic) == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} subscribers on {topic}, found {}",
        resources.registry.subscriber_count(topic)
    );
}

#[tokio::test]
async fn test_stream_headers_and_initial_count() {
    let resources = create_test_resources().await.unwrap();
    let user_id = Uuid::new_v4();
    store_notification(&resources, user_id, "waiting").await.unwrap();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(create_test_router(&resources))
        .await;

    assert_eq!(stream.status(), 200);
    assert_eq!(
        stream.header("content-type").as_deref(),
        Some("text/event-stream")
    );
    assert_eq!(stream.header("cache-control").as_deref(), Some("no-cache"));

    let first = stream.next_event().await.expect_event();
    assert_eq!(first.event, "message");
    assert_eq!(first.json()["message"], "notification: [initial]");
    assert_eq!(first.json()["count"], 1);
}

#[tokio::test]
async fn test_create_wakes_watcher_with_fresh_count() {
    let resources = create_test_resources().await.unwrap();
    let router = create_test_router(&resources);
    let user_id = Uuid::new_v4();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(router.clone())
        .await;
    assert_eq!(stream.next_event().await.expect_event().json()["count"], 0);

    AxumTestRequest::post("/notification")
        .json(&notification_request(user_id, "one"))
        .send(router.clone())
        .await
        .assert_status(StatusCode::OK);

    let update = stream.next_event().await.expect_event();
    assert_eq!(update.json()["message"], "notification: [create notification]");
    assert_eq!(update.json()["count"], 1);
}

#[tokio::test]
async fn test_every_watcher_of_a_user_is_woken() {
    let resources = create_test_resources().await.unwrap();
    let router = create_test_router(&resources);
    let user_id = Uuid::new_v4();

    let mut first = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(router.clone())
        .await;
    let mut second = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(router.clone())
        .await;
    first.next_event().await.expect_event();
    second.next_event().await.expect_event();
    assert_eq!(resources.registry.subscriber_count(&user_id.to_string()), 2);

    AxumTestRequest::post("/notification")
        .json(&notification_request(user_id, "fan-out"))
        .send(router)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(first.next_event().await.expect_event().json()["count"], 1);
    assert_eq!(second.next_event().await.expect_event().json()["count"], 1);
}

#[tokio::test]
async fn test_other_users_streams_stay_quiet() {
    let resources = create_test_resources().await.unwrap();
    let router = create_test_router(&resources);
    let watched = Uuid::new_v4();
    let other = Uuid::new_v4();

    let mut stream = AxumTestRequest::get(&watch_uri(watched))
        .open_stream(router.clone())
        .await;
    stream.next_event().await.expect_event();

    AxumTestRequest::post("/notification")
        .json(&notification_request(other, "not for you"))
        .send(router)
        .await
        .assert_status(StatusCode::OK);

    assert!(matches!(
        stream.next_event_within(QUIET).await,
        SseRead::TimedOut
    ));
}

#[tokio::test]
async fn test_mark_read_lowers_streamed_count() {
    let resources = create_test_resources().await.unwrap();
    let router = create_test_router(&resources);
    let user_id = Uuid::new_v4();
    let stored = store_notification(&resources, user_id, "read me").await.unwrap();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(router.clone())
        .await;
    assert_eq!(stream.next_event().await.expect_event().json()["count"], 1);

    AxumTestRequest::put(&format!("/notification/{}", stored.id))
        .send(router)
        .await
        .assert_status(StatusCode::OK);

    let update = stream.next_event().await.expect_event();
    assert_eq!(update.json()["message"], "notification: [read notification]");
    assert_eq!(update.json()["count"], 0);
}

#[tokio::test]
async fn test_disconnect_unregisters_channel() {
    let resources = create_test_resources().await.unwrap();
    let user_id = Uuid::new_v4();
    let topic = user_id.to_string();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(create_test_router(&resources))
        .await;
    stream.next_event().await.expect_event();
    assert_eq!(resources.registry.subscriber_count(&topic), 1);

    drop(stream);

    wait_for_subscribers(&resources, &topic, 0).await;
    assert_eq!(resources.registry.topic_count(), 0);
    assert_eq!(resources.registry.broadcast(&topic, "after close"), 0);
}

#[tokio::test]
async fn test_priming_can_be_disabled() {
    let mut config = test_config();
    config.sse.prime_on_connect = false;
    let resources = create_test_resources_with(config).await.unwrap();
    let router = create_test_router(&resources);
    let user_id = Uuid::new_v4();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(router.clone())
        .await;
    assert!(matches!(
        stream.next_event_within(QUIET).await,
        SseRead::TimedOut
    ));

    AxumTestRequest::post("/notification")
        .json(&notification_request(user_id, "first"))
        .send(router)
        .await
        .assert_status(StatusCode::OK);

    let update = stream.next_event().await.expect_event();
    assert_eq!(update.json()["message"], "notification: [create notification]");
}

#[tokio::test]
async fn test_registry_shutdown_ends_open_streams() {
    let resources = create_test_resources().await.unwrap();
    let user_id = Uuid::new_v4();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(create_test_router(&resources))
        .await;
    stream.next_event().await.expect_event();

    resources.registry.shutdown();

    assert!(matches!(stream.next_event().await, SseRead::Ended));
    assert_eq!(resources.registry.total_subscribers(), 0);
}

#[tokio::test]
async fn test_invalid_user_id_is_rejected_without_registering() {
    let resources = create_test_resources().await.unwrap();

    let response = AxumTestRequest::get("/notification/count-watch/not-a-uuid")
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(response.text().contains("user_id"));
    assert_eq!(resources.registry.topic_count(), 0);
}

/// Store whose unread count always fails
struct UnavailableCountStore;

#[async_trait]
impl NotificationStore for UnavailableCountStore {
    async fn create_notification(
        &self,
        _request: &CreateNotificationRequest,
    ) -> AppResult<Notification> {
        Err(AppError::database("store offline"))
    }

    async fn list_notifications(
        &self,
        _filter: &NotificationFilter,
    ) -> AppResult<Vec<Notification>> {
        Ok(Vec::new())
    }

    async fn get_notification(&self, _id: Uuid) -> AppResult<Option<Notification>> {
        Ok(None)
    }

    async fn mark_notification_read(&self, _id: Uuid) -> AppResult<Notification> {
        Err(AppError::not_found("Notification"))
    }

    async fn count_unread_by_user(&self, _user_id: Uuid) -> AppResult<i64> {
        Err(AppError::database("store offline"))
    }
}

#[tokio::test]
async fn test_store_failure_closes_stream_and_unregisters() {
    let resources = resources_for_store(std::sync::Arc::new(UnavailableCountStore));
    let user_id = Uuid::new_v4();

    let mut stream = AxumTestRequest::get(&watch_uri(user_id))
        .open_stream(create_test_router(&resources))
        .await;
    assert_eq!(stream.status(), 200);

    assert!(matches!(stream.next_event().await, SseRead::Ended));
    wait_for_subscribers(&resources, &user_id.to_string(), 0).await;
}

#[tokio::test]
async fn test_store_failure_on_create_surfaces_as_server_error() {
    let resources = resources_for_store(std::sync::Arc::new(UnavailableCountStore));

    let body: serde_json::Value = AxumTestRequest::post("/notification")
        .json(&notification_request(Uuid::new_v4(), "doomed"))
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    assert_eq!(body["message"], "failed to create notifications");
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
}
