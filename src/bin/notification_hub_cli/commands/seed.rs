// ABOUTME: Seed command posting generated notifications through the HTTP API
// ABOUTME: Each accepted post broadcasts to the recipient, so live counters update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::{display::display_generation_summary, fake_data::fake_notification};
use crate::Result;
use futures_util::future::join_all;
use notification_hub::errors::AppError;
use notification_hub::models::{CreateNotificationRequest, Notification};
use notification_hub::routes::ApiMessage;
use tracing::warn;
use uuid::Uuid;

async fn post_one(
    client: &reqwest::Client,
    endpoint: &str,
    request: CreateNotificationRequest,
) -> Result<Notification> {
    let response = client
        .post(endpoint)
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::external_service("notification-hub", e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::external_service(
            "notification-hub",
            format!("POST {endpoint} returned {status}: {body}"),
        ));
    }

    let envelope: ApiMessage<Notification> = response
        .json()
        .await
        .map_err(|e| AppError::external_service("notification-hub", e.to_string()))?;

    envelope
        .data
        .ok_or_else(|| AppError::external_service("notification-hub", "response had no data"))
}

/// Post `count` fake notifications to `base_url` concurrently
pub async fn run(base_url: &str, count: u32, user_id: Option<Uuid>) -> Result<()> {
    let client = reqwest::Client::new();
    let endpoint = format!("{}/notification", base_url.trim_end_matches('/'));

    let posts = (0..count).map(|_| post_one(&client, &endpoint, fake_notification(user_id)));

    let mut created = Vec::with_capacity(count as usize);
    let mut failures = 0_usize;
    for result in join_all(posts).await {
        match result {
            Ok(notification) => created.push(notification),
            Err(e) => {
                failures += 1;
                warn!(error = %e, "Failed to seed notification");
            }
        }
    }

    display_generation_summary(&endpoint, &created);

    if failures > 0 {
        return Err(AppError::external_service(
            "notification-hub",
            format!("{failures} of {count} posts failed"),
        ));
    }
    Ok(())
}
