// ABOUTME: Fake command inserting generated notifications straight into the store
// ABOUTME: Bypasses the HTTP API, so open count-watch streams are not woken
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::{display::display_generation_summary, fake_data::fake_notification};
use crate::Result;
use notification_hub::database::Database;
use notification_hub::database_plugins::NotificationStore;
use tracing::debug;
use uuid::Uuid;

/// Insert `count` fake notifications
pub async fn run(database: &Database, count: u32, user_id: Option<Uuid>) -> Result<()> {
    let mut created = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let request = fake_notification(user_id);
        let notification = database.create_notification(&request).await?;
        debug!(notification_id = %notification.id, user_id = %notification.user_id, "Fake notification stored");
        created.push(notification);
    }

    display_generation_summary("database", &created);
    Ok(())
}
