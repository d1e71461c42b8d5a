// ABOUTME: Output formatting helpers for notification-hub-cli
// ABOUTME: Prints a per-user summary of generated notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use notification_hub::models::Notification;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Display how many notifications were generated and for whom
pub fn display_generation_summary(target: &str, created: &[Notification]) {
    let mut per_user: BTreeMap<Uuid, usize> = BTreeMap::new();
    for notification in created {
        *per_user.entry(notification.user_id).or_default() += 1;
    }

    println!("\nCreated {} fake notification(s) via {target}", created.len());
    println!("{}", "=".repeat(60));

    if per_user.len() <= 10 {
        for (user_id, count) in &per_user {
            println!("   {user_id}  {count}");
        }
    } else {
        println!("   {} distinct users", per_user.len());
    }
}
