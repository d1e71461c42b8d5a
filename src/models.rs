// ABOUTME: Notification data models re-exported from the core crate
// ABOUTME: Persisted notification record, request payloads, and topic key derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use notification_hub_core::models::{
    topic_for_user, CreateNotificationRequest, Notification, NotificationFilter,
};
