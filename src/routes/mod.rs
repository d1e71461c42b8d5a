// ABOUTME: Route module organization for notification hub HTTP endpoints
// ABOUTME: Groups health and notification routes; streaming routes live under sse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the notification hub
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the store and the topic registry.

/// Health check and readiness routes
pub mod health;
/// Notification CRUD and unread count routes
pub mod notifications;

pub use health::HealthRoutes;
pub use notifications::{ApiMessage, NotificationRoutes, UnreadCount};
