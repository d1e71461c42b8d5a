// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for routes, streaming defaults, and broadcast triggers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being scattered
//! across the modules that use them.

/// Service identity
pub mod service_names {
    /// Service name reported in structured logs
    pub const NOTIFICATION_HUB: &str = "notification-hub";
}

/// Network defaults
pub mod network_config {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default per-subscriber channel capacity; one slot is enough because
    /// every delivery re-reads the current count
    pub const SSE_CHANNEL_CAPACITY: usize = 1;
    /// Default keep-alive interval for SSE responses, in seconds
    pub const SSE_KEEPALIVE_INTERVAL_SECS: u64 = 15;
}

/// Storage defaults
pub mod database {
    /// Default database URL
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/notifications.db";
}

/// Broadcast trigger texts handed to the dispatcher
pub mod triggers {
    /// Fired once per successful create
    pub const CREATE_NOTIFICATION: &str = "create notification";
    /// Fired once per successful mark-read
    pub const READ_NOTIFICATION: &str = "read notification";
    /// Synthetic trigger that primes a freshly opened stream
    pub const INITIAL: &str = "initial";
}

/// SSE wire format
pub mod sse {
    /// Event name used for count updates
    pub const MESSAGE_EVENT: &str = "message";
    /// Keep-alive comment text
    pub const KEEPALIVE_TEXT: &str = "keepalive";
}
