// ABOUTME: Server-Sent Events infrastructure for live notification counts
// ABOUTME: Topic registry, per-connection streaming sessions, payload enrichment, and the count-watch route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Builds outgoing event payloads from raw triggers
pub mod enrichment;
/// Topic registry and broadcast dispatcher
pub mod registry;
/// HTTP route handlers for SSE endpoints
pub mod routes;
/// Per-connection streaming session
pub mod session;

pub use enrichment::{EventEnricher, EventPayload, PassthroughEnricher, UnreadCountEnricher};
pub use registry::{ListenerId, SubscriptionChannel, TopicRegistry};
pub use routes::SseRoutes;
pub use session::{SessionState, StreamingSession};
