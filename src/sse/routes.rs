// ABOUTME: Count-watch SSE endpoint streaming live unread counts per user
// ABOUTME: Opens a streaming session per connection and renders its payloads as SSE message events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SSE routes for live notification counts

use super::session::StreamingSession;
use crate::constants::sse::{KEEPALIVE_TEXT, MESSAGE_EVENT};
use crate::errors::AppError;
use crate::models::topic_for_user;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::get,
    Router,
};
use futures_util::Stream;
use http::header;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// SSE routes implementation
pub struct SseRoutes;

impl SseRoutes {
    /// Create all SSE routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/notification/count-watch/:user_id",
                get(Self::handle_count_watch),
            )
            .with_state(resources)
    }

    /// Stream the user's unread count, re-read on every create or mark-read
    async fn handle_count_watch(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|_| AppError::invalid_input("please add path param `user_id`"))?;
        let topic = topic_for_user(user_id);

        let mut session = StreamingSession::new(
            resources.registry.clone(),
            resources.enricher.clone(),
            topic,
        )
        .with_priming(resources.config.sse.prime_on_connect);
        session.open();

        info!(
            user_id = %user_id,
            subscribers = resources.registry.subscriber_count(session.topic()),
            "Count-watch stream opened"
        );

        let keepalive = KeepAlive::new()
            .interval(Duration::from_secs(resources.config.sse.keepalive_interval_secs))
            .text(KEEPALIVE_TEXT);

        Ok((
            [
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            Sse::new(Self::session_events(session)).keep_alive(keepalive),
        ))
    }

    /// Render session payloads as SSE events until the session closes
    ///
    /// The session lives inside the stream, so dropping the response body
    /// (client disconnect) drops the session and unregisters its channel.
    fn session_events(
        mut session: StreamingSession,
    ) -> impl Stream<Item = Result<Event, Infallible>> {
        async_stream::stream! {
            while let Some(payload) = session.next_event().await {
                match Event::default().event(MESSAGE_EVENT).json_data(&payload) {
                    Ok(event) => yield Ok::<_, Infallible>(event),
                    Err(e) => {
                        warn!(topic = %session.topic(), error = %e, "Failed to encode SSE payload");
                        break;
                    }
                }
            }
            info!(topic = %session.topic(), delivered = session.delivered(), "Count-watch stream ended");
        }
    }
}
