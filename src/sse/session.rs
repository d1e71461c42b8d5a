// ABOUTME: Per-connection streaming session bridging a subscription channel to SSE output
// ABOUTME: Owns registration, waits for triggers or cancellation, enriches, and always unregisters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Streaming Session
//!
//! One session exists per open count-watch connection. Its lifecycle is
//!
//! ```text
//! Idle -> Registered -> Waiting <-> Delivering -> Closed
//! ```
//!
//! The session leaves `Waiting` when a trigger arrives or when its cancellation
//! token fires. Cancellation covers client disconnect (the response body, and
//! with it the session, is dropped), an explicit [`StreamingSession::cancel`],
//! and registry shutdown. Every path into `Closed` unregisters the channel, and
//! dropping the session closes it.

use super::enrichment::{EventEnricher, EventPayload};
use super::registry::{ListenerId, SubscriptionChannel, TopicRegistry};
use crate::constants::triggers::INITIAL;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Lifecycle position of a streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, channel not yet registered
    Idle,
    /// Channel registered, nothing read yet
    Registered,
    /// Waiting for a trigger or cancellation
    Waiting,
    /// Enriching a trigger into a payload
    Delivering,
    /// Unregistered; no further events
    Closed,
}

enum Wake {
    Trigger(String),
    Cancelled,
    Disconnected,
}

/// Bridges one subscription channel to one client stream
pub struct StreamingSession {
    registry: Arc<TopicRegistry>,
    enricher: Arc<dyn EventEnricher>,
    topic: String,
    channel: Option<SubscriptionChannel>,
    cancel: CancellationToken,
    state: SessionState,
    prime_on_open: bool,
    pending: Option<String>,
    delivered: u64,
}

impl StreamingSession {
    /// Create an idle session for `topic`
    pub fn new(
        registry: Arc<TopicRegistry>,
        enricher: Arc<dyn EventEnricher>,
        topic: impl Into<String>,
    ) -> Self {
        let cancel = registry.session_token();
        Self {
            registry,
            enricher,
            topic: topic.into(),
            channel: None,
            cancel,
            state: SessionState::Idle,
            prime_on_open: true,
            pending: None,
            delivered: 0,
        }
    }

    /// Whether the first event is produced immediately after opening
    ///
    /// Priming delivers the `initial` trigger to this session only; other
    /// subscribers on the same topic see nothing.
    #[must_use]
    pub const fn with_priming(mut self, prime: bool) -> Self {
        self.prime_on_open = prime;
        self
    }

    /// Register the subscription channel
    ///
    /// Opening an already opened or closed session does nothing.
    pub fn open(&mut self) {
        if self.state != SessionState::Idle {
            return;
        }

        let channel = self.registry.register(&self.topic);
        debug!(topic = %self.topic, listener = %channel.id(), "Streaming session opened");
        self.channel = Some(channel);
        self.state = SessionState::Registered;

        if self.prime_on_open {
            self.pending = Some(INITIAL.to_owned());
        }
    }

    /// Produce the next payload, or `None` once the session is closed
    ///
    /// Opens the session first if needed. Cancellation, channel closure, and
    /// enrichment failure all close the session.
    pub async fn next_event(&mut self) -> Option<EventPayload> {
        match self.state {
            SessionState::Idle => self.open(),
            SessionState::Closed => return None,
            SessionState::Registered | SessionState::Waiting | SessionState::Delivering => {}
        }

        let trigger = if let Some(primed) = self.pending.take() {
            primed
        } else {
            self.state = SessionState::Waiting;
            match self.wait_for_trigger().await {
                Wake::Trigger(trigger) => trigger,
                Wake::Cancelled => {
                    debug!(topic = %self.topic, "Streaming session cancelled");
                    self.close();
                    return None;
                }
                Wake::Disconnected => {
                    debug!(topic = %self.topic, "Subscription channel closed by registry");
                    self.close();
                    return None;
                }
            }
        };

        self.state = SessionState::Delivering;
        match self.enricher.enrich(&self.topic, &trigger).await {
            Ok(payload) => {
                self.delivered += 1;
                self.state = SessionState::Waiting;
                Some(payload)
            }
            Err(e) => {
                warn!(topic = %self.topic, trigger = %trigger, error = %e, "Failed to enrich event, closing stream");
                self.close();
                None
            }
        }
    }

    async fn wait_for_trigger(&mut self) -> Wake {
        let Some(channel) = self.channel.as_mut() else {
            return Wake::Disconnected;
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Wake::Cancelled,
            message = channel.recv() => message.map_or(Wake::Disconnected, Wake::Trigger),
        }
    }

    /// Request cancellation; the session closes at its next wait
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this session when fired
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Unregister and move to `Closed`
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        if let Some(channel) = self.channel.take() {
            self.registry.unregister(&self.topic, channel.id());
        }
        self.pending = None;
        self.state = SessionState::Closed;
        debug!(topic = %self.topic, delivered = self.delivered, "Streaming session closed");
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Topic key this session listens on
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Registered channel identity, if the session is open
    #[must_use]
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.channel.as_ref().map(SubscriptionChannel::id)
    }

    /// Number of payloads produced so far
    #[must_use]
    pub const fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Drop for StreamingSession {
    fn drop(&mut self) {
        self.close();
    }
}
