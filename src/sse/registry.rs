// ABOUTME: Topic registry and broadcast dispatcher for live notification streams
// ABOUTME: Tracks which subscription channels listen on which user topic and fans messages out to them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Topic Registry
//!
//! Every open count-watch stream owns one [`SubscriptionChannel`]. The registry
//! keeps the producing half of each channel under its topic key (a user id) and
//! hands every broadcast to all channels registered under that key.
//!
//! A single mutex guards the whole mapping. A broadcast copies the topic's
//! senders out under the lock and delivers with `try_send` after releasing it,
//! so a slow subscriber never holds up registration or removal on other topics.
//! A channel removed while a broadcast is in flight may still see that one
//! message; its session has stopped reading by then.

use crate::constants::network_config::SSE_CHANNEL_CAPACITY;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Stable identity of a registered subscription channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Producing half of a subscription channel, owned by the registry
struct Listener {
    id: ListenerId,
    sender: mpsc::Sender<String>,
}

/// Consuming half of a subscription channel, owned by one streaming session
#[derive(Debug)]
pub struct SubscriptionChannel {
    id: ListenerId,
    topic: String,
    receiver: mpsc::Receiver<String>,
}

impl SubscriptionChannel {
    /// Identity used to unregister this channel
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Topic this channel was registered under
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next message
    ///
    /// Returns `None` once the registry has dropped the producing half, either
    /// because the channel was unregistered or because the registry shut down.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Take a message that is already buffered, without waiting
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

/// Concurrency-safe mapping from topic key to the channels listening on it
pub struct TopicRegistry {
    topics: Mutex<HashMap<String, Vec<Listener>>>,
    next_id: AtomicU64,
    channel_capacity: usize,
    shutdown: CancellationToken,
}

impl TopicRegistry {
    /// Create a registry whose channels buffer `channel_capacity` messages
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            channel_capacity: channel_capacity.max(1),
            shutdown: CancellationToken::new(),
        }
    }

    fn lock_topics(&self) -> MutexGuard<'_, HashMap<String, Vec<Listener>>> {
        self.topics.lock().unwrap_or_else(|poisoned| {
            warn!("Topic registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Create a new subscription channel and register it under `topic`
    pub fn register(&self, topic: &str) -> SubscriptionChannel {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::channel(self.channel_capacity);

        let subscribers = {
            let mut topics = self.lock_topics();
            let listeners = topics.entry(topic.to_owned()).or_default();
            listeners.push(Listener { id, sender });
            listeners.len()
        };

        debug!(topic = %topic, listener = %id, subscribers, "Registered subscription channel");

        SubscriptionChannel {
            id,
            topic: topic.to_owned(),
            receiver,
        }
    }

    /// Remove the channel `id` from `topic`
    ///
    /// Returns whether a channel was removed. Removing a channel that is not
    /// registered is a no-op. Empty topics are pruned.
    pub fn unregister(&self, topic: &str, id: ListenerId) -> bool {
        let removed = {
            let mut topics = self.lock_topics();
            let Some(listeners) = topics.get_mut(topic) else {
                return false;
            };

            let before = listeners.len();
            listeners.retain(|listener| listener.id != id);
            let removed = listeners.len() != before;

            if listeners.is_empty() {
                topics.remove(topic);
            }
            removed
        };

        if removed {
            debug!(topic = %topic, listener = %id, "Unregistered subscription channel");
        }
        removed
    }

    /// Deliver `message` to every channel registered under `topic`
    ///
    /// Delivery never waits: a channel whose buffer is full misses this message,
    /// and a channel whose session is gone is pruned. Returns the number of
    /// channels that accepted the message.
    pub fn broadcast(&self, topic: &str, message: &str) -> usize {
        let snapshot: Vec<(ListenerId, mpsc::Sender<String>)> = {
            let topics = self.lock_topics();
            topics.get(topic).map_or_else(Vec::new, |listeners| {
                listeners
                    .iter()
                    .map(|listener| (listener.id, listener.sender.clone()))
                    .collect()
            })
        };

        if snapshot.is_empty() {
            debug!(topic = %topic, "Broadcast to topic without subscribers");
            return 0;
        }

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, sender) in snapshot {
            match sender.try_send(message.to_owned()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(topic = %topic, listener = %id, "Subscriber buffer full, dropping message");
                }
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        if !closed.is_empty() {
            self.prune(topic, &closed);
        }

        debug!(topic = %topic, delivered, message = %message, "Broadcast dispatched");
        delivered
    }

    /// Drop channels whose receiving half is gone
    fn prune(&self, topic: &str, closed: &[ListenerId]) {
        let mut topics = self.lock_topics();
        if let Some(listeners) = topics.get_mut(topic) {
            listeners.retain(|listener| !closed.contains(&listener.id));
            if listeners.is_empty() {
                topics.remove(topic);
            }
        }
        drop(topics);

        debug!(topic = %topic, pruned = closed.len(), "Pruned closed subscription channels");
    }

    /// Number of channels registered under `topic`
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock_topics().get(topic).map_or(0, Vec::len)
    }

    /// Number of topics with at least one channel
    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.lock_topics().len()
    }

    /// Number of channels across all topics
    #[must_use]
    pub fn total_subscribers(&self) -> usize {
        self.lock_topics().values().map(Vec::len).sum()
    }

    /// Cancellation token for one streaming session
    ///
    /// The token is cancelled when the registry shuts down.
    #[must_use]
    pub fn session_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Cancel every open session and drop all registered channels
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        let dropped: usize = {
            let mut topics = self.lock_topics();
            let dropped = topics.values().map(Vec::len).sum();
            topics.clear();
            dropped
        };
        info!(dropped, "Topic registry shut down");
    }

    /// Whether [`TopicRegistry::shutdown`] has been called
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new(SSE_CHANNEL_CAPACITY)
    }
}
