//! C4 — durable-first emit, bounded live fan-out, Last-Event-ID replay.

use crate::durable::{DurableLog, DurableLogError};
use forge_core::{Event, EventId, EventType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Hard cap on live SSE subscribers (§4.4).
pub const MAX_SSE_CLIENTS: usize = 50;
/// Replay cap per reconnect (§4.4, §8 property 3).
pub const REPLAY_CAP: usize = 100;

#[derive(Debug, Error)]
pub enum EventBusError {
    #[error("durable log error: {0}")]
    Durable(#[from] DurableLogError),
    #[error("SSE subscriber capacity full")]
    SseCapacityFull,
}

/// Durable-log-backed bus with an in-memory broadcast channel for live
/// fan-out. Cloning shares the same log and channel.
#[derive(Clone)]
pub struct EventBus {
    log: Arc<dyn DurableLog>,
    live: broadcast::Sender<Event>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new(log: Arc<dyn DurableLog>) -> Self {
        let (live, _) = broadcast::channel(1024);
        Self {
            log,
            live,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Append `(type, data)` durably and, unless `silent`, broadcast it
    /// to all live subscribers. The append is the durability point: if
    /// it fails, nothing is broadcast and the caller sees the error.
    /// A broadcast with zero receivers is not an error — it just means
    /// nobody is listening right now.
    pub async fn emit(
        &self,
        event_type: EventType,
        data: serde_json::Value,
        silent: bool,
    ) -> Result<EventId, EventBusError> {
        let id = self.log.append(event_type, data.clone()).await?;
        if !silent {
            let event = Event {
                id,
                event_type,
                data,
                created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            };
            // Err here only means "no receivers"; a panicking or slow
            // subscriber can't block or fail this call because each
            // subscriber owns an independent receiver clone.
            let _ = self.live.send(event);
        }
        Ok(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }

    /// Admit a new subscriber. On success, returns the replay batch
    /// (events with `id > last_event_id`, capped at `REPLAY_CAP`, in
    /// ascending order), a synthetic "system" greeting event, and a
    /// live handle for everything emitted afterwards.
    pub async fn subscribe(
        &self,
        last_event_id: Option<EventId>,
    ) -> Result<Subscription, EventBusError> {
        loop {
            let current = self.subscriber_count.load(Ordering::SeqCst);
            if current >= MAX_SSE_CLIENTS {
                return Err(EventBusError::SseCapacityFull);
            }
            if self
                .subscriber_count
                .compare_exchange(current, current + 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                break;
            }
        }

        // Subscribe to live events *before* reading the replay batch so
        // no event emitted in between is lost to the gap.
        let live = self.live.subscribe();

        let replay = if let Some(after) = last_event_id {
            self.log.read_after(after, REPLAY_CAP).await?
        } else {
            Vec::new()
        };

        let greeting = SystemGreeting {
            message: "connected".to_string(),
        };

        Ok(Subscription {
            replay,
            greeting,
            live,
            _guard: SubscriberGuard {
                count: Arc::clone(&self.subscriber_count),
            },
        })
    }
}

/// The live stream's non-durable "you're connected" message, sent once
/// per subscription right after replay. It is not a row in the durable
/// log and isn't part of the closed `EventType` set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SystemGreeting {
    pub message: String,
}

/// Anything the live stream can deliver to a subscriber, in delivery
/// order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SseMessage {
    Event(Event),
    System(SystemGreeting),
}

/// Decrements the subscriber count when the subscription is dropped
/// (the session closing), regardless of how it ends.
struct SubscriberGuard {
    count: Arc<AtomicUsize>,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct Subscription {
    pub replay: Vec<Event>,
    pub greeting: SystemGreeting,
    live: broadcast::Receiver<Event>,
    _guard: SubscriberGuard,
}

impl Subscription {
    /// Full ordered sequence to deliver to the client up front: replay
    /// events, then the greeting (§4.4, §8 property 3).
    pub fn initial_batch(&self) -> Vec<SseMessage> {
        let mut batch: Vec<SseMessage> = self
            .replay
            .iter()
            .cloned()
            .map(SseMessage::Event)
            .collect();
        batch.push(SseMessage::System(self.greeting.clone()));
        batch
    }

    /// Next live event. Returns `None` only when the bus itself is
    /// gone (all `EventBus` clones dropped); a lagging receiver skips
    /// forward rather than erroring, since §4.4 doesn't specify a
    /// lag-disconnect policy.
    pub async fn next_live(&mut self) -> Option<Event> {
        loop {
            match self.live.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
