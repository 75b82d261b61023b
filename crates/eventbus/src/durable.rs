//! The durable half of the event bus — an append-only log trait the
//! core is agnostic about; `forge-storage` supplies the real
//! implementation, tests use an in-memory one.

use async_trait::async_trait;
use forge_core::{Event, EventId, EventType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DurableLogError {
    #[error("durable log write failed: {0}")]
    WriteFailed(String),
    #[error("durable log read failed: {0}")]
    ReadFailed(String),
}

#[async_trait]
pub trait DurableLog: Send + Sync {
    /// Append a row and return its assigned (monotone) id.
    async fn append(
        &self,
        event_type: EventType,
        data: serde_json::Value,
    ) -> Result<EventId, DurableLogError>;

    /// All events with `id > after`, in ascending id order, capped at
    /// `limit` rows.
    async fn read_after(&self, after: EventId, limit: usize) -> Result<Vec<Event>, DurableLogError>;

    /// The highest assigned id, or 0 if the log is empty.
    async fn max_id(&self) -> Result<EventId, DurableLogError>;
}

/// In-memory durable log for tests and for standalone use before a
/// real storage collaborator is wired in.
#[derive(Default)]
pub struct InMemoryDurableLog {
    rows: parking_lot::Mutex<Vec<Event>>,
}

#[async_trait]
impl DurableLog for InMemoryDurableLog {
    async fn append(
        &self,
        event_type: EventType,
        data: serde_json::Value,
    ) -> Result<EventId, DurableLogError> {
        let mut rows = self.rows.lock();
        let id = rows.last().map(|e| e.id).unwrap_or(0) + 1;
        rows.push(Event {
            id,
            event_type,
            data,
            created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        Ok(id)
    }

    async fn read_after(&self, after: EventId, limit: usize) -> Result<Vec<Event>, DurableLogError> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|e| e.id > after)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn max_id(&self) -> Result<EventId, DurableLogError> {
        Ok(self.rows.lock().last().map(|e| e.id).unwrap_or(0))
    }
}

#[cfg(test)]
#[path = "durable_tests.rs"]
mod tests;
