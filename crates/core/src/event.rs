//! The durable event-log row and the closed set of event types the bus
//! (C4) can emit.

use serde::{Deserialize, Serialize};

/// Monotone row id assigned by the durable log on append.
pub type EventId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Execution,
    Publish,
    Deploy,
    Discovery,
    PipelineStarted,
    PipelineStepStarted,
    PipelineStepCompleted,
    PipelineStepFailed,
    PipelineCompleted,
    PipelineFailed,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Execution => "execution",
            EventType::Publish => "publish",
            EventType::Deploy => "deploy",
            EventType::Discovery => "discovery",
            EventType::PipelineStarted => "pipeline_started",
            EventType::PipelineStepStarted => "pipeline_step_started",
            EventType::PipelineStepCompleted => "pipeline_step_completed",
            EventType::PipelineStepFailed => "pipeline_step_failed",
            EventType::PipelineCompleted => "pipeline_completed",
            EventType::PipelineFailed => "pipeline_failed",
        }
    }
}

/// A durable, append-only log row. `id` is assigned by the storage
/// collaborator on append and is never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub data: serde_json::Value,
    pub created_at: String,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
