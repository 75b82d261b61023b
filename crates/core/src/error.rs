//! Closed error-code taxonomy shared by every crate, matching the
//! `{error:{code, message, details?}}` envelope of §6 and the retry
//! policy of §7.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The closed set of error codes the system can surface externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    Unauthorized,
    WorkflowNotFound,
    PipelineNotFound,
    PipelineDeactivated,
    PipelineExecutionFailed,
    TemplateNotFound,
    AiServiceError,
    CreCliError,
    DiscoveryFailed,
    SseCapacityFull,
    ExecutionFailed,
    InternalError,
}

impl ErrorCode {
    /// HTTP status an external router would use for this code. Informational
    /// only — this crate never binds a transport.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::WorkflowNotFound
            | ErrorCode::PipelineNotFound
            | ErrorCode::PipelineDeactivated
            | ErrorCode::TemplateNotFound => 400,
            ErrorCode::PipelineExecutionFailed => 500,
            ErrorCode::AiServiceError => 502,
            ErrorCode::CreCliError => 500,
            ErrorCode::DiscoveryFailed => 502,
            ErrorCode::SseCapacityFull => 503,
            ErrorCode::ExecutionFailed => 500,
            ErrorCode::InternalError => 500,
        }
    }

    /// Whether an error of this kind is ever retried automatically.
    /// Per §7: user input, auth, not-found, and state-precondition
    /// errors are never retried; capacity errors are client-retryable
    /// but not auto-retried.
    pub fn is_auto_retryable(self) -> bool {
        matches!(
            self,
            ErrorCode::AiServiceError | ErrorCode::DiscoveryFailed | ErrorCode::ExecutionFailed
        )
    }
}

/// A structured, user-facing error.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct ForgeError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ForgeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
