//! `ValidationResult` — output of the static validator (C11).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCategory {
    Import,
    Async,
    Main,
    Zod,
    Tsc,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ErrorCategory {
    pub fn tag(self) -> &'static str {
        match self {
            ErrorCategory::Import => "IMPORT",
            ErrorCategory::Async => "ASYNC",
            ErrorCategory::Main => "MAIN",
            ErrorCategory::Zod => "ZOD",
            ErrorCategory::Tsc => "TSC",
            ErrorCategory::Config => "CONFIG",
        }
    }
}

impl ValidationError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// The `[CATEGORY] message` form used when errors are fed back into
    /// the next generation attempt's prompt (§4.11).
    pub fn formatted(&self) -> String {
        format!("[{}] {}", self.category.tag(), self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, category: ErrorCategory, message: impl Into<String>) {
        self.errors.push(ValidationError::new(category, message));
    }

    /// Numbered-list rendering fed back as "previous error" context
    /// (§4.11 inner loop).
    pub fn numbered_errors(&self) -> String {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}", i + 1, e.formatted()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
