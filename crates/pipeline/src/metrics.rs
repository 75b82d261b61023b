//! C18 — in-memory execution counters, exposed via `GET
//! /pipelines/metrics` (§6). `forge-pipeline` owns the counters
//! because every field they track (executions, failures, durations)
//! is produced by the executor (C17); `forge-service` just returns a
//! snapshot, it doesn't route or aggregate anything itself.

use forge_core::PipelineStatus;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide counters. Cloning shares the same atomics (cheap,
/// `Arc`-backed), the same way `forge-eventbus::EventBus` shares its
/// channel across clones.
#[derive(Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    executions: AtomicU64,
    failures: AtomicU64,
    partials: AtomicU64,
    total_duration_ms: AtomicU64,
}

/// A point-in-time snapshot, safe to serialize for `GET
/// /pipelines/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub executions: u64,
    pub failures: u64,
    pub partials: u64,
    /// Arithmetic mean duration across every recorded execution, or 0
    /// if none have been recorded yet.
    pub average_duration_ms: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished execution's terminal status and duration
    /// (§4.15 step 7/8). Called once per execution, after the durable
    /// status transition — losing this update on a crash is
    /// acceptable, the same advisory tolerance as the pipeline's
    /// `execution_count` column (§9).
    pub fn record_execution(&self, status: PipelineStatus, duration_ms: u64) {
        self.inner.executions.fetch_add(1, Ordering::Relaxed);
        self.inner.total_duration_ms.fetch_add(duration_ms, Ordering::Relaxed);
        match status {
            PipelineStatus::Failed => {
                self.inner.failures.fetch_add(1, Ordering::Relaxed);
            }
            PipelineStatus::Partial => {
                self.inner.partials.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let executions = self.inner.executions.load(Ordering::Relaxed);
        let total = self.inner.total_duration_ms.load(Ordering::Relaxed);
        MetricsSnapshot {
            executions,
            failures: self.inner.failures.load(Ordering::Relaxed),
            partials: self.inner.partials.load(Ordering::Relaxed),
            average_duration_ms: if executions == 0 { 0 } else { total / executions },
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
