//! C19 — startup sweeper. Reconciles rows a crash could have left
//! stuck in a transient state (§4.16): workflows still `"pending"` past
//! 5 minutes, and pipeline executions still `"running"` past 10 minutes
//! (2x the pipeline timeout). Never blocks boot: every failure is
//! logged and swallowed.

use crate::store::Storage;
use forge_core::Clock;
use std::sync::Arc;
use tracing::warn;

/// §4.16: workflows stuck `"pending"` longer than this are presumed
/// abandoned by a crashed generation run.
pub const STALE_PENDING_WORKFLOW_MS: i64 = 5 * 60 * 1000;
/// §4.16: 2x `PIPELINE_TIMEOUT_MS`, so a pipeline that legitimately ran
/// to its own deadline is never swept out from under it.
pub const STALE_RUNNING_EXECUTION_MS: i64 = 10 * 60 * 1000;
/// §4.16: both sweeps cap their batch and leave the tail for the next
/// restart rather than risk an unbounded startup scan.
pub const SWEEP_BATCH_CAP: usize = 100;

fn cutoff_timestamp(now_ms: i64, max_age_ms: i64) -> String {
    let ms = now_ms - max_age_ms;
    chrono::DateTime::from_timestamp_millis(ms)
        .unwrap_or_else(|| chrono::DateTime::from_timestamp(0, 0).expect("epoch is representable"))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Run both startup sweeps. Intended to be awaited once, early in
/// process start, before the service begins taking requests.
pub async fn run_startup_sweep(storage: &Arc<dyn Storage>, clock: &impl Clock) {
    sweep_stale_pending_workflows(storage, clock).await;
    sweep_stale_running_executions(storage, clock).await;
}

async fn sweep_stale_pending_workflows(storage: &Arc<dyn Storage>, clock: &impl Clock) {
    let cutoff = cutoff_timestamp(clock.now_ms(), STALE_PENDING_WORKFLOW_MS);
    let ids = match storage.pending_workflows_older_than(&cutoff, SWEEP_BATCH_CAP).await {
        Ok(ids) => ids,
        Err(err) => {
            warn!(error = %err, "stale pending workflow scan failed");
            return;
        }
    };
    if ids.len() == SWEEP_BATCH_CAP {
        warn!(
            cap = SWEEP_BATCH_CAP,
            "stale pending workflow sweep hit its batch cap; remaining rows deferred to next restart"
        );
    }
    for id in ids {
        if let Err(err) = storage.mark_workflow_failed(&id).await {
            warn!(%id, error = %err, "failed to mark stale pending workflow as failed");
        }
    }
}

async fn sweep_stale_running_executions(storage: &Arc<dyn Storage>, clock: &impl Clock) {
    let cutoff = cutoff_timestamp(clock.now_ms(), STALE_RUNNING_EXECUTION_MS);
    let ids = match storage.running_pipeline_executions_older_than(&cutoff, SWEEP_BATCH_CAP).await {
        Ok(ids) => ids,
        Err(err) => {
            warn!(error = %err, "stale running pipeline execution scan failed");
            return;
        }
    };
    if ids.len() == SWEEP_BATCH_CAP {
        warn!(
            cap = SWEEP_BATCH_CAP,
            "stale running pipeline execution sweep hit its batch cap; remaining rows deferred to next restart"
        );
    }
    for id in ids {
        if let Err(err) = storage.mark_pipeline_execution_failed(&id).await {
            warn!(%id, error = %err, "failed to mark stale pipeline execution as failed");
        }
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
