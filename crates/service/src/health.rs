//! `GET /health` (§6, supplemented in SPEC_FULL §2): a liveness probe
//! that exercises the storage collaborator without mutating anything.

use crate::dto::HealthResponse;
use forge_storage::Storage;

/// Ping storage and build the health payload. The 200-vs-503 status
/// code a transport would use is `db`'s negation — informational only
/// here, since this crate never binds a transport (`ErrorCode`'s
/// `http_status()` convention elsewhere follows the same pattern).
pub async fn check_health(storage: &dyn Storage, sse_clients: usize, uptime_ms: i64) -> HealthResponse {
    let db = storage.ping().await.is_ok();
    HealthResponse {
        status: if db { "ok" } else { "degraded" },
        db,
        sse_clients,
        uptime_ms,
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
