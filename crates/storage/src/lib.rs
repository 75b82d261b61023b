//! forge-storage: the `Storage` collaborator boundary, an in-memory
//! reference implementation, adapters onto the narrow traits the other
//! crates depend on, and the C19 startup sweepers.

mod adapters;
mod memory;
mod store;
mod sweep;

pub use adapters::{StorageDurableLog, StoragePipelineStore, StorageWorkflowStore};
pub use memory::InMemoryStorage;
pub use store::{Storage, StorageError};
pub use sweep::{
    run_startup_sweep, STALE_PENDING_WORKFLOW_MS, STALE_RUNNING_EXECUTION_MS, SWEEP_BATCH_CAP,
};
