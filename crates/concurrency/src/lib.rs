//! forge-concurrency: the reusable admission-control and resilience
//! primitives shared across the generation pipeline (C12), the
//! simulation sandbox (C13), and the pipeline executor (C17).

pub mod cache;
pub mod retry;
pub mod semaphore;

pub use cache::LruTtlCache;
pub use retry::{is_retryable, with_retry, RetryConfig};
pub use semaphore::{Semaphore, SemaphoreError, SemaphorePermit};
