//! forge-pipeline: the multi-workflow pipeline executor (C17), its
//! schema compatibility checker (C15), and pricing roll-up (C16).

mod executor;
mod metrics;
mod pricing;
mod schema;

pub use executor::{
    ExecutorConfig, PipelineExecutor, PipelineStore, WorkflowRunner, MIN_RETRY_BUDGET_MS,
    PIPELINE_TIMEOUT_MS, STEP_RETRY_DELAY_MS, STEP_TIMEOUT_MS,
};
pub use metrics::{Metrics, MetricsSnapshot};
pub use pricing::{price_pipeline, PipelinePrice, PriceLine};
pub use schema::{check_schema_compatibility, coerce_value, CompatibilityReport, FieldMatch};
