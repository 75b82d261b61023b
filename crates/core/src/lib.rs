//! forge-core: shared domain types for the workflow forge.
//!
//! Value types here are immutable once constructed and owned by their
//! caller; entity types (`Workflow`, `PipelineExecution`) describe the
//! columns an external storage collaborator persists (see
//! `forge-storage`), not the storage mechanism itself.

pub mod clock;
pub mod error;
pub mod event;
pub mod generate_result;
pub mod generated;
pub mod id;
pub mod intent;
pub mod money;
pub mod pipeline;
pub mod simulation;
pub mod template;
pub mod validation;
pub mod workflow;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{ErrorCode, ForgeError};
pub use event::{Event, EventId, EventType};
pub use generate_result::GenerateResult;
pub use generated::GeneratedCode;
pub use id::{IdGen, SequentialIdGen, ShortId, UuidIdGen};
pub use intent::{ParsedIntent, TriggerType, DEFAULT_ACTION, DEFAULT_CHAIN};
pub use money::Usdc6;
pub use pipeline::{InputMapping, InputSource, PipelineExecution, PipelineExecutionId,
    PipelineId, PipelineRecord, PipelineStatus, PipelineStepConfig, StepId, StepResult};
pub use simulation::{Capability, SimulationResult, SimulationStep, StepStatus};
pub use template::{TemplateDefinition, TemplateMatch};
pub use validation::{ErrorCategory, ValidationError, ValidationResult};
pub use workflow::{DeployStatus, RestrictedSchema, SchemaField, Workflow, WorkflowId};
