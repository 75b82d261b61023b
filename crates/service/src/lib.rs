//! forge-service: the §6 external interface contract — request/response
//! DTOs, owner-signature auth, the health probe, the suggest cache, and
//! the production collaborator implementations (`CliLlmClient`,
//! `CliProcessRunner`, `SandboxWorkflowRunner`) that plug the other
//! crates' traits into real subprocesses. No HTTP binding lives here;
//! that's left to whatever router a future surface wires on top.

mod auth;
mod dto;
mod health;
mod hex;
mod llm_cli;
mod sandbox_runner;
mod suggest;
mod tsc_checker;
mod workflow_runner;

pub use auth::{verify_owner_signature, OwnerAuthHeaders};
pub use dto::{
    CheckCompatibilityRequest, CreatePipelineRequest, ErrorEnvelope, ExecutionResponse,
    GenerateRequest, GenerateResponse, HealthResponse, PipelineResponse, SimulateRequest,
    SimulateResponse, UpdatePipelineRequest, DIRECT_CODE_CAP_BYTES,
};
pub use health::check_health;
pub use llm_cli::CliLlmClient;
pub use sandbox_runner::CliProcessRunner;
pub use suggest::SuggestCache;
pub use tsc_checker::CliTypeChecker;
pub use workflow_runner::SandboxWorkflowRunner;
