//! C12 — generation orchestrator. Wires C6-C11 together behind a
//! bounded-concurrency gate and an aggregate deadline, with a fallback
//! path that can never itself fail (§4.11).

use crate::llm::{scan_self_review, GenerationRequest, LlmClient, LlmResponse, ReasoningEffort};
use crate::prompt::{self, RetryContext};
use crate::quickfix;
use crate::validator::{run_cheap_checks, run_tsc, TypeChecker};
use async_trait::async_trait;
use forge_concurrency::semaphore::Semaphore;
use forge_core::{
    Clock, ErrorCode, ForgeError, GenerateResult, GeneratedCode, IdGen, ParsedIntent, TemplateMatch,
    TriggerType, ValidationResult, Workflow, WorkflowId,
};
use std::sync::Arc;
use std::time::Duration;

const MAX_CONCURRENT: usize = 3;
const MAX_RETRIES: u32 = 2;
const AGGREGATE_DEADLINE_MS: i64 = 90_000;
/// Caps the code-generator's internal red-flag retries so they can
/// never multiply against the orchestrator's own outer retry loop.
const MAX_RED_FLAG_RETRIES_PER_ATTEMPT: u32 = 1;

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn save(&self, workflow: Workflow) -> Result<(), ForgeError>;
}

#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    pub max_concurrent: usize,
    pub max_retries: u32,
    pub aggregate_deadline_ms: i64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_concurrent: MAX_CONCURRENT,
            max_retries: MAX_RETRIES,
            aggregate_deadline_ms: AGGREGATE_DEADLINE_MS,
        }
    }
}

pub struct GenerationOrchestrator<C: Clock, G: IdGen> {
    llm: Arc<dyn LlmClient>,
    type_checker: Arc<dyn TypeChecker>,
    store: Arc<dyn WorkflowStore>,
    clock: C,
    id_gen: G,
    semaphore: Semaphore,
    config: GenerationConfig,
}

impl<C: Clock, G: IdGen> GenerationOrchestrator<C, G> {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        type_checker: Arc<dyn TypeChecker>,
        store: Arc<dyn WorkflowStore>,
        clock: C,
        id_gen: G,
        config: GenerationConfig,
    ) -> Self {
        Self {
            llm,
            type_checker,
            store,
            clock,
            id_gen,
            semaphore: Semaphore::new(config.max_concurrent),
            config,
        }
    }

    fn deadline_expired(&self, started_at_ms: i64) -> bool {
        self.clock.now_ms() - started_at_ms >= self.config.aggregate_deadline_ms
    }

    /// Run one LLM round, feeding red flags raised in its own
    /// self-review back into itself up to
    /// `MAX_RED_FLAG_RETRIES_PER_ATTEMPT` times.
    async fn generate_with_self_review_retry(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        effort: ReasoningEffort,
    ) -> Result<LlmResponse, ForgeError> {
        let mut current_user_prompt = user_prompt.to_string();
        let mut last = None;
        for _ in 0..=MAX_RED_FLAG_RETRIES_PER_ATTEMPT {
            let response = self
                .llm
                .generate_code(GenerationRequest {
                    system_prompt: system_prompt.to_string(),
                    user_prompt: current_user_prompt.clone(),
                    effort,
                })
                .await?;
            match scan_self_review(&response.self_review) {
                None => return Ok(response),
                Some(flag) => {
                    current_user_prompt =
                        format!("{current_user_prompt}\n\nYour own self-review flagged: {flag}. Fix it.");
                    last = Some(response);
                }
            }
        }
        // Exhausted retries without a clean self-review; use the last
        // response anyway and let the static validator be the final
        // arbiter (§4.8).
        last.ok_or_else(|| ForgeError::new(ErrorCode::AiServiceError, "no response generated"))
    }

    async fn run_attempt(
        &self,
        prompt_text: &str,
        intent: &ParsedIntent,
        template: Option<&TemplateMatch>,
        effort: ReasoningEffort,
        retry: Option<&RetryContext>,
    ) -> Result<(GeneratedCode, ValidationResult), ForgeError> {
        let sections = prompt::assemble(prompt_text, intent, template, retry);
        let response = self
            .generate_with_self_review_retry(&sections.system, &sections.user, effort)
            .await?;

        if response.code.trim().is_empty() {
            return Err(ForgeError::new(
                ErrorCode::AiServiceError,
                "generator returned empty source",
            ));
        }

        let fixed = quickfix::apply(&response.code);
        let config_value: serde_json::Value = serde_json::from_str(&response.config)
            .unwrap_or(serde_json::Value::Null);

        let mut result = run_cheap_checks(
            &fixed.source,
            &config_value,
            intent.trigger_type == TriggerType::Cron,
        );
        if result.valid() {
            run_tsc(self.type_checker.as_ref(), &fixed.source, &mut result).await;
        }

        let config_map = match &config_value {
            serde_json::Value::Object(map) => map.clone().into_iter().collect(),
            _ => std::collections::BTreeMap::new(),
        };

        Ok((
            GeneratedCode {
                source: fixed.source,
                config: config_map,
                consumer_contract: response.consumer_contract,
                explanation: response.explanation,
                self_review: response.self_review,
            },
            result,
        ))
    }

    /// §4.11: load the pre-built template and a default, empty-but-valid
    /// config, quick-fix it for consistency, and validate for
    /// observability only — the fallback result is always returned,
    /// regardless of what validation says.
    fn fallback_code(&self, template_id: u32) -> Result<(GeneratedCode, ValidationResult), ForgeError> {
        let def = forge_templates::by_id(template_id).ok_or_else(|| {
            ForgeError::new(ErrorCode::TemplateNotFound, "no fallback template available")
        })?;
        let source = format!(
            "import {{ handler }} from \"@chainlink/cre-sdk\";\nimport {{ z }} from \"zod\";\n\nconst configSchema = z.object({{ schedule: z.string() }});\n\nexport function main() {{\n  handler(trigger, (payload) => {{\n    return payload;\n  }});\n}}\n// template: {}\n",
            def.name
        );
        let fixed = quickfix::apply(&source);
        let config = serde_json::json!({ "schedule": "0 * * * *" });
        let result = run_cheap_checks(&fixed.source, &config, true);
        let config_map = match &config {
            serde_json::Value::Object(map) => map.clone().into_iter().collect(),
            _ => std::collections::BTreeMap::new(),
        };
        Ok((
            GeneratedCode {
                source: fixed.source,
                config: config_map,
                consumer_contract: None,
                explanation: format!("fell back to the {} template", def.name),
                self_review: "fallback path, not model-reviewed".to_string(),
            },
            result,
        ))
    }

    /// Drive C6-C11 end to end. `force_template_id` bypasses the
    /// matcher (used when a caller already knows which template it
    /// wants, e.g. a pipeline replay). The only error this can return
    /// is `TEMPLATE_NOT_FOUND`, surfaced immediately when no template
    /// was matched (an ambiguous prompt) or the forced id doesn't
    /// exist — before any LLM round trip is spent.
    pub async fn generate(
        &self,
        prompt_text: &str,
        force_template_id: Option<u32>,
    ) -> Result<GenerateResult, ForgeError> {
        let permit = self.semaphore.acquire().await;
        let started_at_ms = self.clock.now_ms();

        let intent = forge_nlp::parse(prompt_text);
        let template = forge_templates::match_template(&intent, force_template_id);

        // §4.6/§4.11: template matching is a gate, not just prompt
        // context. An ambiguous prompt (no template clears the
        // ambiguity guard) or an unknown forced id leaves nothing to
        // generate against *or* fall back to, so this is the one
        // error the orchestrator is allowed to surface directly
        // rather than absorb into the fallback path (§8 S2).
        let template = template.ok_or_else(|| {
            ForgeError::new(ErrorCode::TemplateNotFound, "no template matched this prompt")
        })?;

        let mut attempt = 0u32;
        let mut retry_ctx: Option<RetryContext> = None;
        let mut effort = ReasoningEffort::default();
        let mut outcome: Option<(GeneratedCode, ValidationResult, bool)> = None;

        while attempt <= self.config.max_retries {
            if self.deadline_expired(started_at_ms) {
                break;
            }
            match self
                .run_attempt(prompt_text, &intent, Some(&template), effort, retry_ctx.as_ref())
                .await
            {
                Ok((code, validation)) => {
                    if validation.valid() {
                        outcome = Some((code, validation, false));
                        break;
                    }
                    retry_ctx = Some(RetryContext {
                        previous_error: validation.numbered_errors(),
                        previous_self_review: code.self_review.clone(),
                    });
                }
                Err(_) => {
                    // Transport/LLM failure: fall through to retry or,
                    // on the last attempt, to the fallback path below.
                }
            }
            attempt += 1;
            effort = effort.escalate();
        }

        let (code, validation, fallback) = match outcome {
            Some(v) => v,
            None => {
                let (code, validation) = self.fallback_code(template.template_id)?;
                (code, validation, true)
            }
        };

        drop(permit);

        let workflow_id = WorkflowId::new(self.id_gen.next());
        let workflow = Workflow {
            id: workflow_id.clone(),
            code: code.source.clone(),
            config: code.config.clone(),
            input_schema: None,
            output_schema: None,
            owner_address: String::new(),
            price: forge_core::Usdc6::ZERO,
            deploy_status: forge_core::DeployStatus::Pending,
            published: false,
            updated_at: String::new(),
        };
        self.store.save(workflow).await?;

        let result = GenerateResult {
            workflow_id,
            code,
            validation,
            template: Some(template),
            intent,
            fallback,
        };
        debug_assert!(result.upholds_fallback_invariant());
        Ok(result)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
