use super::*;
use crate::llm::LlmResponse;
use crate::validator::TypeCheckOutcome;
use forge_core::{FakeClock, SequentialIdGen};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

const GOOD_SOURCE: &str = r#"
import { handler } from "@chainlink/cre-sdk";
import { z } from "zod";

const configSchema = z.object({ schedule: z.string() });

export function main() {
  handler(trigger, (payload) => {
    return payload;
  });
}
"#;

const BAD_SOURCE: &str = r#"
import fs from "fs";
import { handler } from "@chainlink/cre-sdk";
import { z } from "zod";

const configSchema = z.object({ schedule: z.string() });

export function main() {
  handler(trigger, (payload) => {
    return payload;
  });
}
"#;

struct ScriptedLlm {
    responses: Mutex<Vec<LlmResponse>>,
    calls: AtomicU32,
}

impl ScriptedLlm {
    fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicU32::new(0),
        }
    }

    fn always(response: LlmResponse) -> Self {
        Self {
            responses: Mutex::new(vec![response]),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate_code(&self, _request: GenerationRequest) -> Result<LlmResponse, ForgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut scripted = self.responses.lock().unwrap();
        if scripted.len() > 1 {
            Ok(scripted.remove(0))
        } else {
            Ok(scripted[0].clone())
        }
    }
}

struct AlwaysOkChecker;

#[async_trait]
impl TypeChecker for AlwaysOkChecker {
    async fn check(&self, _source: &str) -> TypeCheckOutcome {
        TypeCheckOutcome {
            ok: true,
            output: String::new(),
        }
    }
}

#[derive(Default)]
struct InMemoryStore {
    saved: Mutex<Vec<Workflow>>,
}

#[async_trait]
impl WorkflowStore for InMemoryStore {
    async fn save(&self, workflow: Workflow) -> Result<(), ForgeError> {
        self.saved.lock().unwrap().push(workflow);
        Ok(())
    }
}

fn clean_response() -> LlmResponse {
    LlmResponse {
        reasoning: "straightforward".to_string(),
        code: GOOD_SOURCE.to_string(),
        config: r#"{"schedule":"*/5 * * * *"}"#.to_string(),
        consumer_contract: None,
        self_review: "looks correct, handler is synchronous and main is exported".to_string(),
        explanation: "polls a schedule".to_string(),
    }
}

fn make_orchestrator(
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn WorkflowStore>,
) -> GenerationOrchestrator<FakeClock, SequentialIdGen> {
    GenerationOrchestrator::new(
        llm,
        Arc::new(AlwaysOkChecker),
        store,
        FakeClock::new(0),
        SequentialIdGen::new("wf"),
        GenerationConfig::default(),
    )
}

#[tokio::test]
async fn s1_happy_generation_produces_valid_non_fallback_result() {
    let llm = Arc::new(ScriptedLlm::always(clean_response()));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(llm, store);

    let result = orchestrator
        .generate("Every 5 minutes check ETH price and alert when it drops below $3000", None)
        .await
        .expect("generation succeeds");

    assert!(!result.fallback);
    assert!(result.validation.valid());
    assert!(result.code.has_source());
    assert!(result.upholds_fallback_invariant());
}

#[tokio::test]
async fn s3_validation_failure_exhausts_retries_and_falls_back() {
    let bad_response = LlmResponse {
        code: BAD_SOURCE.to_string(),
        ..clean_response()
    };
    let llm = Arc::new(ScriptedLlm::always(bad_response));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(llm, store);

    let result = orchestrator
        .generate("Every 5 minutes check ETH price", Some(1))
        .await
        .expect("fallback never throws");

    assert!(result.fallback);
    assert!(!result.code.source.is_empty());
    assert!(result.upholds_fallback_invariant());
}

#[tokio::test]
async fn unknown_forced_template_id_surfaces_template_not_found() {
    let llm = Arc::new(ScriptedLlm::always(LlmResponse {
        code: BAD_SOURCE.to_string(),
        ..clean_response()
    }));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(llm, store);

    let err = orchestrator
        .generate("Every 5 minutes check ETH price", Some(9999))
        .await
        .expect_err("no such template to force");
    assert_eq!(err.code, ErrorCode::TemplateNotFound);
}

#[tokio::test]
async fn s2_ambiguous_prompt_surfaces_template_not_found_without_calling_the_llm() {
    let llm = Arc::new(ScriptedLlm::always(clean_response()));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(Arc::clone(&llm) as Arc<dyn LlmClient>, store);

    let err = orchestrator
        .generate("What is the meaning of life and the universe", None)
        .await
        .expect_err("no template clears the ambiguity guard for this prompt");
    assert_eq!(err.code, ErrorCode::TemplateNotFound);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generated_workflow_is_persisted_via_the_store() {
    let llm = Arc::new(ScriptedLlm::always(clean_response()));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(llm, Arc::clone(&store) as Arc<dyn WorkflowStore>);

    let result = orchestrator.generate("every hour watch the price feed", None).await.unwrap();
    let saved = store.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, result.workflow_id);
}

#[tokio::test]
async fn retry_feeds_previous_validator_errors_back_into_the_prompt() {
    // First attempt returns invalid code (disallowed import), second
    // attempt is clean; the orchestrator's own retry loop should pick
    // up the second, valid attempt without falling back.
    let llm = Arc::new(ScriptedLlm::new(vec![
        LlmResponse { code: BAD_SOURCE.to_string(), ..clean_response() },
        clean_response(),
    ]));
    let store = Arc::new(InMemoryStore::default());
    let orchestrator = make_orchestrator(llm, store);

    let result = orchestrator.generate("every hour watch the price feed", Some(1)).await.unwrap();
    assert!(!result.fallback);
    assert!(result.validation.valid());
}

#[tokio::test]
async fn deadline_expiry_switches_straight_to_fallback() {
    let llm = Arc::new(ScriptedLlm::always(clean_response()));
    let store = Arc::new(InMemoryStore::default());
    let clock = FakeClock::new(0);
    // Advance the clock past the aggregate deadline before the first
    // attempt is even tried.
    clock.advance(AGGREGATE_DEADLINE_MS + 1);
    let orchestrator = GenerationOrchestrator::new(
        llm,
        Arc::new(AlwaysOkChecker),
        store,
        clock,
        SequentialIdGen::new("wf"),
        GenerationConfig::default(),
    );

    let result = orchestrator.generate("every hour watch the price feed", Some(1)).await.unwrap();
    assert!(result.fallback);
}
