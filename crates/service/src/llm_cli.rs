//! Production `LlmClient` (C9's collaborator trait): shells out to a
//! configured provider CLI, feeding it the assembled prompt on stdin
//! and parsing the six structured fields (§4.7) back out of stdout as
//! JSON. The provider binary is expected to emit exactly an
//! `LlmResponse`-shaped JSON object on success.

use async_trait::async_trait;
use forge_core::{ErrorCode, ForgeError};
use forge_generation::{GenerationRequest, LlmClient, LlmResponse};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// §5: "LLM per-request" bound.
const LLM_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CliLlmClient {
    command: String,
    args: Vec<String>,
}

impl CliLlmClient {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    async fn invoke(&self, system_prompt: &str, user_prompt: &str) -> Result<LlmResponse, ForgeError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .env("FORGE_SYSTEM_PROMPT", system_prompt)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ForgeError::new(ErrorCode::AiServiceError, format!("failed to launch generator: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(user_prompt.as_bytes()).await;
        }

        let output = tokio::time::timeout(LLM_REQUEST_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| ForgeError::new(ErrorCode::AiServiceError, "generator request timed out"))?
            .map_err(|e| ForgeError::new(ErrorCode::AiServiceError, format!("generator process error: {e}")))?;

        if !output.status.success() {
            return Err(ForgeError::new(
                ErrorCode::AiServiceError,
                format!("generator exited with status {:?}", output.status.code()),
            ));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| ForgeError::new(ErrorCode::AiServiceError, format!("malformed generator output: {e}")))
    }
}

#[async_trait]
impl LlmClient for CliLlmClient {
    async fn generate_code(&self, request: GenerationRequest) -> Result<LlmResponse, ForgeError> {
        self.invoke(&request.system_prompt, &request.user_prompt).await
    }
}

#[cfg(test)]
#[path = "llm_cli_tests.rs"]
mod tests;
