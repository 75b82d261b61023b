//! Production `TypeChecker` (C11's `[TSC]` collaborator, §4.10):
//! materializes a scratch project around one generated source file and
//! a type-stub declaration encoding the runtime API surface, then
//! shells out to an external type-checker binary with a 15s timeout
//! enforced by `forge_generation::run_tsc`; this collaborator just
//! reports whether the subprocess exited clean.

use async_trait::async_trait;
use forge_generation::{TypeCheckOutcome, TypeChecker};
use std::path::PathBuf;
use tokio::process::Command;

/// Encodes the runtime API surface (`handler`, `configSchema`, the SDK
/// client types) so a type-checker can resolve generated code's
/// imports without the real `@chainlink/cre-sdk` package installed.
const TYPE_STUB_DECLARATION: &str = r#"
declare module "@chainlink/cre-sdk" {
  export type TriggerFn = (cb: (payload: unknown) => void) => void;
  export function handler(trigger: TriggerFn, cb: (payload: unknown) => unknown): void;
  export const HTTPClient: { fetch(url: string, init?: unknown): Promise<unknown> };
  export const EVMClient: { call(request: unknown): Promise<unknown>; write(request: unknown): Promise<unknown> };
  export const consensus: { median<T>(values: T[]): T; identical<T>(values: T[]): T };
  export function runInNodeMode<T>(fn: () => T): T;
}
"#;

const PROJECT_MANIFEST: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "commonjs",
    "strict": true,
    "noEmit": true,
    "skipLibCheck": true
  },
  "include": ["workflow.ts", "types.d.ts"]
}"#;

pub struct CliTypeChecker {
    tsc_path: PathBuf,
}

impl CliTypeChecker {
    pub fn new(tsc_path: impl Into<PathBuf>) -> Self {
        Self {
            tsc_path: tsc_path.into(),
        }
    }

    async fn materialize(&self, dir: &std::path::Path, source: &str) -> std::io::Result<()> {
        tokio::fs::write(dir.join("workflow.ts"), source).await?;
        tokio::fs::write(dir.join("types.d.ts"), TYPE_STUB_DECLARATION).await?;
        tokio::fs::write(dir.join("tsconfig.json"), PROJECT_MANIFEST).await?;
        Ok(())
    }
}

#[async_trait]
impl TypeChecker for CliTypeChecker {
    async fn check(&self, source: &str) -> TypeCheckOutcome {
        let temp_dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => {
                return TypeCheckOutcome {
                    ok: false,
                    output: format!("failed to create type-check scratch dir: {e}"),
                }
            }
        };

        if let Err(e) = self.materialize(temp_dir.path(), source).await {
            return TypeCheckOutcome {
                ok: false,
                output: format!("failed to materialize type-check project: {e}"),
            };
        }

        let output = Command::new(&self.tsc_path)
            .arg("--project")
            .arg(temp_dir.path())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => TypeCheckOutcome {
                ok: true,
                output: String::new(),
            },
            Ok(output) => {
                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                combined.push_str(&String::from_utf8_lossy(&output.stderr));
                TypeCheckOutcome { ok: false, output: combined }
            }
            Err(e) => TypeCheckOutcome {
                ok: false,
                output: format!("failed to launch type checker: {e}"),
            },
        }
    }
}

#[cfg(test)]
#[path = "tsc_checker_tests.rs"]
mod tests;
