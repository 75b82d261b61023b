//! `forge generate` — §6 `POST /generate`.

use super::print_json;
use forge_daemon::App;
use forge_service::GenerateResponse;

pub async fn run(app: &App, prompt: &str, template_hint: Option<u32>) -> anyhow::Result<()> {
    let result = app.generation.generate(prompt, template_hint).await?;
    print_json(&GenerateResponse::from(result))
}
