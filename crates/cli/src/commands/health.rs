//! `forge health` — §6 `GET /health`.

use super::print_json;
use forge_daemon::App;

pub async fn run(app: &App) -> anyhow::Result<()> {
    let response = forge_service::check_health(app.storage.as_ref(), app.events.subscriber_count(), 0).await;
    print_json(&response)
}
