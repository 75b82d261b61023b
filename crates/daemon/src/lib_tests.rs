use super::*;

fn test_config() -> env::Config {
    env::Config {
        database_path: "./forge-test.db".into(),
        cre_cli_path: "/nonexistent/cre-for-tests".into(),
        node_env: env::NodeEnv::Development,
        api_port: 0,
        provider_keys: Vec::new(),
    }
}

#[test]
fn bootstrap_assembles_every_collaborator() {
    let config = test_config();
    let app = App::bootstrap(&config);
    assert_eq!(app.metrics.snapshot().executions, 0);
    assert!(app.suggest_cache.get().is_none());
}

#[tokio::test]
async fn startup_sweep_runs_against_an_empty_store_without_error() {
    let app = App::bootstrap(&test_config());
    app.run_startup_sweep().await;
    assert!(app.storage.ping().await.is_ok());
}

#[test]
fn app_is_cheaply_cloneable() {
    let app = App::bootstrap(&test_config());
    let cloned = app.clone();
    assert_eq!(cloned.metrics.snapshot().executions, app.metrics.snapshot().executions);
}
