use super::*;
use serial_test::serial;

#[test]
#[serial]
fn defaults_apply_when_unset() {
    std::env::remove_var("DATABASE_PATH");
    std::env::remove_var("CRE_CLI_PATH");
    std::env::remove_var("NODE_ENV");
    std::env::remove_var("API_PORT");
    let config = Config::load();
    assert_eq!(config.database_path, PathBuf::from("./forge.db"));
    assert_eq!(config.cre_cli_path, PathBuf::from("cre"));
    assert_eq!(config.node_env, NodeEnv::Development);
    assert_eq!(config.api_port, 8787);
}

#[test]
#[serial]
fn reads_overrides_from_the_environment() {
    std::env::set_var("DATABASE_PATH", "/tmp/custom.db");
    std::env::set_var("CRE_CLI_PATH", "/usr/local/bin/cre");
    std::env::set_var("NODE_ENV", "production");
    std::env::set_var("API_PORT", "9000");
    let config = Config::load();
    assert_eq!(config.database_path, PathBuf::from("/tmp/custom.db"));
    assert_eq!(config.cre_cli_path, PathBuf::from("/usr/local/bin/cre"));
    assert_eq!(config.node_env, NodeEnv::Production);
    assert_eq!(config.api_port, 9000);
    std::env::remove_var("DATABASE_PATH");
    std::env::remove_var("CRE_CLI_PATH");
    std::env::remove_var("NODE_ENV");
    std::env::remove_var("API_PORT");
}

#[test]
#[serial]
fn invalid_port_falls_back_to_default() {
    std::env::set_var("API_PORT", "not-a-port");
    let config = Config::load();
    assert_eq!(config.api_port, 8787);
    std::env::remove_var("API_PORT");
}

#[test]
fn development_leaks_internal_details_but_production_does_not() {
    assert!(NodeEnv::Development.leaks_internal_details());
    assert!(!NodeEnv::Production.leaks_internal_details());
}

#[test]
#[serial]
fn provider_keys_map_only_includes_set_vars() {
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("ANTHROPIC_API_KEY");
    std::env::remove_var("GEMINI_API_KEY");
    std::env::set_var("OPENAI_API_KEY", "sk-test");
    let keys = provider_keys_map();
    assert_eq!(keys.get("OPENAI_API_KEY").map(String::as_str), Some("sk-test"));
    assert!(!keys.contains_key("ANTHROPIC_API_KEY"));
    std::env::remove_var("OPENAI_API_KEY");
}
