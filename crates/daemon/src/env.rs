//! Centralized environment variable access for the daemon crate (§6
//! "Environment variables"). Every accessor returns a typed default or
//! a config error; none of them panic.

use std::path::PathBuf;

/// Names mirrored into subprocess environments as `CRE_SECRET_<NAME>`
/// (§6 "Subprocess env is augmented with `CRE_SECRET_<NAME>` mirrors
/// of the provider keys").
const PROVIDER_KEY_VARS: &[&str] = &["OPENAI_API_KEY", "ANTHROPIC_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub cre_cli_path: PathBuf,
    pub node_env: NodeEnv,
    pub api_port: u16,
    pub provider_keys: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEnv {
    Development,
    Production,
}

impl NodeEnv {
    /// §7: "no leakage of internal details unless development mode is set".
    pub fn leaks_internal_details(self) -> bool {
        matches!(self, NodeEnv::Development)
    }
}

fn database_path() -> PathBuf {
    std::env::var("DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./forge.db"))
}

fn cre_cli_path() -> PathBuf {
    std::env::var("CRE_CLI_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("cre"))
}

fn node_env() -> NodeEnv {
    match std::env::var("NODE_ENV").as_deref() {
        Ok("production") => NodeEnv::Production,
        _ => NodeEnv::Development,
    }
}

/// Default matches the teacher convention of a conservative local port.
fn api_port() -> u16 {
    std::env::var("API_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8787)
}

/// Reads whichever provider keys are actually set; a missing key is
/// not an error; each run simply won't have that provider's mirror.
fn provider_keys() -> Vec<(String, String)> {
    PROVIDER_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
        .collect()
}

/// Raw provider key map, ready to hand to `forge_sandbox::secret_env`
/// (which applies the `CRE_SECRET_<NAME>` mirroring itself, §4.12, §6).
pub fn provider_keys_map() -> std::collections::BTreeMap<String, String> {
    provider_keys().into_iter().collect()
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_path: database_path(),
            cre_cli_path: cre_cli_path(),
            node_env: node_env(),
            api_port: api_port(),
            provider_keys: provider_keys(),
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
