//! forge-daemon: process entrypoint. Loads configuration, initializes
//! tracing, assembles the `App`, runs the startup sweep (C19), then
//! idles until a shutdown signal — the same shape as the donor's
//! `ojd` main, minus the Unix-socket listener (HTTP/IPC routing is
//! out of scope here, §1).

use tracing::info;

fn print_help() {
    println!("forge-daemon {}", env!("CARGO_PKG_VERSION"));
    println!("Workflow forge process entrypoint: generation, simulation, and pipeline execution.");
    println!();
    println!("USAGE:");
    println!("    forge-daemon");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

fn init_tracing(node_env: forge_daemon::env::NodeEnv) {
    use tracing_subscriber::EnvFilter;

    let default_directive = match node_env {
        forge_daemon::env::NodeEnv::Development => "info",
        forge_daemon::env::NodeEnv::Production => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("forge-daemon {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: forge-daemon [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = forge_daemon::env::Config::load();
    init_tracing(config.node_env);

    info!(port = config.api_port, node_env = ?config.node_env, "starting workflow forge daemon");

    let app = forge_daemon::App::bootstrap(&config);
    app.run_startup_sweep().await;
    info!("startup sweep complete; daemon ready");

    wait_for_shutdown_signal().await;
    info!("shutdown signal received, exiting");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(_) => return,
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
