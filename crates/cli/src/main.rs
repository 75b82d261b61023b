//! `forge`: a thin operator CLI exercising `forge-service` in-process,
//! for local testing (SPEC_FULL §0). It talks directly to an `App`
//! assembled in this same process — there is no daemon socket to
//! connect to, since HTTP/IPC routing is out of scope for this
//! workspace (§1).

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use forge_daemon::{env::Config, App};

#[derive(Parser)]
#[command(name = "forge", version, about = "Workflow forge operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workflow from a natural-language prompt (§6 POST /generate).
    Generate {
        prompt: String,
        #[arg(long)]
        template_hint: Option<u32>,
    },
    /// Simulate a workflow in the sandbox (§6 POST /simulate).
    Simulate {
        #[command(subcommand)]
        mode: SimulateMode,
    },
    /// Pipeline operations (§6 /pipelines).
    Pipeline {
        #[command(subcommand)]
        action: PipelineAction,
    },
    /// Liveness probe (§6 GET /health).
    Health,
}

#[derive(Subcommand)]
enum SimulateMode {
    /// Simulate a workflow already persisted in storage.
    Stored {
        workflow_id: String,
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
    /// Simulate source code directly, without persisting it.
    Direct {
        #[arg(long)]
        code: std::path::PathBuf,
        #[arg(long)]
        config: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum PipelineAction {
    /// Seed a pipeline from a steps JSON file, out of band (§9: pipelines
    /// are provisioned out of band, there is no storage-level create).
    Create {
        #[arg(long)]
        steps: std::path::PathBuf,
        #[arg(long, default_value_t = true)]
        active: bool,
    },
    /// Execute a pipeline against a trigger input JSON file.
    Execute {
        pipeline_id: String,
        #[arg(long)]
        input: Option<std::path::PathBuf>,
    },
    /// Show a pipeline's stored definition.
    Show { pipeline_id: String },
    /// Check output/input schema compatibility (§6 POST
    /// /pipelines/check-compatibility), independent of any stored
    /// pipeline.
    CheckCompatibility {
        #[arg(long)]
        output_schema: std::path::PathBuf,
        #[arg(long)]
        input_schema: std::path::PathBuf,
    },
}

/// Exposed for `main_tests`: clap's derive builds a `Command` lazily,
/// and tests want to exercise `--help`/`--version` without spawning
/// the actual binary (cheaper than `assert_cmd`, and the donor CLI
/// tests the same way for its unit-level help/version checks).
fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = App::bootstrap(&Config::load());

    match cli.command {
        Commands::Generate { prompt, template_hint } => {
            commands::generate::run(&app, &prompt, template_hint).await
        }
        Commands::Simulate { mode } => match mode {
            SimulateMode::Stored { workflow_id, config } => {
                commands::simulate::run_stored(&app, &workflow_id, config).await
            }
            SimulateMode::Direct { code, config } => commands::simulate::run_direct(&app, &code, &config).await,
        },
        Commands::Pipeline { action } => match action {
            PipelineAction::Create { steps, active } => commands::pipeline::create(&app, &steps, active).await,
            PipelineAction::Execute { pipeline_id, input } => {
                commands::pipeline::execute(&app, &pipeline_id, input).await
            }
            PipelineAction::Show { pipeline_id } => commands::pipeline::show(&app, &pipeline_id).await,
            PipelineAction::CheckCompatibility { output_schema, input_schema } => {
                commands::pipeline::check_compatibility(&output_schema, &input_schema)
            }
        },
        Commands::Health => commands::health::run(&app).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
