use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands};
use services::colmap::PipelineError;
use services::output::print_error;
use services::settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        print_error(cli.json, error_code(&err), &err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = settings::load_settings()?;
    let config = settings::resolve_config(cli, &file)?;

    match &cli.command {
        Commands::Watch { .. } | Commands::Sparse | Commands::Dense => {
            commands::handle_pipeline_commands(cli, &config)
        }
        Commands::Status | Commands::RequestScan => commands::handle_inspect_commands(cli, &config),
    }
}

fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::StageFailed { .. }) => "STAGE_FAILED",
        Some(PipelineError::EmptyFusedCloud { .. }) => "EMPTY_FUSED_CLOUD",
        Some(PipelineError::WorkspaceMissing { .. }) => "WORKSPACE_MISSING",
        None => "ERROR",
    }
}
