use crate::cli::{Cli, Commands};
use crate::domain::models::{Config, JsonOut};
use crate::services::audit::audit;
use crate::services::output::print_one;
use crate::services::runner::SystemRunner;
use crate::services::watcher::{SystemClock, Watcher};
use crate::services::workspace::WorkspaceLayout;
use crate::services::{dense, sparse};

pub fn handle_pipeline_commands(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Watch {
            once,
            poll_interval,
            settle_delay,
        } => {
            let mut config = config.clone();
            if let Some(secs) = poll_interval {
                config.poll_interval_secs = *secs;
            }
            if let Some(secs) = settle_delay {
                config.settle_delay_secs = *secs;
            }
            audit(
                "watch_started",
                serde_json::json!({"workspace": config.workspace, "once": once}),
            );

            let mut runner = SystemRunner;
            let mut clock = SystemClock;
            let mut watcher = Watcher::new(&config, &mut runner, &mut clock);
            let summary = watcher.watch(once.then_some(1))?;

            audit(
                "watch_finished",
                serde_json::json!({"triggers": summary.triggers, "polls": summary.polls}),
            );
            print_one(cli.json, summary, |s| {
                format!("processed {} scan(s) over {} poll(s)", s.triggers, s.polls)
            })?;
        }
        Commands::Sparse => {
            let ws = WorkspaceLayout::new(&config.workspace);
            let mut runner = SystemRunner;
            let report = sparse::run_sparse(config, &ws, &mut runner)?;
            audit(
                "sparse_run",
                serde_json::json!({"workspace": config.workspace}),
            );
            print_one(cli.json, report, |r| {
                format!("sparse model ready in {}", r.sparse_dir)
            })?;
        }
        Commands::Dense => {
            let ws = WorkspaceLayout::new(&config.workspace);
            let mut runner = SystemRunner;
            let report = dense::run_dense(config, &ws, &mut runner)?;
            audit(
                "dense_run",
                serde_json::json!({"workspace": config.workspace, "mesh": report.mesh}),
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("sparse model: {}", report.sparse_model);
                if let Some(bytes) = report.fused_bytes {
                    println!("fused cloud: {} bytes", bytes);
                }
                if let Some(mesh) = &report.mesh {
                    println!("mesh written to {}", mesh);
                }
            }
        }
        Commands::Status | Commands::RequestScan => {
            unreachable!("inspect command routed to the pipeline handler")
        }
    }

    Ok(())
}
