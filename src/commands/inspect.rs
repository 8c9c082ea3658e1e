use crate::cli::{Cli, Commands};
use crate::domain::models::{ArtifactStatus, Config, JsonOut};
use crate::services::audit::audit;
use crate::services::output::print_one;
use crate::services::workspace::{request_scan, WorkspaceLayout};

pub fn handle_inspect_commands(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Status => {
            let ws = WorkspaceLayout::new(&config.workspace);
            let report = ws.status();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("workspace: {}", report.workspace);
                print_artifact("sentinel", &report.sentinel);
                print_artifact("scan request", &report.scan_request);
                print_artifact("database", &report.database);
                println!(
                    "sparse model:\t{}",
                    report.sparse_model.as_deref().unwrap_or("absent")
                );
                print_artifact("dense dir", &report.dense_dir);
                print_artifact("fused cloud", &report.fused);
                print_artifact("mesh", &report.mesh);
            }
        }
        Commands::RequestScan => {
            let ws = WorkspaceLayout::new(&config.workspace);
            let report = request_scan(&ws)?;
            audit(
                "scan_requested",
                serde_json::json!({"path": report.path, "created": report.created}),
            );
            print_one(cli.json, report, |r| {
                if r.created {
                    format!("scan requested via {}", r.path)
                } else {
                    format!("scan request already pending at {}", r.path)
                }
            })?;
        }
        Commands::Watch { .. } | Commands::Sparse | Commands::Dense => {
            unreachable!("pipeline command routed to the inspect handler")
        }
    }

    Ok(())
}

fn print_artifact(label: &str, artifact: &ArtifactStatus) {
    match (artifact.present, artifact.bytes) {
        (true, Some(bytes)) => println!("{}:\tpresent\t{} bytes", label, bytes),
        (true, None) => println!("{}:\tpresent", label),
        (false, _) => println!("{}:\tabsent", label),
    }
}
