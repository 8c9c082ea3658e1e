//! Sparse reconstruction: the three-stage sequence the watcher runs on each
//! trigger. The first nonzero exit aborts the rest of the sequence.

use crate::domain::models::{Config, SparseReport};
use crate::services::colmap::{run_stage, PipelineError, Stage, Toolchain};
use crate::services::runner::CommandRunner;
use crate::services::workspace::WorkspaceLayout;
use std::fs;

pub fn run_sparse(
    config: &Config,
    ws: &WorkspaceLayout,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<SparseReport> {
    if !ws.root().exists() {
        return Err(PipelineError::WorkspaceMissing {
            path: ws.root().to_path_buf(),
        }
        .into());
    }
    let tool = Toolchain::new(&config.colmap_bin);
    let mut report = SparseReport {
        database: ws.database().to_string_lossy().into_owned(),
        sparse_dir: ws.sparse_dir().to_string_lossy().into_owned(),
        stages: Vec::new(),
    };

    run_stage(
        runner,
        Stage::FeatureExtractor,
        tool.feature_extractor(ws),
        &mut report.stages,
    )?;
    run_stage(
        runner,
        Stage::ExhaustiveMatcher,
        tool.exhaustive_matcher(ws),
        &mut report.stages,
    )?;

    fs::create_dir_all(ws.sparse_dir())?;
    run_stage(runner, Stage::Mapper, tool.mapper(ws), &mut report.stages)?;

    tracing::info!(model = %ws.sparse_dir().display(), "sparse reconstruction complete");
    Ok(report)
}
