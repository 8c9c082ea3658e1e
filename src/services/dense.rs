//! Dense reconstruction and meshing: undistortion, patch-match stereo,
//! fusion and Poisson meshing against an existing sparse model.
//!
//! Fusion is run regardless of what stereo printed; the fused-size gate
//! below is what decides whether meshing is worth attempting. Re-running the
//! whole sequence against a finished workspace is supported and redoes every
//! stage.

use crate::domain::models::{Config, DenseReport};
use crate::services::colmap::{record_stage, run_stage, PipelineError, Stage, Toolchain};
use crate::services::runner::CommandRunner;
use crate::services::workspace::WorkspaceLayout;
use std::fs;

pub fn run_dense(
    config: &Config,
    ws: &WorkspaceLayout,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<DenseReport> {
    if !ws.root().exists() {
        return Err(PipelineError::WorkspaceMissing {
            path: ws.root().to_path_buf(),
        }
        .into());
    }
    let tool = Toolchain::new(&config.colmap_bin);
    let sparse_model = ws.resolve_sparse_model();
    tracing::info!(model = %sparse_model.display(), "resolved sparse model");

    fs::create_dir_all(ws.dense_dir())?;
    let mut report = DenseReport {
        sparse_model: sparse_model.to_string_lossy().into_owned(),
        stages: Vec::new(),
        fused_bytes: None,
        mesh: None,
    };

    run_stage(
        runner,
        Stage::ImageUndistorter,
        tool.image_undistorter(ws, &sparse_model, config.max_image_size),
        &mut report.stages,
    )?;
    run_stage(
        runner,
        Stage::PatchMatchStereo,
        tool.patch_match_stereo(ws),
        &mut report.stages,
    )?;
    record_stage(
        runner,
        Stage::StereoFusion,
        tool.stereo_fusion(ws),
        &mut report.stages,
    )?;

    let bytes = ws.fused_cloud_bytes().unwrap_or(0);
    report.fused_bytes = Some(bytes);
    if bytes <= config.min_fused_bytes {
        return Err(PipelineError::EmptyFusedCloud {
            path: ws.fused_cloud(),
            bytes,
        }
        .into());
    }

    run_stage(
        runner,
        Stage::PoissonMesher,
        tool.poisson_mesher(ws),
        &mut report.stages,
    )?;
    report.mesh = Some(ws.meshed_model().to_string_lossy().into_owned());

    tracing::info!(mesh = %ws.meshed_model().display(), "dense reconstruction complete");
    Ok(report)
}
