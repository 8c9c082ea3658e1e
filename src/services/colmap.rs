//! Argument assembly for the external COLMAP-compatible toolchain.
//!
//! The flag spellings below are the toolchain's CLI contract; the CPU-only
//! flags are always passed because the share host has no usable GPU.

use crate::domain::models::StageReport;
use crate::services::runner::{CommandRunner, Invocation};
use crate::services::workspace::WorkspaceLayout;
use std::fmt;
use std::path::{Path, PathBuf};

/// Toolchain stages, named as spelled on its command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FeatureExtractor,
    ExhaustiveMatcher,
    Mapper,
    ImageUndistorter,
    PatchMatchStereo,
    StereoFusion,
    PoissonMesher,
}

impl Stage {
    pub fn subcommand(self) -> &'static str {
        match self {
            Stage::FeatureExtractor => "feature_extractor",
            Stage::ExhaustiveMatcher => "exhaustive_matcher",
            Stage::Mapper => "mapper",
            Stage::ImageUndistorter => "image_undistorter",
            Stage::PatchMatchStereo => "patch_match_stereo",
            Stage::StereoFusion => "stereo_fusion",
            Stage::PoissonMesher => "poisson_mesher",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} exited with code {code}")]
    StageFailed { stage: &'static str, code: i32 },
    #[error("fused point cloud at {} holds no usable points ({bytes} bytes)", .path.display())]
    EmptyFusedCloud { path: PathBuf, bytes: u64 },
    #[error("workspace does not exist: {}", .path.display())]
    WorkspaceMissing { path: PathBuf },
}

/// Builds invocations for each toolchain stage against one workspace.
pub struct Toolchain {
    bin: String,
}

impl Toolchain {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn invocation(&self, stage: Stage, args: Vec<String>) -> Invocation {
        let mut full = vec![stage.subcommand().to_string()];
        full.extend(args);
        Invocation {
            program: self.bin.clone(),
            args: full,
        }
    }

    pub fn feature_extractor(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::FeatureExtractor,
            vec![
                "--database_path".into(),
                path_arg(&ws.database()),
                "--image_path".into(),
                path_arg(ws.image_dir()),
                "--SiftExtraction.use_gpu".into(),
                "0".into(),
            ],
        )
    }

    pub fn exhaustive_matcher(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::ExhaustiveMatcher,
            vec![
                "--database_path".into(),
                path_arg(&ws.database()),
                "--SiftMatching.use_gpu".into(),
                "0".into(),
            ],
        )
    }

    pub fn mapper(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::Mapper,
            vec![
                "--database_path".into(),
                path_arg(&ws.database()),
                "--image_path".into(),
                path_arg(ws.image_dir()),
                "--output_path".into(),
                path_arg(&ws.sparse_dir()),
            ],
        )
    }

    pub fn image_undistorter(
        &self,
        ws: &WorkspaceLayout,
        sparse_model: &Path,
        max_image_size: u32,
    ) -> Invocation {
        self.invocation(
            Stage::ImageUndistorter,
            vec![
                "--image_path".into(),
                path_arg(ws.image_dir()),
                "--input_path".into(),
                path_arg(sparse_model),
                "--output_path".into(),
                path_arg(&ws.dense_dir()),
                "--output_type".into(),
                "COLMAP".into(),
                "--max_image_size".into(),
                max_image_size.to_string(),
            ],
        )
    }

    pub fn patch_match_stereo(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::PatchMatchStereo,
            vec![
                "--workspace_path".into(),
                path_arg(&ws.dense_dir()),
                "--workspace_format".into(),
                "COLMAP".into(),
                // `=` form: older CPU-only builds reject the split spelling.
                "--PatchMatchStereo.gpu_index=-1".into(),
            ],
        )
    }

    pub fn stereo_fusion(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::StereoFusion,
            vec![
                "--workspace_path".into(),
                path_arg(&ws.dense_dir()),
                "--workspace_format".into(),
                "COLMAP".into(),
                "--input_type".into(),
                "geometric".into(),
                "--output_path".into(),
                path_arg(&ws.fused_cloud()),
            ],
        )
    }

    pub fn poisson_mesher(&self, ws: &WorkspaceLayout) -> Invocation {
        self.invocation(
            Stage::PoissonMesher,
            vec![
                "--input_path".into(),
                path_arg(&ws.fused_cloud()),
                "--output_path".into(),
                path_arg(&ws.meshed_model()),
            ],
        )
    }
}

/// Run one stage and abort the sequence on a nonzero exit.
pub fn run_stage(
    runner: &mut dyn CommandRunner,
    stage: Stage,
    invocation: Invocation,
    stages: &mut Vec<StageReport>,
) -> anyhow::Result<()> {
    let status = record_stage(runner, stage, invocation, stages)?;
    match status {
        Some(0) => Ok(()),
        code => Err(PipelineError::StageFailed {
            stage: stage.subcommand(),
            code: code.unwrap_or(-1),
        }
        .into()),
    }
}

/// Run one stage and record its outcome without aborting. Used for fusion,
/// whose own exit code is advisory: the fused-size gate decides.
pub fn record_stage(
    runner: &mut dyn CommandRunner,
    stage: Stage,
    invocation: Invocation,
    stages: &mut Vec<StageReport>,
) -> anyhow::Result<Option<i32>> {
    tracing::info!(stage = stage.subcommand(), "running toolchain stage");
    let status = runner.run(&invocation)?;
    stages.push(StageReport {
        stage: stage.subcommand().to_string(),
        status: if status.success() { "ok" } else { "failed" }.to_string(),
        exit_code: status.code,
    });
    if !status.success() {
        tracing::warn!(
            stage = stage.subcommand(),
            code = status.code.unwrap_or(-1),
            "toolchain stage reported failure"
        );
    }
    Ok(status.code)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
