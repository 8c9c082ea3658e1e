//! Layout of the shared workspace: one directory tree per scan, written to
//! by the scanner firmware and consumed by the reconstruction stages.

use crate::domain::constants::{
    CAMERAS_FILE, DATABASE_FILE, DENSE_DIR, FUSED_FILE, MESHED_FILE, SCAN_REQUEST_FILE,
    SENTINEL_FILE, SPARSE_DIR,
};
use crate::domain::models::{ArtifactStatus, ScanRequestReport, StatusReport};
use crate::services::colmap::PipelineError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The scanner drops captures directly into the workspace root.
    pub fn image_dir(&self) -> &Path {
        &self.root
    }

    pub fn sentinel(&self) -> PathBuf {
        self.root.join(SENTINEL_FILE)
    }

    pub fn scan_request(&self) -> PathBuf {
        self.root.join(SCAN_REQUEST_FILE)
    }

    pub fn database(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    pub fn sparse_dir(&self) -> PathBuf {
        self.root.join(SPARSE_DIR)
    }

    pub fn dense_dir(&self) -> PathBuf {
        self.root.join(DENSE_DIR)
    }

    pub fn fused_cloud(&self) -> PathBuf {
        self.dense_dir().join(FUSED_FILE)
    }

    pub fn meshed_model(&self) -> PathBuf {
        self.dense_dir().join(MESHED_FILE)
    }

    /// The mapper writes either directly into `sparse/` or into a numbered
    /// model folder below it. Prefer `sparse/0` when it holds a camera file.
    pub fn resolve_sparse_model(&self) -> PathBuf {
        let indexed = self.sparse_dir().join("0");
        if indexed.join(CAMERAS_FILE).exists() {
            indexed
        } else {
            self.sparse_dir()
        }
    }

    pub fn fused_cloud_bytes(&self) -> Option<u64> {
        fs::metadata(self.fused_cloud()).ok().map(|m| m.len())
    }

    pub fn status(&self) -> StatusReport {
        let resolved = self.resolve_sparse_model();
        let sparse_model = if resolved.join(CAMERAS_FILE).exists() {
            Some(resolved.to_string_lossy().into_owned())
        } else {
            None
        };
        StatusReport {
            workspace: self.root.to_string_lossy().into_owned(),
            sentinel: artifact(&self.sentinel()),
            scan_request: artifact(&self.scan_request()),
            database: artifact(&self.database()),
            sparse_model,
            dense_dir: artifact(&self.dense_dir()),
            fused: artifact(&self.fused_cloud()),
            mesh: artifact(&self.meshed_model()),
        }
    }
}

/// Drop the command file the scanner firmware polls for. A request that is
/// already pending is left untouched.
pub fn request_scan(ws: &WorkspaceLayout) -> anyhow::Result<ScanRequestReport> {
    if !ws.root().exists() {
        return Err(PipelineError::WorkspaceMissing {
            path: ws.root().to_path_buf(),
        }
        .into());
    }
    let path = ws.scan_request();
    if path.exists() {
        return Ok(ScanRequestReport {
            path: path.to_string_lossy().into_owned(),
            created: false,
        });
    }
    fs::write(&path, "requested-by=scanrunner\n")?;
    Ok(ScanRequestReport {
        path: path.to_string_lossy().into_owned(),
        created: true,
    })
}

fn artifact(path: &Path) -> ArtifactStatus {
    let meta = fs::metadata(path).ok();
    ArtifactStatus {
        path: path.to_string_lossy().into_owned(),
        present: meta.is_some(),
        bytes: meta.filter(|m| m.is_file()).map(|m| m.len()),
    }
}
