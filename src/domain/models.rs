use crate::domain::constants::{
    DEFAULT_MAX_IMAGE_SIZE, DEFAULT_MIN_FUSED_BYTES, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_SETTLE_DELAY_SECS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Resolved runtime configuration, passed into every component so tests can
/// point them at temporary directories and a fake toolchain.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: PathBuf,
    pub colmap_bin: String,
    pub poll_interval_secs: u64,
    pub settle_delay_secs: u64,
    pub min_fused_bytes: u64,
    pub max_image_size: u32,
}

/// On-disk settings file (`~/.config/scanrunner/config.toml`).
/// Every field is optional; absent values fall back to the defaults.
#[derive(Debug, Deserialize, Default)]
pub struct SettingsFile {
    pub workspace: Option<PathBuf>,
    pub colmap_bin: Option<String>,
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default)]
    pub dense: DenseSettings,
}

#[derive(Debug, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_settle_delay")]
    pub settle_delay_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            settle_delay_secs: default_settle_delay(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DenseSettings {
    #[serde(default = "default_min_fused")]
    pub min_fused_bytes: u64,
    #[serde(default = "default_max_image")]
    pub max_image_size: u32,
}

impl Default for DenseSettings {
    fn default() -> Self {
        Self {
            min_fused_bytes: default_min_fused(),
            max_image_size: default_max_image(),
        }
    }
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_settle_delay() -> u64 {
    DEFAULT_SETTLE_DELAY_SECS
}

fn default_min_fused() -> u64 {
    DEFAULT_MIN_FUSED_BYTES
}

fn default_max_image() -> u32 {
    DEFAULT_MAX_IMAGE_SIZE
}

#[derive(Serialize, Debug)]
pub struct StageReport {
    pub stage: String,
    pub status: String,
    pub exit_code: Option<i32>,
}

#[derive(Serialize, Debug)]
pub struct SparseReport {
    pub database: String,
    pub sparse_dir: String,
    pub stages: Vec<StageReport>,
}

#[derive(Serialize, Debug)]
pub struct DenseReport {
    pub sparse_model: String,
    pub stages: Vec<StageReport>,
    pub fused_bytes: Option<u64>,
    pub mesh: Option<String>,
}

#[derive(Serialize)]
pub struct WatchSummary {
    pub polls: u64,
    pub triggers: u64,
}

#[derive(Serialize)]
pub struct ArtifactStatus {
    pub path: String,
    pub present: bool,
    pub bytes: Option<u64>,
}

#[derive(Serialize)]
pub struct StatusReport {
    pub workspace: String,
    pub sentinel: ArtifactStatus,
    pub scan_request: ArtifactStatus,
    pub database: ArtifactStatus,
    /// Resolved model folder, present only once the mapper has produced one.
    pub sparse_model: Option<String>,
    pub dense_dir: ArtifactStatus,
    pub fused: ArtifactStatus,
    pub mesh: ArtifactStatus,
}

#[derive(Serialize)]
pub struct ScanRequestReport {
    pub path: String,
    pub created: bool,
}
