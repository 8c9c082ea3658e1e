//! Names shared between the scanner firmware, the watcher and the
//! toolchain stages. Changing any of these breaks the on-disk protocol.

/// Marker the scanner drops once all captures are flushed to the share.
pub const SENTINEL_FILE: &str = "done.txt";
/// Command file the scanner firmware polls for to begin a capture pass.
pub const SCAN_REQUEST_FILE: &str = "start_scan.txt";
/// Feature/match database produced by the extraction stage.
pub const DATABASE_FILE: &str = "database.db";
pub const SPARSE_DIR: &str = "sparse";
pub const DENSE_DIR: &str = "dense";
/// Camera file the mapper writes inside a finished model folder.
pub const CAMERAS_FILE: &str = "cameras.bin";
pub const FUSED_FILE: &str = "fused.ply";
pub const MESHED_FILE: &str = "meshed.ply";

pub const DEFAULT_COLMAP_BIN: &str = "colmap";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 1;
/// A fused cloud at or below this size holds no usable points.
pub const DEFAULT_MIN_FUSED_BYTES: u64 = 1000;
pub const DEFAULT_MAX_IMAGE_SIZE: u32 = 2000;
