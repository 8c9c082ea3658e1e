//! Settings-file loading and CLI flag merging into the runtime `Config`.

use crate::cli::Cli;
use crate::domain::constants::DEFAULT_COLMAP_BIN;
use crate::domain::models::{Config, SettingsFile};
use std::path::PathBuf;

pub fn load_settings() -> anyhow::Result<SettingsFile> {
    let home = std::env::var("HOME")?;
    let path = PathBuf::from(home).join(".config/scanrunner/config.toml");
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Flags win over the settings file; the file wins over built-in defaults.
/// The workspace has no default: it must come from one of the two.
pub fn resolve_config(cli: &Cli, file: &SettingsFile) -> anyhow::Result<Config> {
    let workspace = cli
        .workspace
        .clone()
        .or_else(|| file.workspace.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no workspace configured; pass --workspace or set it in ~/.config/scanrunner/config.toml"
            )
        })?;
    Ok(Config {
        workspace,
        colmap_bin: cli
            .colmap_bin
            .clone()
            .or_else(|| file.colmap_bin.clone())
            .unwrap_or_else(|| DEFAULT_COLMAP_BIN.to_string()),
        poll_interval_secs: file.watch.poll_interval_secs,
        settle_delay_secs: file.watch.settle_delay_secs,
        min_fused_bytes: file.dense.min_fused_bytes,
        max_image_size: file.dense.max_image_size,
    })
}

#[cfg(test)]
mod tests {
    use super::resolve_config;
    use crate::cli::Cli;
    use crate::domain::models::SettingsFile;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_the_settings_file() {
        let cli = Cli::parse_from(["scanrunner", "--workspace", "/flag/ws", "status"]);
        let file = SettingsFile {
            workspace: Some(PathBuf::from("/file/ws")),
            colmap_bin: Some("colmap-cpu".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&cli, &file).expect("resolve");
        assert_eq!(config.workspace, PathBuf::from("/flag/ws"));
        assert_eq!(config.colmap_bin, "colmap-cpu");
    }

    #[test]
    fn defaults_fill_everything_but_the_workspace() {
        let cli = Cli::parse_from(["scanrunner", "--workspace", "/ws", "status"]);
        let config = resolve_config(&cli, &SettingsFile::default()).expect("resolve");

        assert_eq!(config.colmap_bin, "colmap");
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.settle_delay_secs, 1);
        assert_eq!(config.min_fused_bytes, 1000);
        assert_eq!(config.max_image_size, 2000);
    }

    #[test]
    fn missing_workspace_is_an_error() {
        let cli = Cli::parse_from(["scanrunner", "status"]);
        let err = resolve_config(&cli, &SettingsFile::default()).expect_err("no workspace");
        assert!(err.to_string().contains("no workspace configured"));
    }

    #[test]
    fn settings_file_sections_parse() {
        let file: SettingsFile = toml::from_str(
            r#"
workspace = "/mnt/nfs_share/myApps"

[watch]
poll_interval_secs = 5

[dense]
min_fused_bytes = 2048
"#,
        )
        .expect("parse settings");

        assert_eq!(file.workspace, Some(PathBuf::from("/mnt/nfs_share/myApps")));
        assert_eq!(file.watch.poll_interval_secs, 5);
        assert_eq!(file.watch.settle_delay_secs, 1);
        assert_eq!(file.dense.min_fused_bytes, 2048);
        assert_eq!(file.dense.max_image_size, 2000);
    }
}
