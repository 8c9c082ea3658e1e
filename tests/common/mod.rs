use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub workspace: PathBuf,
    colmap: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let workspace = tmp.path().join("workspace");
        fs::create_dir_all(&workspace).expect("create workspace");
        let colmap = write_fake_colmap(tmp.path());

        Self {
            _tmp: tmp,
            home,
            workspace,
            colmap,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("scanrunner").expect("binary under test");
        cmd.env("HOME", &self.home)
            .env("FAKE_COLMAP_LOG", self.call_log())
            .env("FAKE_COLMAP_FAIL", self.fail_list())
            .arg("--workspace")
            .arg(&self.workspace)
            .arg("--colmap-bin")
            .arg(&self.colmap);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_err(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }

    pub fn call_log(&self) -> PathBuf {
        self.workspace.join("colmap_calls.log")
    }

    fn fail_list(&self) -> PathBuf {
        self.workspace.join("colmap_fail.list")
    }

    /// Make the fake toolchain fail the given subcommand with exit code 3.
    pub fn fail_subcommand(&self, subcommand: &str) {
        let mut listed = fs::read_to_string(self.fail_list()).unwrap_or_default();
        listed.push_str(subcommand);
        listed.push('\n');
        fs::write(self.fail_list(), listed).expect("write fail list");
    }

    pub fn logged_subcommands(&self) -> Vec<String> {
        fs::read_to_string(self.call_log())
            .unwrap_or_default()
            .lines()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string))
            .collect()
    }

    pub fn drop_sentinel(&self) {
        fs::write(self.workspace.join("done.txt"), b"done\n").expect("drop sentinel");
    }

    pub fn seed_fused(&self, bytes: usize) {
        let dense = self.workspace.join("dense");
        fs::create_dir_all(&dense).expect("create dense dir");
        fs::write(dense.join("fused.ply"), vec![0u8; bytes]).expect("seed fused cloud");
    }
}

/// A stand-in toolchain binary: records every invocation, honours scripted
/// failures, and fabricates a fused point cloud so later stages have bytes
/// to inspect. Pre-seeded fused clouds are left untouched.
fn write_fake_colmap(base: &Path) -> PathBuf {
    let bin = base.join("bin");
    fs::create_dir_all(&bin).expect("create fake bin dir");
    let path = bin.join("colmap");
    let script = r#"#!/bin/sh
sub="$1"
printf '%s\n' "$*" >> "${FAKE_COLMAP_LOG:?}"
if [ -f "${FAKE_COLMAP_FAIL}" ] && grep -qx "$sub" "${FAKE_COLMAP_FAIL}"; then
    exit 3
fi
if [ "$sub" = "stereo_fusion" ]; then
    out=""
    while [ $# -gt 0 ]; do
        if [ "$1" = "--output_path" ]; then
            out="$2"
        fi
        shift
    done
    if [ -n "$out" ] && [ ! -e "$out" ]; then
        head -c 4096 /dev/zero > "$out"
    fi
fi
exit 0
"#;
    fs::write(&path, script).expect("write fake colmap");
    let mut perms = fs::metadata(&path).expect("fake colmap metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("mark fake colmap executable");
    path
}
