use anyhow::Context;
use std::process::Command;

/// One external command: program plus full argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Exit status of one toolchain invocation. `code` is `None` when the
/// process was terminated by a signal.
#[derive(Debug, Clone, Copy)]
pub struct RunStatus {
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

/// Capability for running external commands, so the pipelines can be
/// exercised without the real toolchain installed.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> anyhow::Result<RunStatus>;
}

/// Spawns the command and blocks until it exits, with inherited stdio so the
/// toolchain's own progress output streams straight through.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> anyhow::Result<RunStatus> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .with_context(|| format!("failed to launch {}", invocation.program))?;
        Ok(RunStatus {
            code: status.code(),
        })
    }
}
