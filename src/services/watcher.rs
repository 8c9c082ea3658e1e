//! Sentinel polling loop: waits for the scanner's completion marker and
//! kicks off sparse reconstruction.
//!
//! Single-threaded: one trigger is fully processed before the next poll.
//! The sentinel is cleared whether the run succeeded or not, so one
//! marker never fires twice and a bad scan is reported once instead of
//! retriggering on every poll; the producer re-signals to retry.

use crate::domain::models::{Config, SparseReport, WatchSummary};
use crate::services::runner::CommandRunner;
use crate::services::sparse::run_sparse;
use crate::services::workspace::WorkspaceLayout;
use std::fs;
use std::time::Duration;

/// Sleep seam so tests can drive the loop without real delays.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocking thread sleep.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub struct Watcher<'a> {
    config: &'a Config,
    ws: WorkspaceLayout,
    runner: &'a mut dyn CommandRunner,
    clock: &'a mut dyn Clock,
}

impl<'a> Watcher<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a mut dyn CommandRunner,
        clock: &'a mut dyn Clock,
    ) -> Self {
        Self {
            config,
            ws: WorkspaceLayout::new(&config.workspace),
            runner,
            clock,
        }
    }

    /// One poll step: process and clear the sentinel if it is present.
    /// Returns the sparse outcome, or `None` when the workspace is idle.
    pub fn poll_once(&mut self) -> anyhow::Result<Option<SparseReport>> {
        if !self.ws.sentinel().exists() {
            return Ok(None);
        }

        tracing::info!(workspace = %self.ws.root().display(), "scan detected");
        // Let the producer's buffered writes reach the share first.
        self.clock
            .sleep(Duration::from_secs(self.config.settle_delay_secs));

        let outcome = run_sparse(self.config, &self.ws, self.runner);
        if let Err(err) = &outcome {
            tracing::error!(error = %err, "sparse reconstruction failed; clearing sentinel");
        }
        if let Err(err) = fs::remove_file(self.ws.sentinel()) {
            tracing::warn!(error = %err, "could not clear sentinel");
        }

        let report = outcome?;
        tracing::info!("ready for next scan");
        Ok(Some(report))
    }

    /// Poll until `max_triggers` sentinel firings have been processed
    /// (`None` polls forever). Errors from a trigger propagate after the
    /// sentinel has been cleared, so a restart will not re-fire it.
    pub fn watch(&mut self, max_triggers: Option<u64>) -> anyhow::Result<WatchSummary> {
        tracing::info!(
            workspace = %self.ws.root().display(),
            interval_secs = self.config.poll_interval_secs,
            "watching for sentinel"
        );
        let mut summary = WatchSummary {
            polls: 0,
            triggers: 0,
        };
        loop {
            summary.polls += 1;
            if self.poll_once()?.is_some() {
                summary.triggers += 1;
            }
            if let Some(max) = max_triggers {
                if summary.triggers >= max {
                    return Ok(summary);
                }
            }
            self.clock
                .sleep(Duration::from_secs(self.config.poll_interval_secs));
        }
    }
}
