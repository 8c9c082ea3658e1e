use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scanrunner", version, about = "Turntable scan reconstruction runner")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Workspace directory shared with the scanner"
    )]
    pub workspace: Option<PathBuf>,
    #[arg(long, global = true, help = "Toolchain executable name or path")]
    pub colmap_bin: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Watch {
        #[arg(long, default_value_t = false, help = "Exit after the first processed scan")]
        once: bool,
        #[arg(long, help = "Seconds between sentinel polls")]
        poll_interval: Option<u64>,
        #[arg(long, help = "Seconds to let producer writes settle before processing")]
        settle_delay: Option<u64>,
    },
    Sparse,
    Dense,
    Status,
    RequestScan,
}
