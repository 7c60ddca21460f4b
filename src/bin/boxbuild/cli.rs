//! CLI definitions using clap.

use clap::Parser;

/// Boxbuild - builds busybox and installs it into the initrd staging tree
#[derive(Parser)]
#[command(name = "boxbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Busybox's target architecture
    pub arch: String,

    /// Number of parallel build jobs
    #[arg(short, long, default_value_t = 2)]
    pub jobs: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
