//! Global context for boxbuild operations.
//!
//! Provides centralized access to the paths a build works with. All of
//! them derive from the working directory at process start and stay
//! fixed for the process lifetime.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory layout of a checkout the driver runs from:
///
/// - `deps/busybox` - the busybox source checkout (consumed)
/// - `initrd` - staging tree the install step populates (produced)
/// - `log` - append-only build log (produced)
#[derive(Debug, Clone)]
pub struct GlobalContext {
    base: PathBuf,
}

impl GlobalContext {
    /// Create a context anchored at the current working directory.
    pub fn new() -> Result<Self> {
        let base = env::current_dir().context("failed to determine current directory")?;
        Ok(GlobalContext { base })
    }

    /// Create a context anchored at an explicit base directory.
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        GlobalContext { base: base.into() }
    }

    /// The base directory everything else hangs off.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// The busybox source checkout.
    pub fn busybox_dir(&self) -> PathBuf {
        self.base.join("deps").join("busybox")
    }

    /// Staging directory the installed files land in, later packaged
    /// into an initial ramdisk image.
    pub fn initrd_dir(&self) -> PathBuf {
        self.base.join("initrd")
    }

    /// The build log. Appended to on every invocation, never rotated
    /// or truncated by this tool.
    pub fn log_path(&self) -> PathBuf {
        self.base.join("log")
    }
}
