//! Adapter over the external make build system.
//!
//! Busybox's makefiles take the target architecture and cross
//! toolchain as command-line variables (`ARCH=`, `CROSS_COMPILE=`) and
//! the install destination as `CONFIG_PREFIX=`. The adapter assembles
//! those invocations and propagates make's exit status; it never
//! retries and never touches the driver's own working directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::builder::BuildError;
use crate::util::process::ProcessBuilder;

/// A tool that can compile and install the component, with optional
/// architecture and cross-toolchain overrides.
///
/// `cwd` is the directory the tool runs in, passed explicitly so that
/// no process-global state is involved.
pub trait BuildTool {
    /// Compile with the given job parallelism.
    fn build(
        &self,
        cwd: &Path,
        jobs: usize,
        arch: Option<&str>,
        cross_compile: Option<&str>,
    ) -> Result<(), BuildError>;

    /// Install the built files under `destination`.
    fn install(
        &self,
        cwd: &Path,
        destination: &Path,
        arch: Option<&str>,
        cross_compile: Option<&str>,
    ) -> Result<(), BuildError>;
}

/// The real make invocation.
pub struct Make {
    program: PathBuf,
    log: PathBuf,
}

impl Make {
    /// Locate `make` on PATH. Fails before anything is spawned if it
    /// is not installed.
    pub fn locate(log: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let program = which::which("make").map_err(|_| BuildError::ToolNotFound {
            tool: "make".to_string(),
        })?;
        Ok(Make {
            program,
            log: log.into(),
        })
    }

    /// Use a specific make binary instead of searching PATH.
    pub fn with_program(program: impl Into<PathBuf>, log: impl Into<PathBuf>) -> Self {
        Make {
            program: program.into(),
            log: log.into(),
        }
    }

    fn run(&self, cmd: ProcessBuilder) -> Result<(), BuildError> {
        debug!("running `{}`", cmd.display_command());
        let status = cmd
            .exec_streamed(&self.log)
            .map_err(|source| BuildError::Io {
                command: cmd.display_command(),
                source,
            })?;
        if !status.success() {
            return Err(BuildError::Failed {
                command: cmd.display_command(),
                status,
            });
        }
        Ok(())
    }
}

impl BuildTool for Make {
    fn build(
        &self,
        cwd: &Path,
        jobs: usize,
        arch: Option<&str>,
        cross_compile: Option<&str>,
    ) -> Result<(), BuildError> {
        let mut cmd = ProcessBuilder::new(&self.program)
            .arg(format!("-j{jobs}"))
            .cwd(cwd);
        if let Some(arch) = arch {
            cmd = cmd.arg(format!("ARCH={arch}"));
        }
        if let Some(prefix) = cross_compile {
            cmd = cmd.arg(format!("CROSS_COMPILE={prefix}"));
        }
        self.run(cmd)
    }

    fn install(
        &self,
        cwd: &Path,
        destination: &Path,
        arch: Option<&str>,
        cross_compile: Option<&str>,
    ) -> Result<(), BuildError> {
        let mut cmd = ProcessBuilder::new(&self.program)
            .arg(format!("CONFIG_PREFIX={}", destination.display()))
            .cwd(cwd);
        if let Some(arch) = arch {
            cmd = cmd.arg(format!("ARCH={arch}"));
        }
        if let Some(prefix) = cross_compile {
            cmd = cmd.arg(format!("CROSS_COMPILE={prefix}"));
        }
        cmd = cmd.arg("install");
        self.run(cmd)
    }
}
