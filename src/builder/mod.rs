//! Build orchestration: the make adapter and per-architecture recipes.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub mod make;
pub mod recipe;

pub use make::{BuildTool, Make};
pub use recipe::Recipe;

/// Errors from driving the external build tool.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build tool is not installed or not on PATH.
    #[error("`{tool}` not found on PATH")]
    ToolNotFound { tool: String },

    /// The subprocess could not be started or its output could not be
    /// logged.
    #[error("failed to run `{command}`")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The build tool ran but returned a non-zero exit status.
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },

    /// The busybox source checkout is missing.
    #[error("busybox checkout not found at `{0}`")]
    MissingSource(PathBuf),

    /// The requested architecture has no recipe.
    #[error("unknown architecture `{requested}` (supported: {supported})")]
    UnknownArch { requested: String, supported: String },
}
