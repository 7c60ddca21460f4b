//! Shared utilities

pub mod context;
pub mod process;

pub use context::GlobalContext;
pub use process::ProcessBuilder;
