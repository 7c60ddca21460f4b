//! Boxbuild - a driver around `make` for busybox initrd builds
//!
//! This crate provides the core library functionality for boxbuild:
//! per-architecture build recipes and the adapter that invokes the
//! external make build system to compile busybox and install it into
//! the staging tree later packed into an initial ramdisk image.

pub mod builder;
pub mod util;

pub use builder::make::{BuildTool, Make};
pub use builder::recipe::Recipe;
pub use builder::BuildError;
pub use util::context::GlobalContext;
