//! Per-architecture build recipes.
//!
//! A recipe is a configuration record, not a type per architecture:
//! the architecture tag and cross-toolchain prefix handed to make,
//! keyed by the name the CLI accepts. Adding an architecture is adding
//! a table entry.

use tracing::info;

use crate::builder::make::BuildTool;
use crate::builder::BuildError;
use crate::util::context::GlobalContext;

/// A named build recipe: which `ARCH=`/`CROSS_COMPILE=` overrides to
/// pass, if any. Native builds pass none and let make use host
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    name: &'static str,
    arch: Option<&'static str>,
    cross_compile: Option<&'static str>,
}

/// Every architecture the driver knows how to build.
const RECIPES: &[Recipe] = &[
    Recipe {
        name: "x86_64",
        arch: None,
        cross_compile: None,
    },
    Recipe {
        name: "arm",
        arch: Some("arm"),
        cross_compile: Some("arm-linux-gnueabi-"),
    },
];

impl Recipe {
    /// Look up the recipe for an architecture name.
    pub fn find(name: &str) -> Result<&'static Recipe, BuildError> {
        RECIPES
            .iter()
            .find(|recipe| recipe.name == name)
            .ok_or_else(|| BuildError::UnknownArch {
                requested: name.to_string(),
                supported: Recipe::supported().join(", "),
            })
    }

    /// Names of all supported architectures, in table order.
    pub fn supported() -> Vec<&'static str> {
        RECIPES.iter().map(|recipe| recipe.name).collect()
    }

    /// The architecture name this recipe is registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Compile busybox in its checkout, then install it into the
    /// initrd staging tree. Stops at the first failure.
    pub fn run(
        &self,
        tool: &dyn BuildTool,
        ctx: &GlobalContext,
        jobs: usize,
    ) -> Result<(), BuildError> {
        let source = ctx.busybox_dir();
        if !source.is_dir() {
            return Err(BuildError::MissingSource(source));
        }

        info!(arch = self.name, jobs, "building busybox");
        tool.build(&source, jobs, self.arch, self.cross_compile)?;

        let initrd = ctx.initrd_dir();
        info!(arch = self.name, dest = %initrd.display(), "installing busybox");
        tool.install(&source, &initrd, self.arch, self.cross_compile)?;

        Ok(())
    }
}
