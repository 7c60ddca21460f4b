//! CLI integration tests for boxbuild.
//!
//! Each test lays out a scratch checkout (`deps/busybox`, empty
//! `initrd`) and puts a fake `make` first on PATH that records its
//! working directory and arguments instead of building anything.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Scratch checkout plus the paths the fake make reports into.
struct Fixture {
    base: TempDir,
    calls: PathBuf,
}

impl Fixture {
    /// Create the checkout layout and a fake `make` exiting with
    /// `exit_code`.
    fn new(exit_code: i32) -> Self {
        let base = TempDir::new().unwrap();
        fs::create_dir_all(base.path().join("deps/busybox")).unwrap();

        let bin = base.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let calls = base.path().join("calls.txt");

        let script = format!(
            "#!/bin/sh\n\
             {{ echo \"cwd=$(pwd)\"; echo \"args=$*\"; }} >> \"{calls}\"\n\
             echo \"make: $*\"\n\
             exit {exit_code}\n",
            calls = calls.display(),
        );
        let make = bin.join("make");
        fs::write(&make, script).unwrap();
        let mut perms = fs::metadata(&make).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&make, perms).unwrap();

        Fixture { base, calls }
    }

    fn path(&self) -> &Path {
        self.base.path()
    }

    /// A boxbuild command running in the checkout with the fake make
    /// first on PATH.
    fn boxbuild(&self) -> Command {
        let path = format!(
            "{}:{}",
            self.path().join("bin").display(),
            std::env::var("PATH").unwrap()
        );
        let mut cmd = Command::cargo_bin("boxbuild").unwrap();
        cmd.current_dir(self.path()).env("PATH", path);
        cmd
    }

    /// What the fake make recorded, one `cwd=`/`args=` pair per call.
    fn calls(&self) -> String {
        fs::read_to_string(&self.calls).unwrap()
    }
}

// ============================================================================
// Native build (x86_64)
// ============================================================================

#[test]
fn test_x86_64_builds_then_installs_without_overrides() {
    let fx = Fixture::new(0);

    fx.boxbuild().arg("x86_64").assert().success();

    let calls = fx.calls();
    let lines: Vec<&str> = calls.lines().collect();
    assert_eq!(lines.len(), 4, "expected two make invocations: {calls}");

    // Both invocations run inside the busybox checkout.
    assert!(lines[0].ends_with("deps/busybox"));
    assert!(lines[2].ends_with("deps/busybox"));

    // Compile: parallelism only, no cross overrides.
    assert_eq!(lines[1], "args=-j2");

    // Install: staging prefix, then the install target.
    let initrd = fx.path().join("initrd");
    assert_eq!(
        lines[3],
        format!("args=CONFIG_PREFIX={} install", initrd.display())
    );
}

#[test]
fn test_jobs_flag_overrides_default_parallelism() {
    let fx = Fixture::new(0);

    fx.boxbuild().args(["x86_64", "--jobs", "8"]).assert().success();

    assert!(fx.calls().contains("args=-j8"));
}

// ============================================================================
// Cross build (arm)
// ============================================================================

#[test]
fn test_arm_passes_arch_and_cross_compile_to_both_steps() {
    let fx = Fixture::new(0);

    fx.boxbuild().arg("arm").assert().success();

    let calls = fx.calls();
    let args: Vec<&str> = calls
        .lines()
        .filter(|l| l.starts_with("args="))
        .collect();
    assert_eq!(args.len(), 2);

    for invocation in &args {
        assert!(invocation.contains("ARCH=arm"), "missing ARCH: {invocation}");
        assert!(
            invocation.contains("CROSS_COMPILE=arm-linux-gnueabi-"),
            "missing CROSS_COMPILE: {invocation}"
        );
    }
    assert!(args[1].ends_with("install"));
}

// ============================================================================
// Failure propagation
// ============================================================================

#[test]
fn test_unknown_architecture_fails_without_invoking_make() {
    let fx = Fixture::new(0);

    fx.boxbuild()
        .arg("riscv64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown architecture `riscv64`"))
        .stderr(predicate::str::contains("x86_64"));

    assert!(!fx.path().join("calls.txt").exists());
    assert!(!fx.path().join("log").exists());
}

#[test]
fn test_make_failure_propagates_to_exit_code() {
    let fx = Fixture::new(2);

    fx.boxbuild()
        .arg("x86_64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with"));

    // The failing compile stops the run before install.
    let calls = fx.calls();
    assert_eq!(calls.lines().filter(|l| l.starts_with("args=")).count(), 1);
}

#[test]
fn test_missing_checkout_fails_before_any_subprocess() {
    let fx = Fixture::new(0);
    fs::remove_dir_all(fx.path().join("deps")).unwrap();

    fx.boxbuild()
        .arg("x86_64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("busybox checkout not found"));

    assert!(!fx.path().join("calls.txt").exists());
}

// ============================================================================
// Build log
// ============================================================================

#[test]
fn test_log_is_appended_across_invocations() {
    let fx = Fixture::new(0);

    fx.boxbuild().arg("x86_64").assert().success();

    let log_path = fx.path().join("log");
    let first = fs::metadata(&log_path).unwrap().len();
    assert!(first > 0);
    assert!(fs::read_to_string(&log_path).unwrap().contains("make:"));

    fx.boxbuild().arg("x86_64").assert().success();

    let second = fs::metadata(&log_path).unwrap().len();
    assert!(second > first, "log should grow, not be truncated");
}
