//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

/// Builder for subprocess execution.
///
/// The working directory is always an explicit parameter of the
/// invocation; the builder never mutates the driver's own cwd.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command, teeing its combined stdout/stderr into the
    /// log file (opened in append mode) while still echoing it to the
    /// controlling terminal. Blocks until the child exits.
    pub fn exec_streamed(&self, log_path: &Path) -> io::Result<ExitStatus> {
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        let log = Arc::new(Mutex::new(log));

        let mut cmd = self.build_command();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        let out_thread = child.stdout.take().map(|pipe| {
            let log = Arc::clone(&log);
            thread::spawn(move || tee(pipe, io::stdout(), &log))
        });
        let err_thread = child.stderr.take().map(|pipe| {
            let log = Arc::clone(&log);
            thread::spawn(move || tee(pipe, io::stderr(), &log))
        });

        let status = child.wait()?;

        if let Some(handle) = out_thread {
            let _ = handle.join();
        }
        if let Some(handle) = err_thread {
            let _ = handle.join();
        }

        Ok(status)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Copy everything from `from` to both `to` and the shared log file.
/// Write failures on either sink are ignored; the child's exit status
/// is the signal that matters.
fn tee(mut from: impl Read, mut to: impl Write, log: &Mutex<File>) {
    let mut buf = [0u8; 8192];
    loop {
        match from.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let _ = to.write_all(&buf[..n]);
                let _ = to.flush();
                if let Ok(mut log) = log.lock() {
                    let _ = log.write_all(&buf[..n]);
                }
            }
        }
    }
}
