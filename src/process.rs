//! Blocking execution of external build tools.
//!
//! [`CommandRunner`] is the seam the rest of the crate talks to; [`SystemRunner`]
//! drives real child processes on a private current-thread tokio runtime so a
//! wall-clock timeout can be enforced without spawning watchdog threads.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::Runtime;
use tokio::time::timeout;

use crate::error::ScanError;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs `program args…` in `dir` and captures stdout and stderr separately.
///
/// A non-zero exit is reported through [`CommandOutput::status`], not as `Err`:
/// callers sometimes need the output of a failed run.
pub trait CommandRunner: Send + Sync {
    fn run(&self, dir: Option<&Path>, program: &str, args: &[&str])
        -> Result<CommandOutput, ScanError>;
}

/// Render a command line for logs and error messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct SystemRunner {
    runtime: Runtime,
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// `timeout` of `None` waits for the child indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ScanError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ScanError::Io {
                path: PathBuf::from("<tokio runtime>"),
                source,
            })?;
        Ok(Self { runtime, timeout })
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<CommandOutput, ScanError> {
        let line = command_line(program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let output = self.runtime.block_on(async {
            match self.timeout {
                Some(limit) => match timeout(limit, cmd.output()).await {
                    Ok(result) => Ok(result),
                    Err(_) => Err(ScanError::CommandTimedOut {
                        command: line.clone(),
                        dir: dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
                        timeout: limit,
                    }),
                },
                None => Ok(cmd.output().await),
            }
        })?;

        let output = output.map_err(|source| ScanError::CommandSpawn {
            command: line,
            source,
        })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}
