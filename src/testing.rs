//! Fakes shared by unit tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::diagnostics::Diagnostics;
use crate::error::ScanError;
use crate::process::{command_line, CommandOutput, CommandRunner};

/// Canned reply for a command line. `None` output simulates a spawn failure.
struct Reply {
    line: String,
    output: Option<CommandOutput>,
}

/// Answers commands from a script keyed by exact command line and records
/// every invocation. Unscripted commands fail to spawn.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Option<PathBuf>, String)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, line: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply {
            line: line.to_string(),
            output: Some(CommandOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                status: Some(status),
            }),
        });
        self
    }

    pub fn spawn_failure(self, line: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply {
            line: line.to_string(),
            output: None,
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn dirs(&self) -> Vec<Option<PathBuf>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(dir, _)| dir.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<CommandOutput, ScanError> {
        let line = command_line(program, args);
        self.calls
            .lock()
            .unwrap()
            .push((dir.map(Path::to_path_buf), line.clone()));

        let mut replies = self.replies.lock().unwrap();
        let position = replies.iter().position(|r| r.line == line);
        match position.and_then(|i| replies.remove(i)).and_then(|r| r.output) {
            Some(output) => Ok(output),
            None => Err(ScanError::CommandSpawn {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub debugs: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn debug(&self, message: &str) {
        self.debugs.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
