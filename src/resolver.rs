use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::error::ScanError;
use crate::models::ToolContext;
use crate::process::{command_line, CommandRunner};

/// Finds the first usable binary among a list of candidates.
///
/// Candidates are probed strictly in order; a probe that fails is logged and
/// skipped, and later candidates are never run once one succeeds.
pub struct BinaryResolver {
    runner: Arc<dyn CommandRunner>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl BinaryResolver {
    pub fn new(runner: Arc<dyn CommandRunner>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            runner,
            diagnostics,
        }
    }

    /// Probe each candidate with `version_args` and return the first that exits
    /// zero with a non-empty version.
    ///
    /// Some tools (`java -version`) print their version to stderr, so an empty
    /// stdout falls back to stderr.
    pub fn which(
        &self,
        tool: &str,
        version_args: &[&str],
        candidates: &[String],
    ) -> Result<ToolContext, ScanError> {
        self.which_with(tool, candidates, |cmd| {
            let output = self.runner.run(None, cmd, version_args)?;
            if !output.success() {
                return Err(ScanError::CommandFailed {
                    command: command_line(cmd, version_args),
                    dir: std::path::PathBuf::from("."),
                    status: output.status,
                    stderr: output.stderr,
                });
            }
            if output.stdout.trim().is_empty() {
                Ok(output.stderr)
            } else {
                Ok(output.stdout)
            }
        })
    }

    /// Same search with an arbitrary version probe.
    pub fn which_with<F>(
        &self,
        tool: &str,
        candidates: &[String],
        probe: F,
    ) -> Result<ToolContext, ScanError>
    where
        F: Fn(&str) -> Result<String, ScanError>,
    {
        let mut attempted = Vec::new();

        for cmd in candidates {
            if cmd.trim().is_empty() {
                continue;
            }
            attempted.push(cmd.clone());

            match probe(cmd) {
                Ok(raw) => match first_line(&raw) {
                    Some(version) => {
                        self.diagnostics
                            .debug(&format!("Resolved {} as `{}` ({})", tool, cmd, version));
                        return Ok(ToolContext {
                            command: cmd.clone(),
                            version,
                        });
                    }
                    None => self.diagnostics.debug(&format!(
                        "Tried resolving `{}` but it reported no version",
                        cmd
                    )),
                },
                Err(e) => self
                    .diagnostics
                    .debug(&format!("Tried resolving `{}` but did not work: {}", cmd, e)),
            }
        }

        Err(ScanError::BinaryNotFound {
            tool: tool.to_string(),
            candidates: attempted,
        })
    }
}

fn first_line(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}
