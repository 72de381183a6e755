use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by the discovery core.
///
/// [`ScanError::ManifestParse`] is recovered inside [`crate::manifest`] and
/// never reaches the caller.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not find {tool} binary (tried: {})", .candidates.join(", "))]
    BinaryNotFound {
        tool: String,
        candidates: Vec<String>,
    },

    #[error("running `{command}` in `{}` failed with {}: {stderr}", .dir.display(), exit_label(.status))]
    CommandFailed {
        command: String,
        dir: PathBuf,
        status: Option<i32>,
        stderr: String,
    },

    #[error("could not start `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` in `{}` did not finish within {}s", .dir.display(), .timeout.as_secs())]
    CommandTimedOut {
        command: String,
        dir: PathBuf,
        timeout: Duration,
    },

    #[error("inconsistent dependency tree at line `{line}`: {reason}")]
    ParseInconsistency { line: String, reason: String },

    #[error("could not search for manifests with `{pattern}`: {reason}")]
    ManifestSearch { pattern: String, reason: String },

    #[error("could not parse manifest `{}`", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("I/O error on `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} adapter used before initialize()")]
    NotInitialized { tool: String },

    #[error("invalid dependency tree pattern")]
    TreePattern(#[from] regex::Error),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}
