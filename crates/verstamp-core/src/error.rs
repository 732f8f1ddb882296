//! Error types for git probing and artifact I/O

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a git invocation produced no usable output.
///
/// These never escape the resolver: they are logged and replaced by a
/// fallback value.
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable could not be located.
    #[error("'{program}' not found on PATH: {source}")]
    NotFound {
        /// Program name that was looked up.
        program: String,
        /// Lookup failure reported by `which`.
        #[source]
        source: which::Error,
    },

    /// The process could not be spawned or waited on.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was executed.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not exit within the allowed time and was killed.
    #[error("{program} {args} timed out after {}s", .timeout.as_secs_f32())]
    Timeout {
        /// Program that was executed.
        program: String,
        /// Space-joined arguments, for diagnostics.
        args: String,
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// The process exited with a non-zero status.
    #[error("{program} {args} exited with {code}: {stderr}")]
    Failed {
        /// Program that was executed.
        program: String,
        /// Space-joined arguments, for diagnostics.
        args: String,
        /// Exit code, or -1 when terminated by a signal.
        code: i32,
        /// Trimmed standard error.
        stderr: String,
    },
}

/// Errors surfaced to the caller of [`crate::stamp::generate`] or
/// [`crate::record::VersionRecord::load_from`].
#[derive(Error, Debug)]
pub enum StampError {
    /// Reading or writing the artifact failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded, or an existing artifact is not valid JSON.
    #[error("Invalid version record: {0}")]
    Json(#[from] serde_json::Error),
}

impl StampError {
    /// Attach the artifact path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
