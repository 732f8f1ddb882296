//! The `version.json` artifact.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::StampError;

/// `strftime` format of [`VersionRecord::build_date`].
pub const BUILD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Version metadata for one build.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Four-part build version, e.g. `1.4.2.0123abcd`.
    pub version: String,
    /// Local generation time, `YYYY-MM-DD HH:MM:SS`.
    pub build_date: String,
    /// Full commit hash, or `"unknown"`.
    pub git_commit: String,
}

impl VersionRecord {
    /// Format a timestamp the way [`Self::build_date`] stores it.
    pub fn format_build_date(at: &DateTime<Local>) -> String {
        at.format(BUILD_DATE_FORMAT).to_string()
    }

    /// Pretty-printed JSON: two-space indent, non-ASCII left as-is, no
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StampError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the record to `path`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Io`] if the file cannot be created or written.
    pub fn write_to(&self, path: &Path) -> Result<(), StampError> {
        let json = self.to_json()?;
        let mut file = std::fs::File::create(path).map_err(|e| StampError::io(path, e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| StampError::io(path, e))
    }

    /// Read a record previously written by [`Self::write_to`].
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Io`] if the file cannot be read and
    /// [`StampError::Json`] if it is not a version record.
    pub fn load_from(path: &Path) -> Result<Self, StampError> {
        let content = std::fs::read_to_string(path).map_err(|e| StampError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// One-line summary, e.g. `v1.4.2.0123abcd (0123abcd...) - 2026-10-19 12:00:00`.
    pub fn display_string(&self) -> String {
        format!("v{} ({}) - {}", self.version, self.git_commit, self.build_date)
    }
}
