//! Version normalization.
//!
//! A base version is a dotted `major.minor.patch` triple taken from a tag or
//! a default; the build version appends the first eight characters of the
//! commit hash as a fourth component.

use std::num::ParseIntError;

/// Base version used when the current commit carries no tag.
pub const DEFAULT_BASE_VERSION: &str = "0.1.0";

/// Commit substituted into the version when the real one is unavailable.
pub const FALLBACK_COMMIT: &str = "b8efa1cf6cc30f9618a3f1de10687fdd0c9346be";

/// Commit value recorded when git could not be queried.
pub const UNKNOWN_COMMIT: &str = "unknown";

/// Length of the commit suffix in the build version.
const SHORT_COMMIT_LEN: usize = 8;

/// Derive the base version from a tag by dropping a single leading `v`.
///
/// Returns `None` for an empty tag so the caller can pick its default.
///
/// ```
/// use verstamp_core::base_version_from_tag;
///
/// assert_eq!(base_version_from_tag("v1.4.2"), Some("1.4.2"));
/// assert_eq!(base_version_from_tag("1.4.2"), Some("1.4.2"));
/// assert_eq!(base_version_from_tag(""), None);
/// ```
pub fn base_version_from_tag(tag: &str) -> Option<&str> {
    if tag.is_empty() {
        return None;
    }
    Some(tag.strip_prefix('v').unwrap_or(tag))
}

/// First eight characters of `commit`, or of [`FALLBACK_COMMIT`] when the
/// commit is empty or [`UNKNOWN_COMMIT`]. Shorter hashes are kept as-is.
pub fn short_commit(commit: &str) -> String {
    let commit = if commit.is_empty() || commit == UNKNOWN_COMMIT {
        FALLBACK_COMMIT
    } else {
        commit
    };
    commit.chars().take(SHORT_COMMIT_LEN).collect()
}

/// Build the four-part version `major.minor.patch.commit8`.
///
/// Missing or non-numeric components of `base_version` become `0`. If a
/// numeric component overflows, the whole base falls back to `0.1.0`.
///
/// ```
/// use verstamp_core::normalize_version;
///
/// assert_eq!(normalize_version("1.x.3", "abcdef1234567890"), "1.0.3.abcdef12");
/// assert_eq!(normalize_version("2.0.0", "unknown"), "2.0.0.b8efa1cf");
/// ```
pub fn normalize_version(base_version: &str, commit: &str) -> String {
    let short = short_commit(commit);
    match parse_triple(base_version) {
        Ok((major, minor, patch)) => {
            let version = format!("{major}.{minor}.{patch}.{short}");
            tracing::debug!("Normalized {base_version:?} -> {version}");
            version
        }
        Err(e) => {
            tracing::warn!("Failed to parse base version {base_version:?}: {e}");
            format!("{DEFAULT_BASE_VERSION}.{short}")
        }
    }
}

fn parse_triple(base: &str) -> Result<(u64, u64, u64), ParseIntError> {
    let mut parts = base.split('.');
    let mut next = || parse_component(parts.next());
    Ok((next()?, next()?, next()?))
}

fn parse_component(part: Option<&str>) -> Result<u64, ParseIntError> {
    match part {
        Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => p.parse(),
        _ => Ok(0),
    }
}
