//! verstamp-core - git-derived build versions
//!
//! Computes a four-part build version (`MAJOR.MINOR.PATCH.COMMIT8`) from the
//! state of the nearest enclosing git repository and writes it, together with
//! the build date and full commit hash, to a `version.json` artifact.
//!
//! # Fallback policy
//!
//! Nothing in the resolution pipeline aborts the build:
//!
//! - a missing or failing `git` yields the commit `"unknown"`
//! - an untagged commit (or any tag lookup failure) yields the default base version
//! - a malformed base version yields `0.1.0`
//!
//! Only writing the artifact can fail, see [`stamp::generate`].
//!
//! ```text
//! tag "v1.4.2" + commit 0123456789ab...  ->  1.4.2.01234567
//! no tag       + no git                  ->  0.1.0.b8efa1cf
//! ```

pub mod error;
pub mod git;
pub mod record;
pub mod stamp;
pub mod version;

pub use error::{GitError, StampError};
pub use git::{GitProbe, find_repo_root};
pub use record::VersionRecord;
pub use stamp::{StampConfig, build_record, generate};
pub use version::{
    DEFAULT_BASE_VERSION, FALLBACK_COMMIT, UNKNOWN_COMMIT, base_version_from_tag,
    normalize_version, short_commit,
};

/// File name of the generated artifact, placed in the project root by default.
pub const OUTPUT_FILE_NAME: &str = "version.json";
