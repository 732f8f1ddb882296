//! Version resolution pipeline.
//!
//! `timestamp -> commit -> tag -> base version -> normalized version -> record`,
//! executed once per invocation with no retries.

use std::path::PathBuf;

use chrono::Local;

use crate::OUTPUT_FILE_NAME;
use crate::error::StampError;
use crate::git::GitProbe;
use crate::record::VersionRecord;
use crate::version::{DEFAULT_BASE_VERSION, base_version_from_tag, normalize_version};

/// Inputs to one resolution run.
#[derive(Debug, Clone)]
pub struct StampConfig {
    /// Directory the repository search starts from.
    pub root: PathBuf,
    /// Where the artifact is written.
    pub output: PathBuf,
    /// How git is invoked.
    pub git: GitProbe,
    /// Base version used when `HEAD` carries no tag.
    pub default_version: String,
}

impl StampConfig {
    /// Defaults for `root`: artifact at `root/version.json`, `git` from
    /// `PATH` with a 5 second bound, base version `0.1.0`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output: root.join(OUTPUT_FILE_NAME),
            root,
            git: GitProbe::default(),
            default_version: DEFAULT_BASE_VERSION.to_string(),
        }
    }
}

/// Resolve the version record for `config.root` without writing it.
///
/// Never fails: git problems degrade to the fallback values.
pub fn build_record(config: &StampConfig) -> VersionRecord {
    let build_date = VersionRecord::format_build_date(&Local::now());
    tracing::info!("Build date: {build_date}");

    let git_commit = config.git.resolve_commit(&config.root);
    tracing::info!("Git commit: {git_commit}");

    let tag = config.git.resolve_tag(&config.root);
    tracing::info!("Git tag: {tag}");

    let base = base_version_from_tag(&tag).unwrap_or(&config.default_version);
    tracing::info!("Base version: {base}");

    let version = normalize_version(base, &git_commit);
    tracing::info!("Version: {version}");

    VersionRecord {
        version,
        build_date,
        git_commit,
    }
}

/// Resolve the version record and write it to `config.output`.
///
/// # Errors
///
/// Returns a [`StampError`] if the artifact cannot be written; the file may
/// then be missing or partially written.
pub fn generate(config: &StampConfig) -> Result<VersionRecord, StampError> {
    let record = build_record(config);
    record.write_to(&config.output)?;
    tracing::info!("Version info written to {}", config.output.display());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{FALLBACK_COMMIT, UNKNOWN_COMMIT};
    use tempfile::TempDir;

    fn without_git(root: &std::path::Path) -> StampConfig {
        StampConfig {
            git: GitProbe::new("verstamp-no-such-git-binary"),
            ..StampConfig::new(root)
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = StampConfig::new("/srv/project");
        assert_eq!(config.output, PathBuf::from("/srv/project/version.json"));
        assert_eq!(config.default_version, "0.1.0");
        assert_eq!(config.git.timeout(), std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_generate_without_git() {
        let tmp = TempDir::new().unwrap();
        let config = without_git(tmp.path());

        let record = generate(&config).unwrap();

        assert_eq!(record.git_commit, UNKNOWN_COMMIT);
        assert_eq!(record.version, format!("0.1.0.{}", &FALLBACK_COMMIT[..8]));
        assert_eq!(VersionRecord::load_from(&config.output).unwrap(), record);
    }

    #[test]
    fn test_default_version_is_configurable() {
        let tmp = TempDir::new().unwrap();
        let config = StampConfig {
            default_version: "3.1".to_string(),
            ..without_git(tmp.path())
        };
        assert_eq!(build_record(&config).version, "3.1.0.b8efa1cf");
    }

    #[test]
    fn test_build_date_shape() {
        let tmp = TempDir::new().unwrap();
        let record = build_record(&without_git(tmp.path()));
        let date = record.build_date.as_bytes();
        assert_eq!(date.len(), 19);
        assert_eq!(
            (date[4], date[7], date[10], date[13], date[16]),
            (b'-', b'-', b' ', b':', b':')
        );
    }

    #[test]
    fn test_generate_reports_write_failure() {
        let tmp = TempDir::new().unwrap();
        let config = StampConfig {
            output: tmp.path().join("missing").join("version.json"),
            ..without_git(tmp.path())
        };
        assert!(matches!(generate(&config), Err(StampError::Io { .. })));
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        const COMMIT: &str = "0123456789abcdef0123456789abcdef01234567";

        fn tagged_git(dir: &std::path::Path, tag: Option<&str>) -> PathBuf {
            let describe = match tag {
                Some(tag) => format!("echo {tag}"),
                None => "echo 'fatal: no tag exactly matches' >&2; exit 128".to_string(),
            };
            let script = format!(
                "#!/bin/sh\ncase \"$1\" in\n  rev-parse) echo {COMMIT} ;;\n  describe) {describe} ;;\n  *) exit 1 ;;\nesac\n"
            );
            let path = dir.join("fake-git");
            std::fs::write(&path, script).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn config(dir: &std::path::Path, tag: Option<&str>) -> StampConfig {
            StampConfig {
                git: GitProbe::new(tagged_git(dir, tag)),
                ..StampConfig::new(dir)
            }
        }

        #[test]
        fn test_tag_with_v_prefix() {
            let tmp = TempDir::new().unwrap();
            let record = build_record(&config(tmp.path(), Some("v1.4.2")));
            assert_eq!(record.version, "1.4.2.01234567");
            assert_eq!(record.git_commit, COMMIT);
        }

        #[test]
        fn test_tag_without_prefix() {
            let tmp = TempDir::new().unwrap();
            let record = build_record(&config(tmp.path(), Some("1.4.2")));
            assert_eq!(record.version, "1.4.2.01234567");
        }

        #[test]
        fn test_untagged_uses_default_base() {
            let tmp = TempDir::new().unwrap();
            let record = build_record(&config(tmp.path(), None));
            assert_eq!(record.version, "0.1.0.01234567");
            assert_eq!(record.git_commit, COMMIT);
        }

        #[test]
        fn test_repeat_runs_agree() {
            let tmp = TempDir::new().unwrap();
            let cfg = config(tmp.path(), Some("v2.0"));
            let first = generate(&cfg).unwrap();
            let second = generate(&cfg).unwrap();
            assert_eq!(first.version, second.version);
            assert_eq!(first.git_commit, second.git_commit);
            assert_eq!(VersionRecord::load_from(&cfg.output).unwrap(), second);
        }
    }
}
