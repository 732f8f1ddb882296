//! Git probing.
//!
//! Every query runs `git` in the enclosing repository with a hard time
//! bound. Failures are logged and turned into fallback values here, so
//! callers only ever see plain strings.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::error::GitError;
use crate::version::UNKNOWN_COMMIT;

/// Default bound on a single git invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Find the directory git should run in for `start`.
///
/// Walks from `start` (made absolute) towards the filesystem root and returns
/// the first directory containing a `.git` entry. A `.git` file counts, so
/// worktrees and submodules are found too. If no ancestor qualifies, the
/// filesystem root is returned.
pub fn find_repo_root(start: &Path) -> PathBuf {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
    let mut current = start.as_path();
    loop {
        if current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return current.to_path_buf(),
        }
    }
}

/// Runs git commands with a time bound.
#[derive(Debug, Clone)]
pub struct GitProbe {
    program: OsString,
    timeout: Duration,
}

impl Default for GitProbe {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitProbe {
    /// Probe using `program` (a name looked up on `PATH`, or a path) and the
    /// default 5 second bound.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the time bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured time bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `git <args>` in `dir` and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotFound`] if the program is not on `PATH`,
    /// [`GitError::Spawn`] if it cannot be started or waited on,
    /// [`GitError::Timeout`] if it outlives the bound (it is killed), and
    /// [`GitError::Failed`] on a non-zero exit.
    pub fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let program_name = self.program.to_string_lossy().into_owned();
        let program = which::which(&self.program).map_err(|source| GitError::NotFound {
            program: program_name.clone(),
            source,
        })?;
        let spawn_err = |source: std::io::Error| GitError::Spawn {
            program: program_name.clone(),
            source,
        };

        let mut child = Command::new(&program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Drain both pipes while waiting; a child that fills one would block forever.
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let Some(status) = child.wait_timeout(self.timeout).map_err(spawn_err)? else {
            // Reap, or the child lingers as a zombie. Readers are left to
            // finish on their own once every holder of the pipes exits.
            let _ = child.kill();
            let _ = child.wait();
            return Err(GitError::Timeout {
                program: program_name,
                args: args.join(" "),
                timeout: self.timeout,
            });
        };

        let stdout = join_reader(stdout_reader).map_err(spawn_err)?;
        // Diagnostics only; undecodable stderr is not worth failing over.
        let stderr = join_reader(stderr_reader).unwrap_or_default();

        if !status.success() {
            return Err(GitError::Failed {
                program: program_name,
                args: args.join(" "),
                code: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout.trim().to_string())
    }

    /// Full hash of `HEAD` in the repository enclosing `start`, or
    /// [`UNKNOWN_COMMIT`] if git cannot tell.
    pub fn resolve_commit(&self, start: &Path) -> String {
        let dir = find_repo_root(start);
        match self.run(&dir, &["rev-parse", "HEAD"]) {
            Ok(commit) if !commit.is_empty() => commit,
            Ok(_) => {
                tracing::warn!("git rev-parse HEAD printed nothing in {}", dir.display());
                UNKNOWN_COMMIT.to_string()
            }
            Err(e) => {
                tracing::warn!("Failed to resolve git commit: {e}");
                UNKNOWN_COMMIT.to_string()
            }
        }
    }

    /// Tag pointing exactly at `HEAD` in the repository enclosing `start`,
    /// or an empty string if there is none or git cannot tell.
    pub fn resolve_tag(&self, start: &Path) -> String {
        let dir = find_repo_root(start);
        match self.run(&dir, &["describe", "--tags", "--exact-match"]) {
            Ok(tag) => tag,
            // Untagged commits exit non-zero; that is the common case.
            Err(e @ GitError::Failed { .. }) => {
                tracing::debug!("No exact tag: {e}");
                String::new()
            }
            Err(e) => {
                tracing::warn!("Failed to resolve git tag: {e}");
                String::new()
            }
        }
    }
}

fn spawn_reader(mut pipe: impl Read + Send + 'static) -> JoinHandle<std::io::Result<String>> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        pipe.read_to_string(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(reader: Option<JoinHandle<std::io::Result<String>>>) -> std::io::Result<String> {
    match reader {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("pipe reader panicked"))),
        None => Ok(String::new()),
    }
}
