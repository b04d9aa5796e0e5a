use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{FileStatus, StatusCode, StatusMap};

/// Trait defining Git operations required by the library
pub trait Git {
    /// Query the working tree status, keyed by repository-relative path
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be retrieved or parsed
    fn status(&self) -> Result<StatusMap>;

    /// Run a Git command with the given arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the git command cannot be executed
    fn run_git_command(&self, args: &[&str]) -> Result<String>;

    /// Discover the top-level directory of the working tree
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not inside a working tree
    fn discover_toplevel(&self) -> Result<PathBuf> {
        let toplevel = self.run_git_command(&["rev-parse", "--show-toplevel"])?;
        debug!(toplevel = %toplevel, "Working tree toplevel discovered");
        Ok(PathBuf::from(toplevel))
    }
}

/// Implementation of Git operations using the local Git CLI
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    /// Creates a new `GitCli` instance with the given repository path
    #[must_use]
    pub const fn new(repo_path: PathBuf) -> Self {
        Self { repo_path }
    }

    /// Runs git and returns stdout untouched. Porcelain output starts with
    /// significant whitespace and may hold paths that are not UTF-8.
    fn raw_output(&self, args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| Error::GitCommandError(e.to_string()))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            debug!(error = %error, "Git command failed");
            return Err(Error::GitCommandError(error.trim().to_string()));
        }

        Ok(output.stdout)
    }
}

impl Git for GitCli {
    #[instrument(skip(self), fields(repo_path = %self.repo_path.display()))]
    fn status(&self) -> Result<StatusMap> {
        let output = self.raw_output(&[
            "status",
            "--porcelain=v1",
            "-z",
            "--untracked-files=all",
        ])?;
        let status = parse_porcelain_status(&output)?;
        debug!(entries = status.len(), "Working tree status collected");
        Ok(status)
    }

    #[instrument(skip(self), fields(args = ?args, repo_path = %self.repo_path.display()))]
    fn run_git_command(&self, args: &[&str]) -> Result<String> {
        let result = String::from_utf8(self.raw_output(args)?)
            .map(|s| s.trim().to_string())
            .map_err(|e| Error::GitCommandError(e.to_string()))?;

        debug!(
            output_length = result.len(),
            "Git command completed successfully"
        );
        Ok(result)
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

// git for Windows writes paths as UTF-8
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Parses the output of `git status --porcelain=v1 -z`.
///
/// Each record is `XY <path>` terminated by NUL. Renames and copies are
/// followed by one more NUL-terminated field holding the original path.
/// Paths are taken as raw bytes.
///
/// # Errors
///
/// Returns an error on malformed records or unknown status codes.
pub fn parse_porcelain_status(output: &[u8]) -> Result<StatusMap> {
    let mut status = StatusMap::new();
    let mut fields = output.split(|&b| b == 0).filter(|field| !field.is_empty());

    while let Some(record) = fields.next() {
        let [x, y, b' ', path @ ..] = record else {
            return Err(Error::StatusParseError(format!(
                "malformed record '{}'",
                String::from_utf8_lossy(record)
            )));
        };
        if path.is_empty() {
            return Err(Error::StatusParseError(format!(
                "missing path in record '{}'",
                String::from_utf8_lossy(record)
            )));
        }

        let mut file_status = FileStatus::new(
            StatusCode::from_porcelain(char::from(*x))?,
            StatusCode::from_porcelain(char::from(*y))?,
        );
        let is_copy_or_rename = |code: StatusCode| {
            matches!(code, StatusCode::Renamed | StatusCode::Copied)
        };
        if is_copy_or_rename(file_status.staging) || is_copy_or_rename(file_status.worktree) {
            let original = fields.next().ok_or_else(|| {
                Error::StatusParseError(format!(
                    "missing original path for '{}'",
                    String::from_utf8_lossy(path)
                ))
            })?;
            file_status.extra = Some(path_from_bytes(original));
        }

        status.insert(path_from_bytes(path), file_status);
    }

    Ok(status)
}
