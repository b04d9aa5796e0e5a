use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Change kind of a path in one of the two status columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    Untracked,
    UpdatedButUnmerged,
}

impl StatusCode {
    /// Parses a porcelain status column character.
    ///
    /// # Errors
    ///
    /// Returns an error for characters git does not emit in status columns.
    pub fn from_porcelain(code: char) -> Result<Self> {
        match code {
            ' ' => Ok(Self::Unmodified),
            // type changes are reported as plain modifications
            'M' | 'T' => Ok(Self::Modified),
            'A' => Ok(Self::Added),
            'D' => Ok(Self::Deleted),
            'R' => Ok(Self::Renamed),
            'C' => Ok(Self::Copied),
            '?' => Ok(Self::Untracked),
            'U' => Ok(Self::UpdatedButUnmerged),
            other => Err(Error::StatusParseError(format!(
                "unknown status code '{other}'"
            ))),
        }
    }
}

/// Status record of a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    /// Status in the index.
    pub staging: StatusCode,
    /// Status in the working tree.
    pub worktree: StatusCode,
    /// Original path of a rename or copy.
    pub extra: Option<PathBuf>,
}

impl FileStatus {
    #[must_use]
    pub const fn new(staging: StatusCode, worktree: StatusCode) -> Self {
        Self {
            staging,
            worktree,
            extra: None,
        }
    }

    #[must_use]
    pub fn is_staged_deletion(&self) -> bool {
        self.staging == StatusCode::Deleted
    }
}

/// Working tree status keyed by repository-relative path. Paths are kept as
/// git reports them, so names that are not valid UTF-8 survive.
pub type StatusMap = HashMap<PathBuf, FileStatus>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!(
            StatusCode::from_porcelain(' ').unwrap(),
            StatusCode::Unmodified
        );
        assert_eq!(StatusCode::from_porcelain('T').unwrap(), StatusCode::Modified);
        assert_eq!(StatusCode::from_porcelain('?').unwrap(), StatusCode::Untracked);
        assert_eq!(
            StatusCode::from_porcelain('U').unwrap(),
            StatusCode::UpdatedButUnmerged
        );
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(matches!(
            StatusCode::from_porcelain('X'),
            Err(Error::StatusParseError(_))
        ));
    }

    #[test]
    fn serializes_snake_case() {
        let status = FileStatus::new(StatusCode::Deleted, StatusCode::Unmodified);
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(
            json,
            r#"{"staging":"deleted","worktree":"unmodified","extra":null}"#
        );
    }
}
