use crate::error::Result;
use crate::filter;
use crate::git::{Git, GitCli};
use crate::options::ActiveFilesOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Collects active files of a local Git working tree
pub struct ActiveFilesProcessor {
    git: GitCli,
}

impl ActiveFilesProcessor {
    /// Create a processor from a local git repository
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path does not exist.
    #[instrument]
    pub fn new_from_local(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Creating processor from local repository");
        // surfaces a missing path as an IO error instead of a git failure
        let path = path.canonicalize()?;

        Ok(Self {
            git: GitCli::new(path),
        })
    }

    /// Top-level directory of the working tree, usable as the options root.
    ///
    /// # Errors
    ///
    /// When the path is not inside a Git working tree.
    pub fn toplevel(&self) -> Result<PathBuf> {
        self.git.discover_toplevel()
    }

    /// Added and modified files of the working tree, filtered by `options`.
    ///
    /// # Errors
    ///
    /// When the status cannot be queried or the path action fails.
    #[instrument(skip(self))]
    pub fn active_files(&self, options: &ActiveFilesOptions<'_>) -> Result<Vec<PathBuf>> {
        filter::get_active_files(&self.git, options)
    }
}
