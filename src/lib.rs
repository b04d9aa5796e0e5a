pub use error::{BoxError, Error, Result};
pub use filter::{extension_of, filter_active_files, get_active_files};
pub use git::{parse_porcelain_status, Git, GitCli};
pub use options::{ActiveFilesOptions, PathAction};
pub use types::{FileStatus, StatusCode, StatusMap};

use std::path::Path;

mod error;
mod filter;
mod git;
mod options;
pub mod processor;
mod types;

/// Creates a new `ActiveFilesProcessor` for a local repository.
///
/// # Arguments
///
/// * `repo_path`: Any path inside the working tree.
///
/// # Errors
///
/// Returns an error if the repository path does not exist.
pub fn new(repo_path: &Path) -> Result<processor::ActiveFilesProcessor> {
    processor::ActiveFilesProcessor::new_from_local(repo_path)
}
