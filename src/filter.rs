use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::git::Git;
use crate::options::ActiveFilesOptions;
use crate::types::StatusMap;

/// Extension of the file name as raw bytes, leading dot included. Empty when
/// the file name has no dot; `.gitignore` is its own extension.
#[must_use]
pub fn extension_of(path: &Path) -> &[u8] {
    let Some(file_name) = path.file_name() else {
        return &[];
    };
    let bytes = file_name.as_encoded_bytes();
    bytes
        .iter()
        .rposition(|&b| b == b'.')
        .map_or(&[][..], |idx| &bytes[idx..])
}

/// Queries the working tree status and returns the active files.
///
/// # Errors
///
/// Returns [`Error::StatusQuery`] if the status cannot be read, or any error
/// from [`filter_active_files`].
#[instrument(skip(git))]
pub fn get_active_files(git: &impl Git, options: &ActiveFilesOptions<'_>) -> Result<Vec<PathBuf>> {
    let status = git.status().map_err(|e| Error::StatusQuery {
        source: Box::new(e),
    })?;
    filter_active_files(&status, options)
}

/// Collects the paths of `status` that pass every filter of `options`.
///
/// The path action only runs when a root is set; without one, paths are
/// returned relative and no file is touched.
///
/// # Errors
///
/// Returns [`Error::PathAction`] as soon as the path action fails. Paths
/// collected so far are dropped.
#[instrument(skip(status), fields(entries = status.len()))]
pub fn filter_active_files(
    status: &StatusMap,
    options: &ActiveFilesOptions<'_>,
) -> Result<Vec<PathBuf>> {
    let mut active_files = Vec::with_capacity(status.len());

    for (sub_path, file_status) in status {
        let staged_deletion = file_status.is_staged_deletion();
        if staged_deletion && !options.include_deleted {
            debug!(path = %sub_path.display(), "Skipping staged deletion");
            continue;
        }

        let extension = extension_of(sub_path);
        if let Some(wanted) = options.file_extension.as_deref() {
            if extension != wanted.as_bytes() {
                continue;
            }
        }
        if options.no_extension && !extension.is_empty() {
            continue;
        }

        let resolved = match options.root.as_deref() {
            Some(root) => root.join(sub_path),
            None => sub_path.clone(),
        };

        if let Some(matches) = options.match_path.as_ref() {
            if !matches(&resolved) {
                debug!(path = %resolved.display(), "Path rejected by predicate");
                continue;
            }
        }

        if options.root.is_some() && !staged_deletion {
            run_path_action(&resolved, options)?;
        }

        active_files.push(resolved);
    }

    debug!(active_files = active_files.len(), "Active files collected");
    Ok(active_files)
}

fn run_path_action(path: &Path, options: &ActiveFilesOptions<'_>) -> Result<()> {
    let Some(action) = options.on_each_path.as_ref() else {
        return Ok(());
    };
    if !path.is_file() {
        debug!(path = %path.display(), "Not a regular file, skipping path action");
        return Ok(());
    }
    action.run(path).map_err(|source| Error::PathAction {
        path: path.to_path_buf(),
        source,
    })
}
