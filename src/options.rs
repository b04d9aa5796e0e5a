use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::BoxError;

/// Side effect run on each active file that still exists on disk.
///
/// Any closure of the shape `Fn(&Path) -> Result<(), BoxError>` is a
/// `PathAction`.
pub trait PathAction {
    /// Run the action on an absolute file path.
    ///
    /// # Errors
    ///
    /// A failure aborts the whole collection.
    fn run(&self, path: &Path) -> std::result::Result<(), BoxError>;
}

impl<F> PathAction for F
where
    F: Fn(&Path) -> std::result::Result<(), BoxError>,
{
    fn run(&self, path: &Path) -> std::result::Result<(), BoxError> {
        self(path)
    }
}

type MatchPathFn<'a> = Box<dyn Fn(&Path) -> bool + 'a>;

/// Filters applied when collecting active files.
#[derive(Default)]
pub struct ActiveFilesOptions<'a> {
    pub(crate) root: Option<PathBuf>,
    pub(crate) include_deleted: bool,
    pub(crate) file_extension: Option<String>,
    pub(crate) no_extension: bool,
    pub(crate) match_path: Option<MatchPathFn<'a>>,
    pub(crate) on_each_path: Option<Box<dyn PathAction + 'a>>,
}

impl<'a> ActiveFilesOptions<'a> {
    /// Options resolving paths against `root`. An empty root behaves like
    /// [`ActiveFilesOptions::relative`].
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            root: (!root.as_os_str().is_empty()).then_some(root),
            ..Self::default()
        }
    }

    /// Options returning repository-relative paths.
    #[must_use]
    pub fn relative() -> Self {
        Self::default()
    }

    /// Keep staged deletions in the result (excluded by default).
    #[must_use]
    pub const fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }

    /// Only keep paths whose extension is exactly `extension`, dot included
    /// (`.go`, `.txt`). An empty extension disables the filter.
    #[must_use]
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.file_extension = (!extension.is_empty()).then_some(extension);
        self
    }

    /// Only keep paths without an extension.
    #[must_use]
    pub const fn no_extension(mut self, none: bool) -> Self {
        self.no_extension = none;
        self
    }

    /// Only keep resolved paths accepted by `predicate`.
    #[must_use]
    pub fn match_path<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + 'a,
    {
        self.match_path = Some(Box::new(predicate));
        self
    }

    /// Run `action` on every kept file that exists on disk. Only used when a
    /// root is set.
    #[must_use]
    pub fn on_each_path(mut self, action: impl PathAction + 'a) -> Self {
        self.on_each_path = Some(Box::new(action));
        self
    }

    /// Infallible variant of [`ActiveFilesOptions::on_each_path`] that logs
    /// every visited path.
    #[must_use]
    pub fn on_each_file<F>(self, f: F) -> Self
    where
        F: Fn(&Path) + 'a,
    {
        self.on_each_path(move |path: &Path| -> std::result::Result<(), BoxError> {
            info!(path = %path.display(), "run-on-path");
            f(path);
            Ok(())
        })
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl fmt::Debug for ActiveFilesOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveFilesOptions")
            .field("root", &self.root)
            .field("include_deleted", &self.include_deleted)
            .field("file_extension", &self.file_extension)
            .field("no_extension", &self.no_extension)
            .field("match_path", &self.match_path.is_some())
            .field("on_each_path", &self.on_each_path.is_some())
            .finish()
    }
}
