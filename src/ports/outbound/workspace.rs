use crate::shared::Result;
use std::path::Path;

/// Workspace port for the scratch files and directories a pipeline manages
pub trait Workspace {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents
    fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Removes an intermediate file; a file that is already gone is not an error
    fn remove_file(&self, path: &Path) -> Result<()>;
}

impl<T: Workspace + ?Sized> Workspace for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn ensure_directory(&self, path: &Path) -> Result<()> {
        (**self).ensure_directory(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        (**self).remove_file(path)
    }
}
