use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// LibraryInspector port for examining built binaries and shared libraries
///
/// Implementations wrap the platform's dynamic-linker tooling. Per-file
/// failures yield `None` so one unreadable binary does not abort a scan.
#[async_trait]
pub trait LibraryInspector: Send + Sync {
    /// Lists the regular files directly inside `dir`, sorted by path
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn list_binaries(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Dynamic dependency report of a binary (the output of `ldd`)
    async fn linked_libraries(&self, binary: &Path) -> Option<String>;

    /// The dynamic linker cache listing (the output of `ldconfig -p`)
    ///
    /// # Errors
    /// Returns an error if the listing cannot be produced.
    async fn library_cache(&self) -> Result<String>;

    /// Printable strings embedded in a file (the output of `strings`)
    async fn printable_strings(&self, path: &Path) -> Option<String>;
}

#[async_trait]
impl<T: LibraryInspector + ?Sized> LibraryInspector for &T {
    fn list_binaries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_binaries(dir)
    }

    async fn linked_libraries(&self, binary: &Path) -> Option<String> {
        (**self).linked_libraries(binary).await
    }

    async fn library_cache(&self) -> Result<String> {
        (**self).library_cache().await
    }

    async fn printable_strings(&self, path: &Path) -> Option<String> {
        (**self).printable_strings(path).await
    }
}
