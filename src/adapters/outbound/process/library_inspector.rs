use crate::ports::outbound::{CommandRunner, LibraryInspector};
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// SystemLibraryInspector adapter running `ldd`, `ldconfig -p` and `strings`
pub struct SystemLibraryInspector<'a, C: CommandRunner + ?Sized> {
    runner: &'a C,
}

impl<'a, C: CommandRunner + ?Sized> SystemLibraryInspector<'a, C> {
    pub const LDD: &'static str = "ldd";
    pub const LDCONFIG: &'static str = "ldconfig";
    pub const STRINGS: &'static str = "strings";

    pub fn new(runner: &'a C) -> Self {
        Self { runner }
    }

    async fn stdout_of(&self, program: &str, path: &Path) -> Option<String> {
        let path = path.to_str()?;
        match self.runner.capture(program, &[path]).await {
            Ok(out) if out.success => Some(out.stdout),
            _ => None,
        }
    }
}

#[async_trait]
impl<C: CommandRunner + ?Sized> LibraryInspector for SystemLibraryInspector<'_, C> {
    fn list_binaries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(SbomError::InputNotFound {
                path: dir.to_path_buf(),
                suggestion: "Pass the directory holding the built binaries".to_string(),
            }
            .into());
        }

        Ok(WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            // Symlinked binaries count, dangling links do not
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect())
    }

    async fn linked_libraries(&self, binary: &Path) -> Option<String> {
        self.stdout_of(Self::LDD, binary).await
    }

    async fn library_cache(&self) -> Result<String> {
        let out = self.runner.capture(Self::LDCONFIG, &["-p"]).await?;
        if !out.success {
            return Err(SbomError::ProcessFailed {
                command: format!("{} -p", Self::LDCONFIG),
                details: out.stderr,
            }
            .into());
        }
        Ok(out.stdout)
    }

    async fn printable_strings(&self, path: &Path) -> Option<String> {
        self.stdout_of(Self::STRINGS, path).await
    }
}
