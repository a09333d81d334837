use crate::ports::outbound::{OutputPresenter, SbomWriter, Workspace};
use crate::sbom_generation::domain::SbomDocument;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// FileSystemWriter adapter for writing SBOM documents and managing scratch files
///
/// This adapter implements the SbomWriter and Workspace ports. Documents are
/// written to a temporary file in the destination directory and renamed
/// over the destination, so a failed write leaves the previous file intact.
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects an existing destination that is a symbolic link
    fn validate_output_security(path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_symlink() {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn write_atomically(path: &Path, content: &str) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        let to_write_error = |e: io::Error| SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(to_write_error)?;
        temp.write_all(content.as_bytes()).map_err(to_write_error)?;
        temp.flush().map_err(to_write_error)?;
        if let Some(permissions) = Self::destination_permissions(path) {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(to_write_error)?;
        }
        temp.persist(path).map_err(|e| to_write_error(e.error))?;
        Ok(())
    }

    /// Permissions the written file should carry
    ///
    /// An existing destination keeps its own mode. New files get the usual
    /// 0644 instead of the temporary file's 0600.
    fn destination_permissions(path: &Path) -> Option<fs::Permissions> {
        if let Ok(metadata) = fs::metadata(path) {
            return Some(metadata.permissions());
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            Some(fs::Permissions::from_mode(0o644))
        }
        #[cfg(not(unix))]
        {
            None
        }
    }
}

impl Default for FileSystemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomWriter for FileSystemWriter {
    fn save_sbom(&self, path: &Path, document: &SbomDocument) -> Result<()> {
        Self::validate_parent_directory(path)?;
        Self::validate_output_security(path)?;

        // Serialize before touching the destination
        let mut content = document.to_json_pretty().map_err(|e| SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Failed to serialize SBOM: {}", e),
        })?;
        content.push('\n');

        Self::write_atomically(path, &content)
    }
}

impl Workspace for FileSystemWriter {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to create directory: {}", e),
            }
            .into()
        })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to remove intermediate file: {}", e),
            }
            .into()),
        }
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::Component;
    use crate::sbom_generation::services::SbomMerger;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_document() -> SbomDocument {
        SbomMerger::merge(
            &SbomDocument::default(),
            vec![Component::library("zlib", "1.2.11")],
            vec![],
            vec![],
        )
        .document
    }

    #[test]
    fn test_save_sbom_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.cdx.json");

        FileSystemWriter::new()
            .save_sbom(&output_path, &sample_document())
            .unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        let reparsed = SbomDocument::from_json(&written).unwrap();
        assert_eq!(reparsed, sample_document());
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_save_sbom_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.cdx.json");
        fs::write(&output_path, "old").unwrap();

        FileSystemWriter::new()
            .save_sbom(&output_path, &sample_document())
            .unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("zlib@1.2.11"));
        // Only the destination remains; the temporary file was renamed over it
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sbom_keeps_destination_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.cdx.json");
        fs::write(&output_path, "old").unwrap();
        fs::set_permissions(&output_path, fs::Permissions::from_mode(0o664)).unwrap();

        FileSystemWriter::new()
            .save_sbom(&output_path, &sample_document())
            .unwrap();

        let mode = fs::metadata(&output_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sbom_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.cdx.json");

        FileSystemWriter::new()
            .save_sbom(&output_path, &sample_document())
            .unwrap();

        let mode = fs::metadata(&output_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_save_sbom_parent_directory_not_found() {
        let output_path = PathBuf::from("/nonexistent/directory/output.json");

        let result = FileSystemWriter::new().save_sbom(&output_path, &sample_document());

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Parent directory does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sbom_rejects_symlink_destination() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(FileSystemWriter::new()
            .save_sbom(&link, &sample_document())
            .is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
    }

    #[test]
    fn test_remove_file_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileSystemWriter::new();
        let path = temp_dir.path().join(".cves.json");

        assert!(writer.remove_file(&path).is_ok());
        fs::write(&path, "[]").unwrap();
        assert!(writer.remove_file(&path).is_ok());
        assert!(!writer.exists(&path));
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        FileSystemWriter::new().ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_stdout_presenter_success() {
        let presenter = StdoutPresenter::new();
        let result = presenter.present("zlib:1.2.11\n");
        assert!(result.is_ok());
    }
}
