use crate::ports::outbound::{SbomReader, ScanReportReader};
use crate::sbom_generation::domain::{SbomDocument, ScanFinding};
use crate::shared::error::SbomError;
use crate::shared::security::read_checked;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading JSON documents from the file system
///
/// This adapter implements both SbomReader and ScanReportReader ports.
/// Every read rejects symbolic links, non-regular files and files over the
/// size limit before any content is parsed.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn ensure_exists(path: &Path, suggestion: &str) -> Result<()> {
        if !path.exists() && path.symlink_metadata().is_err() {
            return Err(SbomError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: suggestion.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for FileSystemReader {
    fn load_sbom(&self, path: &Path) -> Result<SbomDocument> {
        Self::ensure_exists(
            path,
            "Generate the SBOM first (e.g. `syft <dir> -o cyclonedx-json`), or check the path.",
        )?;

        let content = read_checked(path, "SBOM")?;

        SbomDocument::from_json(&content).map_err(|e| {
            SbomError::SbomParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl ScanReportReader for FileSystemReader {
    fn read_scan_report(&self, path: &Path) -> Result<Vec<ScanFinding>> {
        Self::ensure_exists(
            path,
            "Run the scanner first (e.g. `cve-bin-tool -f json -o <report> <dir>`), or check the path.",
        )?;

        let content = read_checked(path, "scan report")?;

        serde_json::from_str(&content).map_err(|e| {
            SbomError::FileReadError {
                path: path.to_path_buf(),
                details: format!("scan report is not a JSON array of findings: {}", e),
            }
            .into()
        })
    }
}
