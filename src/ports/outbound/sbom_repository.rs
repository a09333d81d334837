use crate::sbom_generation::domain::SbomDocument;
use crate::shared::Result;
use std::path::Path;

/// SbomReader port for loading CycloneDX JSON documents
pub trait SbomReader {
    /// Loads and parses an SBOM document
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink, or is too large
    /// - The content is not valid CycloneDX JSON
    fn load_sbom(&self, path: &Path) -> Result<SbomDocument>;
}

/// SbomWriter port for persisting CycloneDX JSON documents
pub trait SbomWriter {
    /// Writes the document as pretty-printed JSON
    ///
    /// Readers of `path` never observe a partially written file.
    ///
    /// # Errors
    /// Returns an error if the document cannot be serialized or written.
    fn save_sbom(&self, path: &Path, document: &SbomDocument) -> Result<()>;
}

impl<T: SbomReader + ?Sized> SbomReader for &T {
    fn load_sbom(&self, path: &Path) -> Result<SbomDocument> {
        (**self).load_sbom(path)
    }
}

impl<T: SbomWriter + ?Sized> SbomWriter for &T {
    fn save_sbom(&self, path: &Path, document: &SbomDocument) -> Result<()> {
        (**self).save_sbom(path, document)
    }
}
