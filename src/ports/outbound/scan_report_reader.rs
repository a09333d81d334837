use crate::sbom_generation::domain::ScanFinding;
use crate::shared::Result;
use std::path::Path;

/// ScanReportReader port for reading binary-scanner JSON reports
pub trait ScanReportReader {
    /// Reads the findings of a scanner report (a JSON array of findings)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a findings array.
    fn read_scan_report(&self, path: &Path) -> Result<Vec<ScanFinding>>;
}

impl<T: ScanReportReader + ?Sized> ScanReportReader for &T {
    fn read_scan_report(&self, path: &Path) -> Result<Vec<ScanFinding>> {
        (**self).read_scan_report(path)
    }
}
