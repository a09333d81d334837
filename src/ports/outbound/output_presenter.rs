use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination where machine-readable
/// results (a target list, an SBOM summary) are presented.
pub trait OutputPresenter {
    /// Presents the content to the output destination
    ///
    /// # Arguments
    /// * `content` - The content to present
    ///
    /// # Errors
    /// Returns an error if writing to the output destination fails
    fn present(&self, content: &str) -> Result<()>;
}
