use crate::sbom_generation::domain::CvePage;
use crate::shared::Result;
use async_trait::async_trait;

/// CveRepository port for keyword searches against a vulnerability database
///
/// This port abstracts the remote database (e.g., the NVD CVE API 2.0) so
/// the pagination logic can be driven by scripted pages in tests.
///
/// # Async Support
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait CveRepository: Send + Sync {
    /// Fetches one page of entries matching a keyword
    ///
    /// # Arguments
    /// * `keyword` - Free-text search keyword (a component name)
    /// * `start_index` - Zero-based index of the first entry on the page
    /// * `results_per_page` - Page size requested from the database
    ///
    /// # Returns
    /// The readable entries of the page, plus the database's total result
    /// count when it reports one
    ///
    /// # Errors
    /// Returns an error if:
    /// - The request cannot be sent or times out
    /// - The database answers with a non-success status
    /// - The response body is not JSON
    async fn search_page(
        &self,
        keyword: &str,
        start_index: u32,
        results_per_page: u32,
    ) -> Result<CvePage>;
}

#[async_trait]
impl<T: CveRepository + ?Sized> CveRepository for &T {
    async fn search_page(
        &self,
        keyword: &str,
        start_index: u32,
        results_per_page: u32,
    ) -> Result<CvePage> {
        (**self)
            .search_page(keyword, start_index, results_per_page)
            .await
    }
}
