use crate::ports::outbound::{CveRepository, ProgressReporter, Sleeper};
use crate::sbom_generation::domain::{CveMatch, FetchTarget};
use crate::sbom_generation::policies::RetryPolicy;
use crate::sbom_generation::services::{CveMatcher, EntryVerdict};
use crate::shared::Result;

/// FetchCvesUseCase - Pages through the vulnerability database for one target
///
/// Pages are requested one after another. A page that leaves the result set
/// empty is followed by the policy delay; the first page that yields a match
/// ends the search unless the policy is exhaustive.
///
/// # Type Parameters
/// * `R` - CveRepository implementation
/// * `S` - Sleeper implementation
/// * `P` - ProgressReporter implementation
pub struct FetchCvesUseCase<R, S, P> {
    repository: R,
    sleeper: S,
    progress_reporter: P,
    policy: RetryPolicy,
}

impl<R, S, P> FetchCvesUseCase<R, S, P>
where
    R: CveRepository,
    S: Sleeper,
    P: ProgressReporter,
{
    pub fn new(repository: R, sleeper: S, progress_reporter: P, policy: RetryPolicy) -> Self {
        Self {
            repository,
            sleeper,
            progress_reporter,
            policy,
        }
    }

    /// Collects the CVEs whose CPE upper bound covers the target version
    ///
    /// # Arguments
    /// * `target` - Component name (used as search keyword) and version
    ///
    /// # Returns
    /// Matches in the order the database returned them, without duplicate ids
    ///
    /// # Errors
    /// Returns an error if a request fails or a response is not JSON.
    pub async fn execute(&self, target: &FetchTarget) -> Result<Vec<CveMatch>> {
        let name = target.name();
        let version = target.version();
        let max_pages = self.policy.max_pages();
        let page_size = self.policy.page_size();

        self.progress_reporter
            .report(&format!("🔍 Fetching CVEs for {} {}", name, version));

        let mut matches: Vec<CveMatch> = Vec::new();

        for page in 1..=max_pages {
            let start_index = self.policy.start_index(page);
            self.progress_reporter.report_progress(
                page as usize,
                max_pages as usize,
                Some(&format!("{} {}", name, version)),
            );
            self.progress_reporter.report(&format!(
                "   Looking through page {} (startIndex {})",
                page, start_index
            ));

            let result = self
                .repository
                .search_page(name, start_index, page_size)
                .await?;

            let mut incomplete = result.unreadable;
            for item in &result.items {
                match CveMatcher::evaluate(item, version) {
                    EntryVerdict::Affected {
                        cve,
                        version_end_including,
                    } => {
                        if matches.iter().any(|m| m.id == cve.id) {
                            continue;
                        }
                        self.progress_reporter.report(&format!(
                            "   ⚠️  {} affects {}: versionEndIncluding {} >= {}",
                            cve.id, name, version_end_including, version
                        ));
                        matches.push(cve);
                    }
                    EntryVerdict::NotAffected => {}
                    EntryVerdict::Incomplete => incomplete += 1,
                }
            }
            if incomplete > 0 {
                self.progress_reporter.report(&format!(
                    "   Skipped {} entr{} with missing fields",
                    incomplete,
                    if incomplete == 1 { "y" } else { "ies" }
                ));
            }

            if !matches.is_empty() && !self.policy.is_exhaustive() {
                break;
            }

            let next_start = self.policy.start_index(page + 1);
            if result.total_results.is_some_and(|total| next_start >= total) {
                break;
            }

            if page < max_pages {
                self.sleeper.sleep(self.policy.delay()).await;
            }
        }

        if matches.is_empty() {
            self.progress_reporter.report_completion(&format!(
                "ℹ️  Didn't find CVEs for {} {}",
                name, version
            ));
        } else {
            self.progress_reporter.report_completion(&format!(
                "✅ Found {} CVE(s) for {} {}",
                matches.len(),
                name,
                version
            ));
        }

        Ok(matches)
    }
}
