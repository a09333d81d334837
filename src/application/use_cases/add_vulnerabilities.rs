use super::fetch_cves::FetchCvesUseCase;
use super::{own_tool_entry, report_merge_outcome};
use crate::ports::outbound::{CveRepository, ProgressReporter, Sleeper};
use crate::sbom_generation::domain::{Component, FetchTarget, SbomDocument, VulnerabilityRecord};
use crate::sbom_generation::policies::RetryPolicy;
use crate::sbom_generation::services::{MergeOutcome, SbomMerger};
use crate::shared::Result;
use std::collections::HashMap;

/// AddVulnerabilitiesUseCase - Enriches an SBOM with CVEs fetched per target
///
/// Each target becomes a `library` component `name@version` and every CVE
/// whose CPE bound covers the version becomes a vulnerability affecting it.
/// Targets whose `bom-ref` already exists in the document are not fetched.
///
/// # Type Parameters
/// * `R` - CveRepository implementation
/// * `S` - Sleeper implementation
/// * `P` - ProgressReporter implementation
pub struct AddVulnerabilitiesUseCase<R, S, P> {
    repository: R,
    sleeper: S,
    progress_reporter: P,
    policy: RetryPolicy,
}

impl<R, S, P> AddVulnerabilitiesUseCase<R, S, P>
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

    /// Fetches CVEs for every target and merges them into `base`
    ///
    /// Vulnerabilities reference the component that represents the target's
    /// name in the merged document: an existing component of that name when
    /// the base already has one, otherwise the new `name@version` component.
    ///
    /// # Errors
    /// Returns an error if any database request fails.
    pub async fn execute(&self, base: &SbomDocument, targets: &[FetchTarget]) -> Result<MergeOutcome> {
        let fetcher = FetchCvesUseCase::new(
            &self.repository,
            &self.sleeper,
            &self.progress_reporter,
            self.policy,
        );

        let mut components = Vec::new();
        let mut vulnerabilities = Vec::new();
        let mut reference_for_name: HashMap<String, String> = HashMap::new();

        for target in targets {
            let bom_ref = target.bom_ref();
            if base.has_bom_ref(&bom_ref) || components.iter().any(|c: &Component| c.bom_ref() == Some(bom_ref.as_str())) {
                self.progress_reporter
                    .report(&format!("⏭️  Component {} already in SBOM, skipping", bom_ref));
                continue;
            }

            let cves = fetcher.execute(target).await?;

            let affected_ref = reference_for_name
                .entry(target.name().to_string())
                .or_insert_with(|| {
                    base.find_component_by_name(target.name())
                        .and_then(|existing| existing.bom_ref())
                        .map(str::to_string)
                        .unwrap_or_else(|| bom_ref.clone())
                })
                .clone();

            components.push(Component::library(target.name(), target.version()));
            vulnerabilities.extend(
                cves.iter()
                    .map(|cve| VulnerabilityRecord::from_nvd_match(cve, &affected_ref)),
            );
        }

        let outcome = SbomMerger::merge(base, components, vulnerabilities, vec![own_tool_entry()]);
        report_merge_outcome(&self.progress_reporter, &outcome);
        Ok(outcome)
    }
}
