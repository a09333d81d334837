use super::{own_tool_entry, report_merge_outcome};
use crate::ports::outbound::{ComponentSource, ProgressReporter};
use crate::sbom_generation::domain::SbomDocument;
use crate::sbom_generation::services::{MergeOutcome, SbomMerger};
use crate::shared::Result;
use std::path::Path;

/// AddComponentsUseCase - Adds source-tree components the SBOM generator missed
///
/// # Type Parameters
/// * `CS` - ComponentSource implementation
/// * `P` - ProgressReporter implementation
pub struct AddComponentsUseCase<CS, P> {
    component_source: CS,
    progress_reporter: P,
}

impl<CS, P> AddComponentsUseCase<CS, P>
where
    CS: ComponentSource,
    P: ProgressReporter,
{
    pub fn new(component_source: CS, progress_reporter: P) -> Self {
        Self {
            component_source,
            progress_reporter,
        }
    }

    /// Discovers components under `source_dir` and merges them into `base`
    ///
    /// # Errors
    /// Returns an error if the source directory cannot be scanned.
    pub fn execute(&self, base: &SbomDocument, source_dir: &Path) -> Result<MergeOutcome> {
        self.progress_reporter.report(&format!(
            "📂 Scanning source tree: {}",
            source_dir.display()
        ));

        let components = self.component_source.discover_components(source_dir)?;
        self.progress_reporter
            .report(&format!("✅ Discovered {} component(s)", components.len()));

        let outcome = SbomMerger::merge(base, components, vec![], vec![own_tool_entry()]);
        report_merge_outcome(&self.progress_reporter, &outcome);
        Ok(outcome)
    }
}
