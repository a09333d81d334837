/// Use cases module containing application business logic orchestration
mod add_components;
mod add_vulnerabilities;
mod fetch_cves;
mod find_libraries;
mod merge_scan_report;
mod summarize_sbom;

pub use add_components::AddComponentsUseCase;
pub use add_vulnerabilities::AddVulnerabilitiesUseCase;
pub use fetch_cves::FetchCvesUseCase;
pub use find_libraries::FindLibrariesUseCase;
pub use merge_scan_report::{MergeScanReportUseCase, SCANNER_AUTHOR, SCANNER_NAME};
pub use summarize_sbom::SummarizeSbomUseCase;

use crate::ports::outbound::ProgressReporter;
use crate::sbom_generation::domain::ToolComponent;
use crate::sbom_generation::services::MergeOutcome;

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool entry recording this program in `metadata.tools`
pub(crate) fn own_tool_entry() -> ToolComponent {
    ToolComponent::application(TOOL_NAME).with_version(TOOL_VERSION)
}

pub(crate) fn report_merge_outcome<P: ProgressReporter>(reporter: &P, outcome: &MergeOutcome) {
    for name in &outcome.components_skipped {
        reporter.report(&format!("   Component {} already in SBOM, skipping", name));
    }
    for id in &outcome.vulnerabilities_duplicate {
        reporter.report(&format!("   {} already in SBOM, skipping", id));
    }
    for id in &outcome.vulnerabilities_unresolved {
        reporter.report_error(&format!(
            "⚠️  Warning: {} references a component missing from the SBOM; dropped",
            id
        ));
    }
    reporter.report(&format!(
        "✅ Added {} component(s) and {} vulnerabilit{}",
        outcome.components_added,
        outcome.vulnerabilities_added,
        if outcome.vulnerabilities_added == 1 { "y" } else { "ies" }
    ));
}
