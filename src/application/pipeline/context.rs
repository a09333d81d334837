use crate::ports::outbound::{
    CommandRunner, ComponentSource, CveRepository, LibraryInspector, OutputPresenter,
    ProgressReporter, SbomReader, SbomWriter, ScanReportReader, Sleeper, Workspace,
};
use crate::sbom_generation::policies::RetryPolicy;
use crate::sbom_generation::services::LibraryVersionRules;

/// Everything a step needs to run, borrowed from the composition root
pub struct PipelineContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub cve_repository: &'a dyn CveRepository,
    pub sleeper: &'a dyn Sleeper,
    pub progress_reporter: &'a dyn ProgressReporter,
    pub presenter: &'a dyn OutputPresenter,
    pub sbom_reader: &'a dyn SbomReader,
    pub sbom_writer: &'a dyn SbomWriter,
    pub scan_reports: &'a dyn ScanReportReader,
    pub workspace: &'a dyn Workspace,
    pub component_source: &'a dyn ComponentSource,
    pub library_inspector: &'a dyn LibraryInspector,
    pub policy: RetryPolicy,
    pub library_rules: LibraryVersionRules,
}
