/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, processes, network, console).
pub mod command_runner;
pub mod component_source;
pub mod cve_repository;
pub mod library_inspector;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_repository;
pub mod scan_report_reader;
pub mod sleeper;
pub mod workspace;

pub use command_runner::{CommandOutput, CommandRunner};
pub use component_source::ComponentSource;
pub use cve_repository::CveRepository;
pub use library_inspector::LibraryInspector;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_repository::{SbomReader, SbomWriter};
pub use scan_report_reader::ScanReportReader;
pub use sleeper::Sleeper;
pub use workspace::Workspace;
