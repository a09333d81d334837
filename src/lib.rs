//! toolchain-sbom - SBOM builder for compiler toolchains
//!
//! This library builds CycloneDX Software Bills of Materials for toolchain
//! source trees and compiled toolchain binaries, and enriches them with CVE
//! records from the NVD database and from binary CVE scanner reports. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases, pipelines and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use toolchain_sbom::prelude::*;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let reader = FileSystemReader::new();
//! let writer = FileSystemWriter::new();
//! let progress_reporter = StderrProgressReporter::new();
//! let repository = NvdClient::new(
//!     "https://services.nvd.nist.gov/rest/json/cves/2.0",
//!     None,
//!     Duration::from_secs(30),
//! )?;
//!
//! let use_case = AddVulnerabilitiesUseCase::new(
//!     repository,
//!     TokioSleeper,
//!     &progress_reporter,
//!     RetryPolicy::default(),
//! );
//!
//! let base = reader.load_sbom(Path::new("gcc-bin-sbom.cdx.json"))?;
//! let targets = vec![FetchTarget::new("zlib", "1.2.11")?];
//! let outcome = use_case.execute(&base, &targets).await?;
//! writer.save_sbom(Path::new("gcc-bin-sbom.cdx.json"), &outcome.document)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, SourceTreeScanner, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{NvdClient, TokioSleeper};
    pub use crate::adapters::outbound::process::{SystemCommandRunner, SystemLibraryInspector};
    pub use crate::application::dto::SbomSummary;
    pub use crate::application::pipeline::{Pipeline, PipelineContext, PipelineLayout, Step};
    pub use crate::application::use_cases::{
        AddComponentsUseCase, AddVulnerabilitiesUseCase, FetchCvesUseCase, FindLibrariesUseCase,
        MergeScanReportUseCase, SummarizeSbomUseCase,
    };
    pub use crate::ports::outbound::{
        CommandRunner, ComponentSource, CveRepository, LibraryInspector, OutputPresenter,
        ProgressReporter, SbomReader, SbomWriter, ScanReportReader, Sleeper, Workspace,
    };
    pub use crate::sbom_generation::domain::{
        Component, CveMatch, FetchTarget, SbomDocument, ScanFinding, VulnerabilityRecord,
    };
    pub use crate::sbom_generation::policies::RetryPolicy;
    pub use crate::sbom_generation::services::{MergeOutcome, SbomMerger, VersionMatcher};
    pub use crate::shared::Result;
}
