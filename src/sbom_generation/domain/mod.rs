pub mod component;
pub mod fetch_target;
pub mod nvd_record;
pub mod sbom_document;
pub mod scan_finding;
pub mod vulnerability;

pub use component::{bom_ref_for, Component, ComponentKind, UNKNOWN_VERSION};
pub use fetch_target::FetchTarget;
pub use nvd_record::{CvePage, NvdItem};
pub use sbom_document::{Metadata, SbomDocument, ToolComponent, ToolSection, Tools};
pub use scan_finding::ScanFinding;
pub use vulnerability::{CveMatch, Rating, Severity, VulnerabilityRecord};
