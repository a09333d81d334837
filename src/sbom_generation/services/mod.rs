mod cve_matcher;
mod library_versions;
mod sbom_merger;
mod source_components;
mod version_matcher;

pub use cve_matcher::{CveMatcher, EntryVerdict};
pub use library_versions::LibraryVersionRules;
pub use sbom_merger::{MergeOutcome, SbomMerger};
pub use source_components::{SourceComponentRules, BUILD_CONFIG_FILE};
pub use version_matcher::VersionMatcher;
