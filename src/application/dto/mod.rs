/// Data Transfer Objects for application layer
///
/// DTOs carry use case results to the CLI, keeping presentation
/// concerns out of the domain layer.
mod sbom_summary;

pub use sbom_summary::SbomSummary;
