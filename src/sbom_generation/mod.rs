/// Domain layer - SBOM model and the rules that operate on it
///
/// Nothing in this layer performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
