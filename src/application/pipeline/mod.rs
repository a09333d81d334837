/// Pipelines chaining external tools and use cases into one run
///
/// A pipeline is an ordered list of closed `Step` variants. Every step is
/// preflighted before the first one executes, steps run strictly in
/// sequence, and intermediate files are removed only when all steps
/// succeed.
mod context;
mod orchestrator;
mod step;

pub use context::PipelineContext;
pub use orchestrator::{
    Pipeline, PipelineLayout, DEFAULT_BINARIES_ARCHIVE, DEFAULT_SOURCE_ARCHIVE,
};
pub use step::{detect_scanner_version, Step, TargetSource};
