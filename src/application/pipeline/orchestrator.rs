use super::{PipelineContext, Step, TargetSource};
use crate::sbom_generation::domain::FetchTarget;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Default archive of the source pipeline
pub const DEFAULT_SOURCE_ARCHIVE: &str = "gcc.tar.gz";
/// Default archive of the binaries pipeline
pub const DEFAULT_BINARIES_ARCHIVE: &str = "gcc_binaries.tar.gz";

const SCAN_REPORT_FILE: &str = ".cves.json";
const SBOM_SUFFIX: &str = "-sbom.cdx.json";
const BINARIES_SUFFIX: &str = "_binaries";

/// File names a pipeline derives from its archive
///
/// Everything lives next to the archive: `gcc.tar.gz` extracts into `gcc/`
/// and produces `gcc-sbom.cdx.json`; `gcc_binaries.tar.gz` extracts into
/// `gcc_binaries/` and produces `gcc-bin-sbom.cdx.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineLayout {
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
    stem: String,
    parent: PathBuf,
    output: Option<PathBuf>,
}

impl PipelineLayout {
    pub fn for_archive(archive: impl Into<PathBuf>) -> Self {
        let archive = archive.into();
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = [".tar.gz", ".tgz", ".tar"]
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext))
            .unwrap_or(file_name.as_str())
            .to_string();
        let parent = archive.parent().map(Path::to_path_buf).unwrap_or_default();

        Self {
            extract_dir: parent.join(&stem),
            archive,
            stem,
            parent,
            output: None,
        }
    }

    /// Overrides the derived name of the final SBOM
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    fn source_output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.parent.join(format!("{}{}", self.stem, SBOM_SUFFIX)))
    }

    fn binaries_output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let prefix = self.stem.strip_suffix(BINARIES_SUFFIX).unwrap_or(self.stem.as_str());
            self.parent.join(format!("{}-bin{}", prefix, SBOM_SUFFIX))
        })
    }

    fn baseline(&self) -> PathBuf {
        self.parent
            .join(format!(".no_cves-{}{}", self.stem, SBOM_SUFFIX))
    }

    fn scan_report(&self) -> PathBuf {
        self.parent.join(SCAN_REPORT_FILE)
    }
}

/// An ordered list of steps plus the intermediate files they leave behind
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    name: &'static str,
    steps: Vec<Step>,
    intermediates: Vec<PathBuf>,
    output: PathBuf,
}

impl Pipeline {
    /// Source-tree pipeline: generator SBOM, source components, binary scan, merge
    pub fn source(layout: &PipelineLayout) -> Self {
        let baseline = layout.baseline();
        let report = layout.scan_report();
        let output = layout.source_output();

        let steps = vec![
            Step::Extract {
                archive: layout.archive.clone(),
                destination: layout.extract_dir.clone(),
            },
            Step::Generate {
                input_dir: layout.extract_dir.clone(),
                output: baseline.clone(),
            },
            Step::AugmentFromSource {
                sbom: baseline.clone(),
                source_dir: layout.extract_dir.clone(),
            },
            Step::Scan {
                input_dir: layout.extract_dir.clone(),
                report: report.clone(),
            },
            Step::MergeScan {
                sbom: baseline.clone(),
                report: report.clone(),
                output: output.clone(),
            },
            Step::Summarize {
                sbom: output.clone(),
            },
        ];

        Self {
            name: "source",
            steps,
            intermediates: vec![baseline, report],
            output,
        }
    }

    /// Binaries pipeline: generator SBOM enriched with CVEs of the linked libraries
    ///
    /// Without explicit targets, they are discovered from the extracted
    /// binaries once extraction has run.
    pub fn binaries(layout: &PipelineLayout, targets: Option<Vec<FetchTarget>>) -> Self {
        let output = layout.binaries_output();
        let targets = match targets {
            Some(targets) => TargetSource::Explicit(targets),
            None => TargetSource::Discover(layout.extract_dir.clone()),
        };

        let steps = vec![
            Step::Extract {
                archive: layout.archive.clone(),
                destination: layout.extract_dir.clone(),
            },
            Step::Generate {
                input_dir: layout.extract_dir.clone(),
                output: output.clone(),
            },
            Step::FetchAndMerge {
                input: output.clone(),
                output: output.clone(),
                targets,
            },
            Step::Summarize {
                sbom: output.clone(),
            },
        ];

        Self {
            name: "binaries",
            steps,
            intermediates: vec![],
            output,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn intermediates(&self) -> &[PathBuf] {
        &self.intermediates
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Preflights every step, then runs them in order
    ///
    /// Nothing runs unless every step's inputs and tools are present. The
    /// first failing step aborts the run and leaves intermediate files in
    /// place for inspection; they are removed only after a full success.
    ///
    /// # Errors
    /// Returns the first preflight or step error.
    pub async fn run(&self, ctx: &PipelineContext<'_>) -> Result<PathBuf> {
        ctx.progress_reporter
            .report(&format!("🚀 Running the {} pipeline", self.name));

        for step in &self.steps {
            step.preflight(ctx)?;
        }

        for step in &self.steps {
            ctx.progress_reporter
                .report(&format!("-- running step {}", step.name()));
            step.execute(ctx)
                .await
                .with_context(|| format!("Step '{}' failed", step.name()))?;
        }

        if !self.intermediates.is_empty() {
            ctx.progress_reporter.report("-- cleaning up temporary files");
        }
        for path in &self.intermediates {
            if let Err(e) = ctx.workspace.remove_file(path) {
                ctx.progress_reporter.report_error(&format!(
                    "⚠️  Warning: could not remove {}: {}",
                    path.display(),
                    e
                ));
            }
        }

        ctx.progress_reporter.report_completion(&format!(
            "✅ {} pipeline completed: {}",
            self.name,
            self.output.display()
        ));
        Ok(self.output.clone())
    }
}
