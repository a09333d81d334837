use super::PipelineContext;
use crate::application::use_cases::{
    AddComponentsUseCase, AddVulnerabilitiesUseCase, FindLibrariesUseCase, MergeScanReportUseCase,
    SummarizeSbomUseCase, SCANNER_NAME,
};
use crate::ports::outbound::CommandRunner;
use crate::sbom_generation::domain::FetchTarget;
use crate::shared::error::SbomError;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

const TAR: &str = "tar";
const SBOM_GENERATOR: &str = "syft";
const LINKER_TOOLS: [&str; 3] = ["ldd", "ldconfig", "strings"];

/// Where the FetchAndMerge step gets its targets from
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSource {
    /// Targets given on the command line
    Explicit(Vec<FetchTarget>),
    /// Targets discovered from the libraries linked by the binaries in a directory
    Discover(PathBuf),
}

/// One unit of work of a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Unpacks a gzip tarball into a directory
    Extract { archive: PathBuf, destination: PathBuf },
    /// Runs the SBOM generator over a directory
    Generate { input_dir: PathBuf, output: PathBuf },
    /// Adds source-tree components to an SBOM, in place
    AugmentFromSource { sbom: PathBuf, source_dir: PathBuf },
    /// Runs the binary CVE scanner over a directory
    Scan { input_dir: PathBuf, report: PathBuf },
    /// Merges the scanner's report into an SBOM
    MergeScan {
        sbom: PathBuf,
        report: PathBuf,
        output: PathBuf,
    },
    /// Fetches CVEs for targets and merges them into an SBOM
    FetchAndMerge {
        input: PathBuf,
        output: PathBuf,
        targets: TargetSource,
    },
    /// Prints the component and vulnerability counts of an SBOM
    Summarize { sbom: PathBuf },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Extract { .. } => "extract",
            Step::Generate { .. } => "generate",
            Step::AugmentFromSource { .. } => "augment-from-source",
            Step::Scan { .. } => "scan",
            Step::MergeScan { .. } => "merge-scan",
            Step::FetchAndMerge { .. } => "fetch-and-merge",
            Step::Summarize { .. } => "summarize",
        }
    }

    /// External programs the step invokes
    pub fn required_tools(&self) -> Vec<&'static str> {
        match self {
            Step::Extract { .. } => vec![TAR],
            Step::Generate { .. } => vec![SBOM_GENERATOR],
            Step::Scan { .. } | Step::MergeScan { .. } => vec![SCANNER_NAME],
            Step::FetchAndMerge {
                targets: TargetSource::Discover(_),
                ..
            } => LINKER_TOOLS.to_vec(),
            Step::AugmentFromSource { .. }
            | Step::FetchAndMerge { .. }
            | Step::Summarize { .. } => vec![],
        }
    }

    /// Files that must exist before the pipeline starts
    ///
    /// Inputs produced by an earlier step of the same pipeline are not listed.
    pub fn required_inputs(&self) -> Vec<&Path> {
        match self {
            Step::Extract { archive, .. } => vec![archive.as_path()],
            _ => vec![],
        }
    }

    /// Checks the step's external inputs and tools without running anything
    ///
    /// # Errors
    /// Returns `SbomError::InputNotFound` or `SbomError::ToolNotInstalled`.
    pub fn preflight(&self, ctx: &PipelineContext<'_>) -> Result<()> {
        for input in self.required_inputs() {
            if !ctx.workspace.exists(input) {
                return Err(SbomError::InputNotFound {
                    path: input.to_path_buf(),
                    suggestion: "Place the archive in the working directory or pass its path with --archive".to_string(),
                }
                .into());
            }
        }

        for tool in self.required_tools() {
            if !ctx.runner.is_installed(tool) {
                return Err(SbomError::ToolNotInstalled {
                    tool: tool.to_string(),
                    hint: install_hint(tool).to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Runs the step
    ///
    /// # Errors
    /// Returns an error if an external program fails, a file cannot be read
    /// or written, or a database request fails.
    pub async fn execute(&self, ctx: &PipelineContext<'_>) -> Result<()> {
        match self {
            Step::Extract {
                archive,
                destination,
            } => extract(ctx, archive, destination).await,
            Step::Generate { input_dir, output } => {
                let input = input_dir.to_string_lossy();
                ctx.runner
                    .run_to_file(SBOM_GENERATOR, &[&*input, "-o", "cyclonedx-json"], output)
                    .await?;
                ctx.progress_reporter.report(&format!(
                    "-- {} output written to {}",
                    SBOM_GENERATOR,
                    output.display()
                ));
                Ok(())
            }
            Step::AugmentFromSource { sbom, source_dir } => {
                let base = ctx.sbom_reader.load_sbom(sbom)?;
                let outcome = AddComponentsUseCase::new(ctx.component_source, ctx.progress_reporter)
                    .execute(&base, source_dir)?;
                ctx.sbom_writer.save_sbom(sbom, &outcome.document)
            }
            Step::Scan { input_dir, report } => scan(ctx, input_dir, report).await,
            Step::MergeScan {
                sbom,
                report,
                output,
            } => {
                let base = ctx.sbom_reader.load_sbom(sbom)?;
                let findings = ctx.scan_reports.read_scan_report(report)?;
                let scanner_version = detect_scanner_version(ctx.runner).await;
                let outcome = MergeScanReportUseCase::new(ctx.progress_reporter).execute(
                    &base,
                    &findings,
                    scanner_version.as_deref(),
                );
                ctx.sbom_writer.save_sbom(output, &outcome.document)
            }
            Step::FetchAndMerge {
                input,
                output,
                targets,
            } => {
                let targets = match targets {
                    TargetSource::Explicit(targets) => targets.clone(),
                    TargetSource::Discover(binaries_dir) => {
                        FindLibrariesUseCase::new(
                            ctx.library_inspector,
                            ctx.progress_reporter,
                            ctx.library_rules.clone(),
                        )
                        .execute(binaries_dir)
                        .await?
                    }
                };
                let base = ctx.sbom_reader.load_sbom(input)?;
                let outcome = AddVulnerabilitiesUseCase::new(
                    ctx.cve_repository,
                    ctx.sleeper,
                    ctx.progress_reporter,
                    ctx.policy,
                )
                .execute(&base, &targets)
                .await?;
                ctx.sbom_writer.save_sbom(output, &outcome.document)
            }
            Step::Summarize { sbom } => {
                let document = ctx.sbom_reader.load_sbom(sbom)?;
                let summary = SummarizeSbomUseCase::execute(&document);
                ctx.presenter.present(&summary.render())
            }
        }
    }
}

async fn extract(ctx: &PipelineContext<'_>, archive: &Path, destination: &Path) -> Result<()> {
    ctx.progress_reporter.report(&format!(
        "-- extracting {} into {}",
        archive.display(),
        destination.display()
    ));
    ctx.workspace.ensure_directory(destination)?;

    let archive_arg = archive.to_string_lossy();
    let destination_arg = destination.to_string_lossy();
    ctx.runner
        .run_checked(TAR, &["-xzf", &*archive_arg, "-C", &*destination_arg])
        .await
        .with_context(|| format!("Failed to extract {}", archive.display()))?;

    ctx.progress_reporter.report("-- finished extracting");
    Ok(())
}

/// The scanner exits non-zero when it finds vulnerabilities, so success is
/// judged by the report it leaves behind.
async fn scan(ctx: &PipelineContext<'_>, input_dir: &Path, report: &Path) -> Result<()> {
    // A stale report from an earlier run would mask a failed scan
    ctx.workspace.remove_file(report)?;

    let input = input_dir.to_string_lossy();
    let report_arg = report.to_string_lossy();
    let output = ctx
        .runner
        .capture(SCANNER_NAME, &["-f", "json", "-o", &*report_arg, &*input])
        .await?;

    if !ctx.workspace.exists(report) {
        return Err(SbomError::ProcessFailed {
            command: format!("{} -f json -o {} {}", SCANNER_NAME, report_arg, input),
            details: if output.stderr.trim().is_empty() {
                "no report was written".to_string()
            } else {
                output.stderr.trim().to_string()
            },
        }
        .into());
    }

    if !output.success {
        ctx.progress_reporter.report(&format!(
            "ℹ️  {} exited non-zero; it does so when it finds vulnerabilities",
            SCANNER_NAME
        ));
    }
    ctx.progress_reporter.report(&format!(
        "-- {} output written to {}",
        SCANNER_NAME,
        report.display()
    ));
    Ok(())
}

/// First version-looking token of `cve-bin-tool --version`
///
/// Returns `None` when the scanner cannot be run or prints no version.
pub async fn detect_scanner_version<C: CommandRunner + ?Sized>(runner: &C) -> Option<String> {
    let output = runner.capture(SCANNER_NAME, &["--version"]).await.ok()?;
    if !output.success {
        return None;
    }
    output
        .stdout
        .split_whitespace()
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
}

fn install_hint(tool: &str) -> &'static str {
    match tool {
        "syft" => "Install syft from https://github.com/anchore/syft",
        "cve-bin-tool" => "Install it with `pip install cve-bin-tool`",
        "tar" => "Install GNU tar with your system package manager",
        "ldd" | "ldconfig" => "Install the C library tools (libc-bin) with your system package manager",
        "strings" => "Install binutils with your system package manager",
        _ => "Install the tool and make sure it is on PATH",
    }
}
