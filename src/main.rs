mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod sbom_generation;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, SourceTreeScanner, StdoutPresenter,
};
use adapters::outbound::network::{NvdClient, TokioSleeper};
use adapters::outbound::process::{SystemCommandRunner, SystemLibraryInspector};
use application::pipeline::{
    detect_scanner_version, Pipeline, PipelineContext, PipelineLayout,
};
use application::use_cases::{
    AddComponentsUseCase, AddVulnerabilitiesUseCase, FindLibrariesUseCase, MergeScanReportUseCase,
    SummarizeSbomUseCase,
};
use cli::{Args, Command};
use config::ResolvedSettings;
use ports::outbound::{OutputPresenter, ProgressReporter, SbomReader, SbomWriter, ScanReportReader};
use sbom_generation::domain::FetchTarget;
use sbom_generation::services::LibraryVersionRules;
use shared::error::ExitCode;
use shared::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();

    let config_file = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    let settings = config::resolve_settings(
        config_file.as_ref(),
        &args.fetch.to_overrides(),
        std::env::var(config::API_KEY_ENV).ok(),
    )?;

    let progress_reporter = StderrProgressReporter::new();
    let reader = FileSystemReader::new();
    let writer = FileSystemWriter::new();
    let presenter = StdoutPresenter::new();

    match args.command {
        Command::Source { archive, output } => {
            let layout = PipelineLayout::for_archive(archive).with_output(output);
            run_pipeline(&Pipeline::source(&layout), &settings, &progress_reporter).await
        }
        Command::Binaries {
            archive,
            output,
            targets,
        } => {
            let targets = targets.map(|values| parse_targets(&values, &progress_reporter));
            let layout = PipelineLayout::for_archive(archive).with_output(output);
            run_pipeline(
                &Pipeline::binaries(&layout, targets),
                &settings,
                &progress_reporter,
            )
            .await
        }
        Command::AddComponents { input, source } => {
            let base = reader.load_sbom(&input)?;
            let outcome = AddComponentsUseCase::new(SourceTreeScanner::new(), &progress_reporter)
                .execute(&base, &source)?;
            writer.save_sbom(&input, &outcome.document)?;
            progress_reporter.report_completion(&format!("📝 SBOM written to {}", input.display()));
            Ok(())
        }
        Command::FindLibs { dir } => {
            let runner = SystemCommandRunner::new();
            let use_case = FindLibrariesUseCase::new(
                SystemLibraryInspector::new(&runner),
                &progress_reporter,
                library_rules(&settings),
            );
            let targets = use_case.execute(&dir).await?;
            let rendered: Vec<String> = targets.iter().map(ToString::to_string).collect();
            presenter.present(&rendered.join(" "))
        }
        Command::AddVulns {
            input,
            output,
            targets,
        } => {
            let targets = parse_targets(&targets, &progress_reporter);
            let base = reader.load_sbom(&input)?;
            let use_case = AddVulnerabilitiesUseCase::new(
                nvd_client(&settings)?,
                TokioSleeper,
                &progress_reporter,
                settings.retry_policy,
            );
            let outcome = use_case.execute(&base, &targets).await?;
            writer.save_sbom(&output, &outcome.document)?;
            progress_reporter
                .report_completion(&format!("📝 SBOM written to {}", output.display()));
            Ok(())
        }
        Command::Merge {
            base,
            report,
            output,
            scanner_version,
        } => {
            let document = reader.load_sbom(&base)?;
            let findings = reader.read_scan_report(&report)?;
            let scanner_version = match scanner_version {
                Some(version) => Some(version),
                None => {
                    let runner = SystemCommandRunner::new();
                    detect_scanner_version(&runner).await
                }
            };
            let outcome = MergeScanReportUseCase::new(&progress_reporter).execute(
                &document,
                &findings,
                scanner_version.as_deref(),
            );
            writer.save_sbom(&output, &outcome.document)?;
            progress_reporter
                .report_completion(&format!("📝 SBOM written to {}", output.display()));
            Ok(())
        }
        Command::Summary { sbom } => {
            let document = reader.load_sbom(&sbom)?;
            presenter.present(&SummarizeSbomUseCase::execute(&document).render())
        }
    }
}

async fn run_pipeline(
    pipeline: &Pipeline,
    settings: &ResolvedSettings,
    progress_reporter: &StderrProgressReporter,
) -> Result<()> {
    let runner = SystemCommandRunner::new();
    let cve_repository = nvd_client(settings)?;
    let file_reader = FileSystemReader::new();
    let file_writer = FileSystemWriter::new();
    let component_source = SourceTreeScanner::new();
    let library_inspector = SystemLibraryInspector::new(&runner);
    let presenter = StdoutPresenter::new();

    let ctx = PipelineContext {
        runner: &runner,
        cve_repository: &cve_repository,
        sleeper: &TokioSleeper,
        progress_reporter,
        presenter: &presenter,
        sbom_reader: &file_reader,
        sbom_writer: &file_writer,
        scan_reports: &file_reader,
        workspace: &file_writer,
        component_source: &component_source,
        library_inspector: &library_inspector,
        policy: settings.retry_policy,
        library_rules: library_rules(settings),
    };

    pipeline.run(&ctx).await?;
    Ok(())
}

fn nvd_client(settings: &ResolvedSettings) -> Result<NvdClient> {
    NvdClient::new(
        settings.endpoint.clone(),
        settings.api_key.clone(),
        settings.timeout,
    )
}

fn library_rules(settings: &ResolvedSettings) -> LibraryVersionRules {
    LibraryVersionRules::new().with_aliases(&settings.library_aliases)
}

/// Parses `name:version` targets, warning about and dropping invalid ones
fn parse_targets(values: &[String], progress_reporter: &StderrProgressReporter) -> Vec<FetchTarget> {
    let (targets, errors) = FetchTarget::parse_all(values);
    for error in errors {
        progress_reporter.report_error(&format!("⚠️  Warning: {}", error));
    }
    targets
}
