use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::pipeline::{DEFAULT_BINARIES_ARCHIVE, DEFAULT_SOURCE_ARCHIVE};
use crate::config::FetchOverrides;

/// Build CycloneDX SBOMs for toolchains and enrich them with CVE records
#[derive(Parser, Debug)]
#[command(name = "toolchain-sbom")]
#[command(version)]
#[command(
    about = "Build CycloneDX SBOMs for toolchain sources and binaries and enrich them with CVE records",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./toolchain-sbom.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Tuning of the vulnerability database paging
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FetchArgs {
    /// Maximum number of result pages requested per target
    #[arg(long, global = true, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Number of entries requested per page (1-2000)
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<u32>,

    /// Seconds to wait between pages without a match
    #[arg(long, global = true, value_name = "SECS")]
    pub delay_secs: Option<u64>,

    /// Keep paging after the first page with a match and collect every match
    #[arg(long, global = true)]
    pub exhaustive: bool,
}

impl FetchArgs {
    pub fn to_overrides(&self) -> FetchOverrides {
        FetchOverrides {
            max_pages: self.max_pages,
            page_size: self.page_size,
            delay_secs: self.delay_secs,
            exhaustive: self.exhaustive,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the source pipeline: extract, generate, add source components, scan, merge
    Source {
        /// Source tarball
        #[arg(long, default_value = DEFAULT_SOURCE_ARCHIVE)]
        archive: PathBuf,

        /// Final SBOM path (defaults to <archive name>-sbom.cdx.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the binaries pipeline: extract, generate, fetch CVEs of linked libraries
    Binaries {
        /// Binaries tarball
        #[arg(long, default_value = DEFAULT_BINARIES_ARCHIVE)]
        archive: PathBuf,

        /// Final SBOM path (defaults to <archive prefix>-bin-sbom.cdx.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Targets as name:version; discovered from the binaries when omitted
        #[arg(long, num_args = 1.., value_name = "NAME:VERSION")]
        targets: Option<Vec<String>>,
    },

    /// Add components found in a source tree to an SBOM, in place
    AddComponents {
        /// SBOM to update
        #[arg(short, long)]
        input: PathBuf,

        /// Root of the source tree
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Print name:version targets for the libraries linked by a directory of binaries
    FindLibs {
        /// Directory containing the binaries
        dir: PathBuf,
    },

    /// Fetch CVEs for targets and add them to an SBOM
    AddVulns {
        /// SBOM to read
        input: PathBuf,

        /// Path of the enriched SBOM (may equal the input)
        output: PathBuf,

        /// Targets as name:version
        #[arg(long, required = true, num_args = 1.., value_name = "NAME:VERSION")]
        targets: Vec<String>,
    },

    /// Merge a cve-bin-tool JSON report into an SBOM
    Merge {
        /// SBOM produced by the SBOM generator
        base: PathBuf,

        /// cve-bin-tool JSON report
        report: PathBuf,

        /// Path of the merged SBOM
        output: PathBuf,

        /// Scanner version recorded in the tool entry (queried from cve-bin-tool when omitted)
        #[arg(long, value_name = "VERSION")]
        scanner_version: Option<String>,
    },

    /// Print component and vulnerability counts of an SBOM
    Summary {
        /// SBOM to summarize
        sbom: PathBuf,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
