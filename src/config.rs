//! Configuration file support for toolchain-sbom.
//!
//! Provides YAML-based configuration through `toolchain-sbom.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line overrides.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::sbom_generation::policies::RetryPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "toolchain-sbom.config.yml";

pub const DEFAULT_NVD_ENDPOINT: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_KEY_ENV: &str = "NVD_API_KEY";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub nvd: Option<NvdConfig>,
    /// Extra shared-object to component-name aliases for `find-libs`.
    pub library_aliases: Option<HashMap<String, String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// The `nvd` section: where and how the vulnerability database is queried.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct NvdConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub results_per_page: Option<u32>,
    pub max_pages: Option<u32>,
    pub delay_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub exhaustive: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Fetch settings given on the command line; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct FetchOverrides {
    pub max_pages: Option<u32>,
    pub page_size: Option<u32>,
    pub delay_secs: Option<u64>,
    pub exhaustive: bool,
}

/// Effective settings after applying CLI flag > config file > default.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub library_aliases: HashMap<String, String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let Some(ref nvd) = config.nvd else {
        return Ok(());
    };

    if let Some(ref endpoint) = nvd.endpoint {
        if endpoint.trim().is_empty() {
            bail!(
                "Invalid config: nvd.endpoint must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default endpoint ({}).",
                DEFAULT_NVD_ENDPOINT
            );
        }
    }
    if let Some(size) = nvd.results_per_page {
        if size == 0 || size > RetryPolicy::MAX_PAGE_SIZE {
            bail!(
                "Invalid config: nvd.results_per_page must be between 1 and {} (got {}).",
                RetryPolicy::MAX_PAGE_SIZE,
                size
            );
        }
    }
    if nvd.max_pages == Some(0) {
        bail!("Invalid config: nvd.max_pages must be at least 1.");
    }
    if nvd.timeout_secs == Some(0) {
        bail!("Invalid config: nvd.timeout_secs must be at least 1.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
    if let Some(ref nvd) = config.nvd {
        for key in nvd.unknown_fields.keys() {
            eprintln!(
                "⚠️  Warning: Unknown config field 'nvd.{}' will be ignored.",
                key
            );
        }
    }
}

/// Merges command-line overrides, the config file, and built-in defaults.
///
/// The API key falls back to the `NVD_API_KEY` environment variable when
/// the config file does not set one.
///
/// # Errors
/// Returns an error if the merged fetch settings are out of range.
pub fn resolve_settings(
    config: Option<&ConfigFile>,
    overrides: &FetchOverrides,
    env_api_key: Option<String>,
) -> Result<ResolvedSettings> {
    let nvd = config.and_then(|c| c.nvd.clone()).unwrap_or_default();

    let max_pages = overrides
        .max_pages
        .or(nvd.max_pages)
        .unwrap_or(RetryPolicy::DEFAULT_MAX_PAGES);
    let page_size = overrides
        .page_size
        .or(nvd.results_per_page)
        .unwrap_or(RetryPolicy::DEFAULT_PAGE_SIZE);
    let delay_secs = overrides
        .delay_secs
        .or(nvd.delay_secs)
        .unwrap_or(RetryPolicy::DEFAULT_DELAY_SECS);
    let exhaustive = overrides.exhaustive || nvd.exhaustive.unwrap_or(false);

    let retry_policy = RetryPolicy::new(max_pages, page_size, Duration::from_secs(delay_secs))?
        .with_exhaustive(exhaustive);

    let api_key = nvd
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| env_api_key.filter(|key| !key.trim().is_empty()));

    Ok(ResolvedSettings {
        endpoint: nvd
            .endpoint
            .unwrap_or_else(|| DEFAULT_NVD_ENDPOINT.to_string()),
        api_key,
        timeout: Duration::from_secs(nvd.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        retry_policy,
        library_aliases: config
            .and_then(|c| c.library_aliases.clone())
            .unwrap_or_default(),
    })
}
