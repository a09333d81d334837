use super::component::bom_ref_for;
use crate::shared::error::SbomError;
use std::str::FromStr;

/// Maximum length for target names (security limit)
const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for target versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// A package/version pair to look up in the vulnerability database
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTarget {
    name: String,
    version: String,
}

impl FetchTarget {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self, SbomError> {
        let name = name.into().trim().to_string();
        let version = version.into().trim().to_string();
        let display = format!("{}:{}", name, version);

        check_length(&name, "name", MAX_NAME_LENGTH, &display)?;
        check_length(&version, "version", MAX_VERSION_LENGTH, &display)?;

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '~'))
        {
            return Err(invalid(&display, "name contains invalid characters"));
        }

        // Versions are free-form (epochs such as `1:2.40` included)
        if version.chars().any(char::is_control) {
            return Err(invalid(&display, "version contains control characters"));
        }

        Ok(Self { name, version })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn bom_ref(&self) -> String {
        bom_ref_for(&self.name, &self.version)
    }

    /// Parses whitespace separated `name:version` pairs.
    ///
    /// Each element of `values` may hold several pairs (the output of
    /// `find-libs` is passed through as one string). Invalid pairs are
    /// returned separately so callers can report and skip them.
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> (Vec<FetchTarget>, Vec<SbomError>) {
        let mut targets = Vec::new();
        let mut errors = Vec::new();

        for pair in values.iter().flat_map(|v| v.as_ref().split_whitespace()) {
            match pair.parse::<FetchTarget>() {
                Ok(target) => targets.push(target),
                Err(e) => errors.push(e),
            }
        }

        (targets, errors)
    }
}

fn invalid(display: &str, reason: &str) -> SbomError {
    SbomError::InvalidTarget {
        value: display.to_string(),
        reason: reason.to_string(),
    }
}

fn check_length(value: &str, label: &str, max_len: usize, display: &str) -> Result<(), SbomError> {
    if value.is_empty() {
        return Err(invalid(display, &format!("{} cannot be empty", label)));
    }
    if value.len() > max_len {
        return Err(invalid(
            display,
            &format!("{} is longer than {} bytes", label, max_len),
        ));
    }
    Ok(())
}

impl FromStr for FetchTarget {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s.split_once(':').ok_or_else(|| SbomError::InvalidTarget {
            value: s.to_string(),
            reason: "missing ':' separator".to_string(),
        })?;
        FetchTarget::new(name, version)
    }
}

impl std::fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}
