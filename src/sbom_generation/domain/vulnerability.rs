use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity levels as written into CycloneDX ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    None,
    Unknown,
}

impl Severity {
    /// Maps a database or scanner severity string to a level.
    /// Matching is case-insensitive; unrecognized values map to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" | "moderate" => Severity::Medium,
            "low" => Severity::Low,
            "none" => Severity::None,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::None => "none",
            Severity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A CVE found for a fetch target, before it is attached to a document
#[derive(Debug, Clone, PartialEq)]
pub struct CveMatch {
    pub id: String,
    pub description: String,
    pub score: f64,
    pub severity: String,
}

/// Source block of a vulnerability record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilitySource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single rating of a vulnerability record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rating {
    pub fn new(severity: Severity, method: Option<&str>, score: f64) -> Self {
        Self {
            severity: Some(severity.as_str().to_string()),
            method: method.map(str::to_string),
            score: Some(score),
            extra: Map::new(),
        }
    }
}

/// Reference from a vulnerability to an affected component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affect {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A CycloneDX vulnerability entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<VulnerabilitySource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ratings: Vec<Rating>,
    #[serde(default)]
    affects: Vec<Affect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl VulnerabilityRecord {
    pub fn new(
        id: impl Into<String>,
        source_name: impl Into<String>,
        rating: Rating,
        affected_ref: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: Some(VulnerabilitySource {
                name: Some(source_name.into()),
                extra: Map::new(),
            }),
            ratings: vec![rating],
            affects: vec![Affect {
                reference: affected_ref.into(),
                extra: Map::new(),
            }],
            description,
            extra: Map::new(),
        }
    }

    /// Record for a CVE fetched from NVD, rated with the CVSS v2 base score
    pub fn from_nvd_match(cve: &CveMatch, affected_ref: &str) -> Self {
        Self::new(
            cve.id.clone(),
            "NVD",
            Rating::new(Severity::parse(&cve.severity), Some("CVSSv2"), cve.score),
            affected_ref,
            Some(cve.description.clone()),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn affects(&self) -> &[Affect] {
        &self.affects
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Severity of the first rating, `Unknown` when unrated
    pub fn severity(&self) -> Severity {
        self.ratings
            .first()
            .and_then(|r| r.severity.as_deref())
            .map(Severity::parse)
            .unwrap_or(Severity::Unknown)
    }
}
