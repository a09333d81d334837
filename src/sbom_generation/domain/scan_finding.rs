use serde::Deserialize;
use serde_json::Value;

/// One record of the external CVE scanner's JSON report
///
/// Only the fields used for merging are read; the scanner writes many more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanFinding {
    pub product: String,
    pub version: String,
    pub cve_number: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub source: String,
}

impl ScanFinding {
    /// Numeric score, accepting both JSON numbers and numeric strings.
    /// Returns `None` for values like `"unknown"`.
    pub fn score_value(&self) -> Option<f64> {
        match &self.score {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}
