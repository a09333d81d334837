use crate::sbom_generation::domain::Severity;
use std::collections::BTreeMap;

/// SbomSummary - Component and vulnerability counts of one SBOM document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SbomSummary {
    pub components: usize,
    pub vulnerabilities: usize,
    /// Vulnerability counts keyed by the severity of their first rating
    pub by_severity: BTreeMap<Severity, usize>,
}

impl SbomSummary {
    /// Renders the summary as `#`-prefixed report lines
    pub fn render(&self) -> String {
        let mut out = String::from("# SBOM summary:\n");
        out.push_str(&format!("# - components: {}\n", self.components));
        out.push_str(&format!("# - CVES: {}\n", self.vulnerabilities));
        for (severity, count) in &self.by_severity {
            out.push_str(&format!("#   - {}: {}\n", severity, count));
        }
        out
    }
}
