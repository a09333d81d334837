use super::{own_tool_entry, report_merge_outcome};
use crate::ports::outbound::ProgressReporter;
use crate::sbom_generation::domain::{
    Component, Rating, SbomDocument, ScanFinding, Severity, ToolComponent, VulnerabilityRecord,
};
use crate::sbom_generation::services::{MergeOutcome, SbomMerger};

/// Name of the binary CVE scanner whose reports are merged
pub const SCANNER_NAME: &str = "cve-bin-tool";
pub const SCANNER_AUTHOR: &str = "intel";

/// MergeScanReportUseCase - Folds a binary scanner's findings into an SBOM
///
/// Products named in the findings are added as components first; each
/// finding then references the first component carrying its product name.
///
/// # Type Parameters
/// * `P` - ProgressReporter implementation
pub struct MergeScanReportUseCase<P> {
    progress_reporter: P,
}

impl<P: ProgressReporter> MergeScanReportUseCase<P> {
    pub fn new(progress_reporter: P) -> Self {
        Self { progress_reporter }
    }

    /// Merges the findings into `base`
    ///
    /// # Arguments
    /// * `base` - SBOM produced by the SBOM generator
    /// * `findings` - Records of the scanner's JSON report
    /// * `scanner_version` - Version reported by the scanner, if it could be queried
    pub fn execute(
        &self,
        base: &SbomDocument,
        findings: &[ScanFinding],
        scanner_version: Option<&str>,
    ) -> MergeOutcome {
        self.progress_reporter.report(&format!(
            "🧩 Merging {} scanner finding(s)",
            findings.len()
        ));

        let components: Vec<Component> = findings
            .iter()
            .map(|f| Component::library(f.product.as_str(), f.version.as_str()))
            .collect();
        let with_components = SbomMerger::merge(base, components, vec![], vec![]);
        let document = &with_components.document;

        let mut vulnerabilities = Vec::new();
        for finding in findings {
            let Some(score) = finding.score_value() else {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: {} for {} has no numeric score ({}); skipping",
                    finding.cve_number, finding.product, finding.score
                ));
                continue;
            };
            let Some(affected_ref) = document
                .find_component_by_name(&finding.product)
                .and_then(|c| c.bom_ref())
            else {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: no component with a bom-ref for {}; skipping {}",
                    finding.product, finding.cve_number
                ));
                continue;
            };

            let source = if finding.source.trim().is_empty() {
                SCANNER_NAME
            } else {
                finding.source.as_str()
            };
            vulnerabilities.push(VulnerabilityRecord::new(
                finding.cve_number.as_str(),
                source,
                Rating::new(Severity::parse(&finding.severity), None, score),
                affected_ref,
                None,
            ));
        }

        let mut scanner = ToolComponent::application(SCANNER_NAME).with_author(SCANNER_AUTHOR);
        if let Some(version) = scanner_version {
            scanner = scanner.with_version(version);
        }

        let merged = SbomMerger::merge(
            document,
            vec![],
            vulnerabilities,
            vec![scanner, own_tool_entry()],
        );

        let outcome = MergeOutcome {
            components_added: with_components.components_added,
            components_skipped: with_components.components_skipped,
            ..merged
        };
        report_merge_outcome(&self.progress_reporter, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn finding(product: &str, version: &str, cve: &str, score: Value) -> ScanFinding {
        ScanFinding {
            product: product.to_string(),
            version: version.to_string(),
            cve_number: cve.to_string(),
            severity: "HIGH".to_string(),
            score,
            source: "NVD".to_string(),
        }
    }

    fn syft_base() -> SbomDocument {
        SbomDocument::from_json(
            r#"{
                "bomFormat": "CycloneDX",
                "metadata": {"tools": {"components": [{"type": "application", "author": "anchore", "name": "syft", "version": "1.0.0"}]}},
                "components": [{"bom-ref": "pkg:generic/zlib@1.2.11?package-id=abc", "type": "library", "name": "zlib", "version": "1.2.11"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_merges_findings() {
        let findings = vec![
            finding("zlib", "1.2.11", "CVE-2018-25032", json!("7.5")),
            finding("binutils", "2.38", "CVE-2022-38533", json!(5.5)),
            finding("binutils", "2.38", "CVE-2022-38126", json!("5.5")),
        ];

        let outcome = MergeScanReportUseCase::new(SilentReporter).execute(&syft_base(), &findings, Some("3.4"));

        assert_eq!(outcome.components_added, 1);
        assert_eq!(outcome.vulnerabilities_added, 3);
        let vulns = outcome.document.vulnerabilities();
        assert_eq!(vulns[0].affects()[0].reference, "pkg:generic/zlib@1.2.11?package-id=abc");
        assert_eq!(vulns[1].affects()[0].reference, "binutils@2.38");
        assert_eq!(vulns[0].ratings()[0].severity.as_deref(), Some("high"));
        assert_eq!(vulns[0].ratings()[0].method, None);

        let tools: Vec<_> = outcome.document.tools().iter().map(|t| t.name.clone()).collect();
        assert_eq!(tools, vec!["syft", "cve-bin-tool", "toolchain-sbom"]);
        let scanner = &outcome.document.tools()[1];
        assert_eq!(scanner.author.as_deref(), Some("intel"));
        assert_eq!(scanner.version.as_deref(), Some("3.4"));
    }

    #[test]
    fn test_skips_unparsable_score() {
        let findings = vec![finding("zlib", "1.2.11", "CVE-2018-25032", json!("unknown"))];

        let outcome = MergeScanReportUseCase::new(SilentReporter).execute(&syft_base(), &findings, None);

        assert_eq!(outcome.vulnerabilities_added, 0);
        assert!(outcome.document.vulnerabilities().is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let findings = vec![finding("binutils", "2.38", "CVE-2022-38533", json!(5.5))];
        let use_case = MergeScanReportUseCase::new(SilentReporter);

        let first = use_case.execute(&syft_base(), &findings, Some("3.4"));
        let second = use_case.execute(&first.document, &findings, Some("3.4"));

        assert_eq!(second.document, first.document);
        assert_eq!(second.components_added, 0);
        assert_eq!(second.vulnerabilities_added, 0);
    }
}
