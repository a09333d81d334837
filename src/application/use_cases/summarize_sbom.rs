use crate::application::dto::SbomSummary;
use crate::sbom_generation::domain::{SbomDocument, Severity};
use std::collections::BTreeMap;

/// SummarizeSbomUseCase - Counts the components and vulnerabilities of a document
pub struct SummarizeSbomUseCase;

impl SummarizeSbomUseCase {
    pub fn execute(document: &SbomDocument) -> SbomSummary {
        let mut by_severity: BTreeMap<Severity, usize> = BTreeMap::new();
        for vulnerability in document.vulnerabilities() {
            *by_severity.entry(vulnerability.severity()).or_default() += 1;
        }

        SbomSummary {
            components: document.components().len(),
            vulnerabilities: document.vulnerabilities().len(),
            by_severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let document = SbomDocument::from_json(
            r#"{
                "components": [
                    {"bom-ref": "zlib@1.2.11", "type": "library", "name": "zlib", "version": "1.2.11"},
                    {"bom-ref": "glibc@2.40", "type": "library", "name": "glibc", "version": "2.40"}
                ],
                "vulnerabilities": [
                    {"id": "CVE-1", "ratings": [{"severity": "high", "score": 7.5}], "affects": [{"ref": "zlib@1.2.11"}]},
                    {"id": "CVE-2", "ratings": [{"severity": "HIGH", "score": 7.1}], "affects": [{"ref": "zlib@1.2.11"}]},
                    {"id": "CVE-3", "affects": [{"ref": "glibc@2.40"}]}
                ]
            }"#,
        )
        .unwrap();

        let summary = SummarizeSbomUseCase::execute(&document);

        assert_eq!(summary.components, 2);
        assert_eq!(summary.vulnerabilities, 3);
        assert_eq!(summary.by_severity.get(&Severity::High), Some(&2));
        assert_eq!(summary.by_severity.get(&Severity::Unknown), Some(&1));
    }

    #[test]
    fn test_summary_of_empty_document() {
        let summary = SummarizeSbomUseCase::execute(&SbomDocument::default());
        assert_eq!(summary.components, 0);
        assert_eq!(summary.vulnerabilities, 0);
        assert!(summary.by_severity.is_empty());
    }
}
