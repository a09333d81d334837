use crate::sbom_generation::domain::{Component, SbomDocument, ToolComponent, VulnerabilityRecord};

/// Result of folding new entries into a document
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub document: SbomDocument,
    pub components_added: usize,
    /// Names of components skipped because the name or bom-ref already existed
    pub components_skipped: Vec<String>,
    pub vulnerabilities_added: usize,
    /// Ids of vulnerabilities skipped because the id already existed
    pub vulnerabilities_duplicate: Vec<String>,
    /// Ids of vulnerabilities dropped because an `affects` reference did not resolve
    pub vulnerabilities_unresolved: Vec<String>,
    pub tools_added: usize,
}

/// SbomMerger folds components, vulnerabilities and tools into a document
///
/// The base document is never modified; a merged copy is returned.
/// First write wins for every kind of entry.
pub struct SbomMerger;

impl SbomMerger {
    pub fn merge(
        base: &SbomDocument,
        components: Vec<Component>,
        vulnerabilities: Vec<VulnerabilityRecord>,
        tools: Vec<ToolComponent>,
    ) -> MergeOutcome {
        let mut document = base.clone();

        let mut components_added = 0;
        let mut components_skipped = Vec::new();
        for component in components {
            let ref_taken = component
                .bom_ref()
                .is_some_and(|bom_ref| document.has_bom_ref(bom_ref));
            if document.has_component_named(component.name()) || ref_taken {
                components_skipped.push(component.name().to_string());
                continue;
            }
            document.push_component(component);
            components_added += 1;
        }

        let mut vulnerabilities_added = 0;
        let mut vulnerabilities_duplicate = Vec::new();
        let mut vulnerabilities_unresolved = Vec::new();
        for vulnerability in vulnerabilities {
            if document.has_vulnerability(vulnerability.id()) {
                vulnerabilities_duplicate.push(vulnerability.id().to_string());
                continue;
            }
            let resolves = !vulnerability.affects().is_empty()
                && vulnerability
                    .affects()
                    .iter()
                    .all(|a| document.has_bom_ref(&a.reference));
            if !resolves {
                vulnerabilities_unresolved.push(vulnerability.id().to_string());
                continue;
            }
            document.push_vulnerability(vulnerability);
            vulnerabilities_added += 1;
        }

        let mut tools_added = 0;
        for tool in tools {
            if document.has_tool(&tool.name) {
                continue;
            }
            document.push_tool(tool);
            tools_added += 1;
        }

        MergeOutcome {
            document,
            components_added,
            components_skipped,
            vulnerabilities_added,
            vulnerabilities_duplicate,
            vulnerabilities_unresolved,
            tools_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{CveMatch, ComponentKind};

    fn base_with_zlib() -> SbomDocument {
        SbomMerger::merge(
            &SbomDocument::default(),
            vec![Component::library("zlib", "1.2.11")],
            vec![],
            vec![],
        )
        .document
    }

    fn zlib_cve(id: &str, affected_ref: &str) -> VulnerabilityRecord {
        VulnerabilityRecord::from_nvd_match(
            &CveMatch {
                id: id.to_string(),
                description: "zlib issue".to_string(),
                score: 5.0,
                severity: "MEDIUM".to_string(),
            },
            affected_ref,
        )
    }

    #[test]
    fn test_merge_appends_new_component() {
        let outcome = SbomMerger::merge(
            &base_with_zlib(),
            vec![Component::new("gcj", "unknown", ComponentKind::Compiler)],
            vec![],
            vec![],
        );
        assert_eq!(outcome.components_added, 1);
        assert_eq!(outcome.document.components().len(), 2);
        assert_eq!(outcome.document.components()[1].name(), "gcj");
    }

    #[test]
    fn test_merge_skips_component_with_existing_name() {
        let base = base_with_zlib();
        let outcome = SbomMerger::merge(
            &base,
            vec![Component::library("zlib", "1.2.13")],
            vec![],
            vec![],
        );
        assert_eq!(outcome.components_added, 0);
        assert_eq!(outcome.components_skipped, vec!["zlib".to_string()]);
        assert_eq!(outcome.document.components().len(), 1);
        assert_eq!(outcome.document.components()[0].version(), Some("1.2.11"));
        assert_eq!(outcome.document.components()[0].bom_ref(), Some("zlib@1.2.11"));
    }

    #[test]
    fn test_merge_skips_duplicate_names_within_batch() {
        let outcome = SbomMerger::merge(
            &SbomDocument::default(),
            vec![
                Component::library("glibc", "2.40"),
                Component::library("glibc", "2.39"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(outcome.components_added, 1);
        assert_eq!(outcome.document.components()[0].version(), Some("2.40"));
    }

    #[test]
    fn test_merge_adds_vulnerability_with_resolved_reference() {
        let outcome = SbomMerger::merge(
            &base_with_zlib(),
            vec![],
            vec![zlib_cve("CVE-2022-37434", "zlib@1.2.11")],
            vec![],
        );
        assert_eq!(outcome.vulnerabilities_added, 1);
        assert_eq!(outcome.document.vulnerabilities()[0].affects()[0].reference, "zlib@1.2.11");
    }

    #[test]
    fn test_merge_skips_duplicate_vulnerability() {
        let first = SbomMerger::merge(
            &base_with_zlib(),
            vec![],
            vec![zlib_cve("CVE-2022-37434", "zlib@1.2.11")],
            vec![],
        );
        let second = SbomMerger::merge(
            &first.document,
            vec![],
            vec![zlib_cve("CVE-2022-37434", "zlib@1.2.11")],
            vec![],
        );
        assert_eq!(second.vulnerabilities_added, 0);
        assert_eq!(second.vulnerabilities_duplicate, vec!["CVE-2022-37434".to_string()]);
        assert_eq!(second.document.vulnerabilities().len(), 1);
    }

    #[test]
    fn test_merge_drops_dangling_reference() {
        let outcome = SbomMerger::merge(
            &base_with_zlib(),
            vec![Component::library("zlib", "1.2.13")],
            vec![zlib_cve("CVE-2023-45853", "zlib@1.2.13")],
            vec![],
        );
        assert_eq!(outcome.vulnerabilities_added, 0);
        assert_eq!(outcome.vulnerabilities_unresolved, vec!["CVE-2023-45853".to_string()]);
        assert!(outcome.document.vulnerabilities().is_empty());
    }

    #[test]
    fn test_merge_resolves_against_components_added_in_same_merge() {
        let outcome = SbomMerger::merge(
            &SbomDocument::default(),
            vec![Component::library("glibc", "2.40")],
            vec![zlib_cve("CVE-2024-2961", "glibc@2.40")],
            vec![],
        );
        assert_eq!(outcome.components_added, 1);
        assert_eq!(outcome.vulnerabilities_added, 1);
    }

    #[test]
    fn test_merge_tools_dedup_by_name() {
        let tool = ToolComponent::application("toolchain-sbom");
        let first = SbomMerger::merge(&SbomDocument::default(), vec![], vec![], vec![tool.clone()]);
        let second = SbomMerger::merge(&first.document, vec![], vec![], vec![tool]);
        assert_eq!(first.tools_added, 1);
        assert_eq!(second.tools_added, 0);
        assert_eq!(second.document.tools().len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let components = vec![Component::library("glibc", "2.40")];
        let vulns = vec![zlib_cve("CVE-2024-2961", "glibc@2.40")];
        let tools = vec![ToolComponent::application("toolchain-sbom")];

        let once = SbomMerger::merge(
            &SbomDocument::default(),
            components.clone(),
            vulns.clone(),
            tools.clone(),
        );
        let twice = SbomMerger::merge(&once.document, components, vulns, tools);

        assert_eq!(once.document, twice.document);
    }

    #[test]
    fn test_merge_does_not_modify_base() {
        let base = base_with_zlib();
        let snapshot = base.clone();
        let _ = SbomMerger::merge(
            &base,
            vec![Component::library("glibc", "2.40")],
            vec![],
            vec![],
        );
        assert_eq!(base, snapshot);
    }
}
