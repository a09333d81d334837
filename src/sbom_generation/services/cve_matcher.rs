use super::version_matcher::VersionMatcher;
use crate::sbom_generation::domain::nvd_record::{NvdCve, NvdItem};
use crate::sbom_generation::domain::CveMatch;

/// Outcome of inspecting one database entry for a target version
#[derive(Debug, Clone, PartialEq)]
pub enum EntryVerdict {
    /// A vulnerable CPE bound covers the version and the entry is fully scored
    Affected {
        cve: CveMatch,
        version_end_including: String,
    },
    /// No vulnerable CPE bound covers the version
    NotAffected,
    /// The entry lacks a field needed to evaluate or record it
    Incomplete,
}

/// CveMatcher applies the CPE upper-bound rule to database entries
pub struct CveMatcher;

impl CveMatcher {
    /// Inspects the nodes of the entry's first configuration.
    ///
    /// Scanning stops at the first vulnerable `cpeMatch` whose
    /// `versionEndIncluding` bound covers `version`.
    pub fn evaluate(item: &NvdItem, version: &str) -> EntryVerdict {
        let Some(cve) = item.cve.as_ref() else {
            return EntryVerdict::Incomplete;
        };
        if cve.id.is_none() {
            return EntryVerdict::Incomplete;
        }
        let Some(configuration) = cve.configurations.first() else {
            return EntryVerdict::Incomplete;
        };

        let covering_bound = configuration
            .nodes
            .iter()
            .flat_map(|node| node.cpe_match.iter())
            .filter(|cpe| cpe.vulnerable)
            .filter_map(|cpe| cpe.version_end_including.as_deref())
            .find(|bound| VersionMatcher::is_version_affected(bound, version));

        match covering_bound {
            None => EntryVerdict::NotAffected,
            Some(bound) => match Self::to_match(cve) {
                Some(cve) => EntryVerdict::Affected {
                    cve,
                    version_end_including: bound.to_string(),
                },
                None => EntryVerdict::Incomplete,
            },
        }
    }

    /// Description, CVSS v2 base score and severity; all three are required
    fn to_match(cve: &NvdCve) -> Option<CveMatch> {
        let id = cve.id.clone()?;
        let description = cve.descriptions.first()?.value.clone()?;
        let metric = cve.metrics.as_ref()?.cvss_metric_v2.first()?;
        let score = metric.cvss_data.as_ref()?.base_score?;
        let severity = metric.base_severity.clone()?;

        Some(CveMatch {
            id,
            description,
            score,
            severity,
        })
    }
}
