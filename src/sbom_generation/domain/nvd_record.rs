use serde::Deserialize;

/// One page of an NVD keyword search
///
/// Entries that could not be read are counted in `unreadable` rather than
/// failing the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvePage {
    pub items: Vec<NvdItem>,
    pub unreadable: usize,
    pub total_results: Option<u32>,
}

/// An element of the `vulnerabilities` array
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdItem {
    #[serde(default)]
    pub cve: Option<NvdCve>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdCve {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<NvdDescription>,
    #[serde(default)]
    pub configurations: Vec<NvdConfiguration>,
    #[serde(default)]
    pub metrics: Option<NvdMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdDescription {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdConfiguration {
    #[serde(default)]
    pub nodes: Vec<NvdNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdNode {
    #[serde(rename = "cpeMatch", default)]
    pub cpe_match: Vec<NvdCpeMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdCpeMatch {
    #[serde(default)]
    pub vulnerable: bool,
    #[serde(default)]
    pub criteria: Option<String>,
    #[serde(rename = "versionEndIncluding", default)]
    pub version_end_including: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdMetrics {
    #[serde(rename = "cvssMetricV2", default)]
    pub cvss_metric_v2: Vec<NvdCvssMetricV2>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdCvssMetricV2 {
    #[serde(rename = "cvssData", default)]
    pub cvss_data: Option<NvdCvssData>,
    #[serde(rename = "baseSeverity", default)]
    pub base_severity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NvdCvssData {
    #[serde(rename = "baseScore", default)]
    pub base_score: Option<f64>,
}
