use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use toolchain_sbom::prelude::*;
use toolchain_sbom::sbom_generation::domain::{CvePage, NvdItem};

/// Builds an NVD entry with one vulnerable CPE match bounded by `version_end_including`
pub fn nvd_item(id: &str, version_end_including: &str, score: f64, severity: &str) -> NvdItem {
    let value: Value = json!({
        "cve": {
            "id": id,
            "descriptions": [{"lang": "en", "value": format!("Description of {}", id)}],
            "configurations": [{
                "nodes": [{
                    "cpeMatch": [{
                        "vulnerable": true,
                        "criteria": "cpe:2.3:a:vendor:product:*:*:*:*:*:*:*:*",
                        "versionEndIncluding": version_end_including
                    }]
                }]
            }],
            "metrics": {
                "cvssMetricV2": [{
                    "cvssData": {"baseScore": score},
                    "baseSeverity": severity
                }]
            }
        }
    });
    serde_json::from_value(value).unwrap()
}

/// Mock CveRepository serving scripted pages per keyword
///
/// Page N of a keyword is the N-th scripted page; pages past the script
/// are empty. Every request is recorded as `(keyword, start_index, page_size)`.
#[derive(Default, Clone)]
pub struct MockCveRepository {
    pub pages: HashMap<String, Vec<Vec<NvdItem>>>,
    pub total_results: Option<u32>,
    pub requests: Arc<Mutex<Vec<(String, u32, u32)>>>,
    pub should_fail: bool,
}

impl MockCveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, keyword: &str, pages: Vec<Vec<NvdItem>>) -> Self {
        self.pages.insert(keyword.to_string(), pages);
        self
    }

    pub fn with_total_results(mut self, total: u32) -> Self {
        self.total_results = Some(total);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn get_requests(&self) -> Vec<(String, u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CveRepository for MockCveRepository {
    async fn search_page(
        &self,
        keyword: &str,
        start_index: u32,
        results_per_page: u32,
    ) -> Result<CvePage> {
        self.requests
            .lock()
            .unwrap()
            .push((keyword.to_string(), start_index, results_per_page));

        if self.should_fail {
            anyhow::bail!("Mock vulnerability database failure");
        }

        let page_index = (start_index / results_per_page) as usize;
        let items = self
            .pages
            .get(keyword)
            .and_then(|pages| pages.get(page_index))
            .cloned()
            .unwrap_or_default();

        Ok(CvePage {
            items,
            unreadable: 0,
            total_results: self.total_results,
        })
    }
}
