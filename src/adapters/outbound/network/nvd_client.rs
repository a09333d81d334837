use crate::ports::outbound::CveRepository;
use crate::sbom_generation::domain::{CvePage, NvdItem};
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// NVD CVE API 2.0 client
///
/// Issues one keyword search per call. Paging and back-off are the
/// caller's concern.
///
/// # Security
/// - Implements timeout (30 seconds by default)
/// - Sends the API key only as the `apiKey` header, never in the URL
pub struct NvdClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl NvdClient {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    /// Creates a client for `endpoint`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("toolchain-sbom/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    fn search_url(&self, keyword: &str, start_index: u32, results_per_page: u32) -> String {
        format!(
            "{}?keywordSearch={}&resultsPerPage={}&startIndex={}",
            self.endpoint,
            urlencoding::encode(keyword),
            results_per_page,
            start_index
        )
    }

    /// Parses a response body into a page
    ///
    /// The body must be JSON. A missing `vulnerabilities` array is an empty
    /// page; elements that do not have the entry shape are counted and dropped.
    fn parse_page(url: &str, body: &str) -> Result<CvePage> {
        let value: Value = serde_json::from_str(body).map_err(|e| SbomError::MalformedApiResponse {
            url: url.to_string(),
            details: e.to_string(),
        })?;

        let total_results = value
            .get("totalResults")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());

        let mut page = CvePage {
            total_results,
            ..CvePage::default()
        };

        let Some(entries) = value.get("vulnerabilities").and_then(Value::as_array) else {
            return Ok(page);
        };

        for entry in entries {
            match serde_json::from_value::<NvdItem>(entry.clone()) {
                Ok(item) => page.items.push(item),
                Err(_) => page.unreadable += 1,
            }
        }

        Ok(page)
    }
}

#[async_trait]
impl CveRepository for NvdClient {
    async fn search_page(
        &self,
        keyword: &str,
        start_index: u32,
        results_per_page: u32,
    ) -> Result<CvePage> {
        let url = self.search_url(keyword, start_index, results_per_page);

        let mut request = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            request = request.header("apiKey", key);
        }

        let response = request.send().await.map_err(|e| SbomError::ApiRequestFailed {
            url: url.clone(),
            details: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SbomError::ApiRequestFailed {
                url,
                details: format!("NVD API returned status code {}", status),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| SbomError::ApiRequestFailed {
            url: url.clone(),
            details: e.to_string(),
        })?;

        Self::parse_page(&url, &body)
    }
}
