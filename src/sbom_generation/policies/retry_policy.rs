use crate::shared::error::SbomError;
use std::time::Duration;

/// Pagination and back-off rules for the vulnerability database search
///
/// The database answers keyword searches page by page and throttles
/// unauthenticated clients, so every page without a hit is followed by a
/// fixed delay before the next one is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_pages: u32,
    page_size: u32,
    delay: Duration,
    exhaustive: bool,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_PAGES: u32 = 200;
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const DEFAULT_DELAY_SECS: u64 = 15;
    /// NVD rejects larger `resultsPerPage` values
    pub const MAX_PAGE_SIZE: u32 = 2000;

    pub fn new(max_pages: u32, page_size: u32, delay: Duration) -> Result<Self, SbomError> {
        if max_pages == 0 {
            return Err(SbomError::Validation {
                message: "max_pages must be at least 1".to_string(),
            });
        }
        if page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(SbomError::Validation {
                message: format!(
                    "page_size must be between 1 and {}, got {}",
                    Self::MAX_PAGE_SIZE,
                    page_size
                ),
            });
        }

        Ok(Self {
            max_pages,
            page_size,
            delay,
            exhaustive: false,
        })
    }

    /// Keep paging after the first page with matches and collect everything
    pub fn with_exhaustive(mut self, exhaustive: bool) -> Self {
        self.exhaustive = exhaustive;
        self
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// Offset of the first result on a 1-based page
    pub fn start_index(&self, page: u32) -> u32 {
        page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_pages: Self::DEFAULT_MAX_PAGES,
            page_size: Self::DEFAULT_PAGE_SIZE,
            delay: Duration::from_secs(Self::DEFAULT_DELAY_SECS),
            exhaustive: false,
        }
    }
}
