//! Pagination query parameters for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// `?page=&page_size=` query parameters, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: u64,
    /// Records per page (capped)
    #[serde(default = "default_page_size")]
    #[param(example = 100)]
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
