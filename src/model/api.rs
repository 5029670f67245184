use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Upper bound for `entries` on every paginated endpoint.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// One page of results plus the numbers needed to render pagination controls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    /// Total number of matching rows across all pages.
    pub total: u64,
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> PageDto<T> {
    /// Maps every item while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageDto<U> {
        PageDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Deserialize, Debug, Clone, IntoParams)]
pub struct PaginationParams {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            entries: default_entries(),
        }
    }
}

impl PaginationParams {
    /// Returns `(page, per_page)` with `per_page` clamped to `1..=100`.
    pub fn clamped(&self) -> (u64, u64) {
        clamp_page(self.page, self.entries)
    }
}

pub fn default_entries() -> u64 {
    10
}

/// Clamps the requested page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page(page: u64, entries: u64) -> (u64, u64) {
    (page, entries.clamp(1, MAX_PAGE_SIZE))
}

/// Number of pages needed to hold `total` rows.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
