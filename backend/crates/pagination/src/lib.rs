//! Offset pagination primitives for list endpoints.
//!
//! Every list endpoint accepts a 1-based `page` and a `pageSize` and answers
//! with a [`PaginatedResult`] envelope carrying the filtered total alongside
//! the requested slice. The arithmetic lives here so the repositories and the
//! HTTP layer agree on one definition of `offset`, `hasPrevious` and
//! `hasNext`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page used when the client omits `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the client omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Errors raised when constructing a [`PageRequest`] from client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are 1-based; zero and negative pages are rejected.
    #[error("page must be greater than or equal to 1")]
    PageOutOfRange,
    /// A page must hold at least one item.
    #[error("pageSize must be greater than or equal to 1")]
    PageSizeOutOfRange,
}

/// Validated 1-based page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `page_size >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Validate a page selection taken from client input.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is below 1.
    pub fn new(page: i64, page_size: i64) -> Result<Self, PageRequestError> {
        if page < 1 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if page_size < 1 {
            return Err(PageRequestError::PageSizeOutOfRange);
        }
        Ok(Self { page, page_size })
    }

    /// Requested page, 1-based.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Requested page size.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip before the requested page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the pre-pagination total.
///
/// `has_previous` and `has_next` are derived from the envelope at
/// construction: `has_previous = page > 1` and
/// `has_next = total_count > page * page_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Items on the requested page, in query order.
    pub items: Vec<T>,
    /// The 1-based page that was served.
    pub page: i64,
    /// The page size that was served.
    pub page_size: i64,
    /// Count of the filtered set before pagination.
    pub total_count: i64,
    /// Whether a page precedes this one.
    pub has_previous: bool,
    /// Whether the filtered set extends beyond this page.
    pub has_next: bool,
}

impl<T> PaginatedResult<T> {
    /// Assemble an envelope from a served slice and the filtered total.
    pub fn new(items: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        let PageRequest { page, page_size } = request;
        Self {
            items,
            page,
            page_size,
            total_count,
            has_previous: page > 1,
            has_next: total_count > page.saturating_mul(page_size),
        }
    }

    /// Convert the item type while keeping the envelope intact.
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        let Self {
            items,
            page,
            page_size,
            total_count,
            has_previous,
            has_next,
        } = self;
        PaginatedResult {
            items: items.into_iter().map(f).collect(),
            page,
            page_size,
            total_count,
            has_previous,
            has_next,
        }
    }
}
