//! Pagination windowing and metadata.

use serde::Serialize;
use thiserror::Error;

/// Default page size for public listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Default page size for the admin listing.
pub const DEFAULT_ADMIN_PAGE_SIZE: u32 = 20;

/// Page size cap for public list and search endpoints.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Page size cap for admin endpoints.
pub const MAX_ADMIN_PAGE_SIZE: u32 = 100;

/// Rejected pagination parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageParamError {
    #[error("page must be a positive integer")]
    Page,
    #[error("pageSize must be a positive integer up to {0}")]
    PageSize(u32),
}

/// Validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Parse raw `page` and `pageSize` query values.
    ///
    /// Absent values take the given default; non-integer, non-positive,
    /// or over-cap values are rejected rather than silently clamped.
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self, PageParamError> {
        let page = match page {
            None => 1,
            Some(raw) => parse_positive(raw).ok_or(PageParamError::Page)?,
        };
        let page_size = match page_size {
            None => default_size,
            Some(raw) => {
                let size = parse_positive(raw).ok_or(PageParamError::PageSize(max_size))?;
                if size > max_size {
                    return Err(PageParamError::PageSize(max_size));
                }
                size
            }
        };
        Ok(Self { page, page_size })
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}

/// Page metadata reported alongside every windowed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Cut one page out of a fully sorted list.
///
/// A page past the end clamps down to the last valid page instead of
/// erroring, so a client that deletes the only item on page 4 still
/// gets a sensible response. An empty list reports one empty page.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (Vec<T>, PageMeta) {
    let total = items.len() as u64;
    let size = request.page_size;
    let total_pages = (total.max(1)).div_ceil(size as u64) as u32;
    let page = request.page.min(total_pages);

    let start = ((page - 1) * size) as usize;
    let window: Vec<T> = items.into_iter().skip(start).take(size as usize).collect();

    let meta = PageMeta {
        page,
        page_size: size,
        total,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    };

    (window, meta)
}
