//! In-memory pagination of listing collections.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// One page of a larger collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection.
    pub total: usize,
    /// 1-indexed page number.
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Slices `items` into the 1-indexed `page` of `limit` entries.
///
/// Pages past the end come back empty; `page` 0 is treated as page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Page<T> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(limit).min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        total: items.len(),
        page,
        limit,
        has_more: start.saturating_add(limit) < items.len(),
    }
}
