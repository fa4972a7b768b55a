//! Page arithmetic for slicing the canonical collection

use serde::{Deserialize, Serialize};

/// Page sizes offered to users.
pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];

/// One page of a list: `items[start..end]` out of `pages` pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paging {
    pub pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Compute the slice bounds of a one-based `page`.
///
/// `page` is clamped into `1..=pages`. An empty list or a zero page size
/// gives zero pages and an empty slice.
#[must_use]
pub fn paging(items: usize, page_size: usize, page: usize) -> Paging {
    if items == 0 || page_size == 0 {
        return Paging::default();
    }

    let pages = items.div_ceil(page_size);
    let page = page.clamp(1, pages);
    Paging {
        pages,
        start: (page - 1) * page_size,
        end: (page * page_size).min(items),
    }
}
