use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Client-side paging over the current result set. Everything is derived
/// from the item count, the page size and the requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Direct page entry. Anything that is not a number becomes page 0, which
/// the clamp turns into the first page; fractions are truncated.
pub fn parse_page_input(input: &str) -> i64 {
    let trimmed = input.trim();
    if let Ok(page) = trimmed.parse::<i64>() {
        return page;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
        .unwrap_or(0)
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// A new result set always starts over on the first page.
    pub fn with_total(self, total_items: usize) -> Self {
        Self {
            page: 1,
            total_items,
            ..self
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            ..self
        }
    }

    pub fn go_to(self, requested: i64) -> Self {
        let last = self.total_pages() as i64;
        Self {
            page: requested.clamp(1, last) as usize,
            ..self
        }
    }

    pub fn first(self) -> Self {
        self.go_to(1)
    }

    pub fn prev(self) -> Self {
        self.go_to(self.page as i64 - 1)
    }

    pub fn next(self) -> Self {
        self.go_to(self.page as i64 + 1)
    }

    pub fn last(self) -> Self {
        self.go_to(self.total_pages() as i64)
    }

    /// Index range of the visible slice, bounded by the item count.
    pub fn slice_range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }
}
