/// 1-based pagination over an already filtered and sorted sequence.
///
/// Any upstream input change (filter, sort, page size) resets the current
/// page to 1; callers do that through `reset` / `set_page_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// ceil(len / page_size)
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Move to a page; requests outside [1, total_pages] are ignored
    pub fn set_page(&mut self, page: usize, len: usize) {
        if page >= 1 && page <= self.total_pages(len) {
            self.current_page = page;
        }
    }

    /// Changing the page size goes back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Called when any upstream filter or sort input changes
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// The slice for the current page, clipped to bounds
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
