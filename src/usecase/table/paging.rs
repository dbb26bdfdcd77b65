/// Number of pages for `row_count` rows. An empty table still has one page.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    row_count.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Current-page state behind the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    current: usize,
    total_pages: usize,
}

impl PageControl {
    pub fn new(total_pages: usize) -> Self {
        Self {
            current: 1,
            total_pages: total_pages.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Moves to `page` if it lies in `[1, total_pages]`; otherwise leaves state untouched.
    pub fn request(&mut self, page: usize) -> Option<usize> {
        if page == 0 || page > self.total_pages {
            return None;
        }
        self.current = page;
        Some(page)
    }

    pub fn clamp(&self, page: usize) -> usize {
        clamp_page(page, self.total_pages)
    }

    pub fn can_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn previous(&mut self) -> Option<usize> {
        if !self.can_previous() {
            return None;
        }
        self.request(self.current - 1)
    }

    pub fn next(&mut self) -> Option<usize> {
        if !self.can_next() {
            return None;
        }
        self.request(self.current + 1)
    }

    pub fn first(&mut self) -> usize {
        self.current = 1;
        self.current
    }

    pub fn last(&mut self) -> usize {
        self.current = self.total_pages;
        self.current
    }

    /// Row count changed; keep the current page inside the new range.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages.max(1);
        self.current = self.clamp(self.current);
    }
}

impl Default for PageControl {
    fn default() -> Self {
        Self::new(1)
    }
}
