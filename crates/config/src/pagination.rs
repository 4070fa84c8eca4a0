use std::num::NonZeroUsize;
use std::ops::Range;

/// How listing pages are split, from `DEFAULT_PAGINATION`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    per_page: Option<NonZeroUsize>,
}

impl Pagination {
    pub fn new(per_page: Option<NonZeroUsize>) -> Self {
        Self { per_page }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn per_page(&self) -> Option<NonZeroUsize> {
        self.per_page
    }

    pub fn is_enabled(&self) -> bool {
        self.per_page.is_some()
    }

    /// Number of listing pages for `total` items; never less than one.
    pub fn page_count(&self, total: usize) -> usize {
        match self.per_page {
            Some(per_page) => total.div_ceil(per_page.get()).max(1),
            None => 1,
        }
    }

    /// Items on the 1-based page `index`, or `None` past the last page.
    pub fn page(&self, total: usize, index: usize) -> Option<Range<usize>> {
        if index == 0 || self.page_count(total) < index {
            return None;
        }
        let range = match self.per_page {
            Some(per_page) => {
                let start = (index - 1) * per_page.get();
                start..(start + per_page.get()).min(total)
            }
            None => 0..total,
        };
        Some(range)
    }
}
