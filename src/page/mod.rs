// src/page/mod.rs

/// One visible slice of an ordered sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Fixed-size pagination over an ordered sequence.
///
/// The page number is always clamped to `[1, total_pages]`; when the
/// underlying sequence shrinks below the current page, `sync_len` snaps back
/// to page 1.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Request a page; out-of-range requests clamp to the nearest valid page.
    pub fn set_page(&mut self, requested: usize, total: usize) {
        self.page = requested.clamp(1, self.total_pages(total));
    }

    /// Re-check the current page against a new sequence length; a page that
    /// no longer exists snaps back to 1.
    pub fn sync_len(&mut self, total: usize) {
        if self.page > self.total_pages(total) {
            self.page = 1;
        }
    }

    /// The 1-based page an absolute index lands on.
    pub fn page_of_index(&self, index: usize) -> usize {
        index / self.page_size + 1
    }

    /// Slice out the current page.
    pub fn view<'a, T>(&self, items: &'a [T]) -> PageView<'a, T> {
        let total_pages = self.total_pages(items.len());
        let page = self.page.clamp(1, total_pages);
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        // start can only exceed len on an empty sequence, where page == 1.
        let items = if start < items.len() {
            &items[start..end]
        } else {
            &items[0..0]
        };
        PageView {
            items,
            page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_records_at_twelve_per_page_is_three_pages() {
        let pager = Pager::new(12);
        assert_eq!(pager.total_pages(30), 3);
    }

    #[test]
    fn out_of_range_request_clamps_to_last_page() {
        let items: Vec<usize> = (0..30).collect();
        let mut pager = Pager::new(12);
        pager.set_page(5, items.len());
        let view = pager.view(&items);
        assert_eq!(view.page, 3);
        assert_eq!(view.items, &items[24..30]);
    }

    #[test]
    fn second_page_slices_twelve_to_twenty_four() {
        let items: Vec<usize> = (0..30).collect();
        let mut pager = Pager::new(12);
        pager.set_page(2, items.len());
        let view = pager.view(&items);
        assert_eq!(view.items, &items[12..24]);
    }

    #[test]
    fn zero_requests_clamp_up_to_page_one() {
        let mut pager = Pager::new(12);
        pager.set_page(0, 30);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn shrinking_sequence_snaps_back_to_page_one() {
        let mut pager = Pager::new(12);
        pager.set_page(3, 30);
        pager.sync_len(10);
        assert_eq!(pager.page(), 1);

        // Still in range: nothing moves.
        pager.set_page(1, 10);
        pager.sync_len(10);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn empty_sequence_still_has_one_page() {
        let pager = Pager::new(12);
        let items: Vec<usize> = Vec::new();
        let view = pager.view(&items);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.items.is_empty());
    }

    #[test]
    fn index_maps_to_its_page() {
        let pager = Pager::new(12);
        assert_eq!(pager.page_of_index(0), 1);
        assert_eq!(pager.page_of_index(11), 1);
        assert_eq!(pager.page_of_index(12), 2);
        assert_eq!(pager.page_of_index(29), 3);
    }
}
