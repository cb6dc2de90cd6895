pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Fixed-size page windows over an ordered list.
///
/// Pages are 1-indexed. Replacing the list does not move the current page;
/// callers must `reset` when the underlying list changes.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn with_default_size(items: Vec<T>) -> Self {
        Self::new(items, DEFAULT_PAGE_SIZE)
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Items on the current page. Empty when the page lies past the end.
    pub fn page_items(&self) -> &[T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Jump to `page`; out-of-range requests are ignored.
    pub fn go_to(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current_page -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Paginator::new((0..25).collect(), 12).total_pages(), 3);
        assert_eq!(Paginator::new((0..24).collect(), 12).total_pages(), 2);
        assert_eq!(Paginator::<u8>::new(vec![], 12).total_pages(), 0);
    }

    #[test]
    fn pages_slice_in_order() {
        let mut pages = Paginator::new((0..25).collect::<Vec<u32>>(), 12);
        assert_eq!(pages.page_items(), (0..12).collect::<Vec<_>>().as_slice());
        pages.go_to(3);
        assert_eq!(pages.page_items(), &[24]);
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut pages = Paginator::new((0..25).collect::<Vec<u32>>(), 12);
        pages.go_to(2);
        pages.go_to(0);
        assert_eq!(pages.current_page(), 2);
        pages.go_to(4);
        assert_eq!(pages.current_page(), 2);
    }

    #[test]
    fn next_and_previous_stop_at_bounds() {
        let mut pages = Paginator::new((0..5).collect::<Vec<u32>>(), 2);
        pages.previous();
        assert_eq!(pages.current_page(), 1);
        pages.next();
        pages.next();
        pages.next();
        assert_eq!(pages.current_page(), 3);
        assert!(!pages.has_next());
        assert!(pages.has_previous());
    }

    #[test]
    fn page_never_exceeds_size_or_list() {
        for len in 0..30usize {
            for size in 1..8usize {
                let mut pages = Paginator::new((0..len).collect::<Vec<_>>(), size);
                for page in 0..=pages.total_pages() + 1 {
                    pages.go_to(page);
                    assert!(pages.page_items().len() <= size, "len={len} size={size}");
                }
            }
        }
    }

    #[test]
    fn shrinking_list_without_reset_yields_empty_page() {
        let mut pages = Paginator::new((0..30).collect::<Vec<u32>>(), 12);
        pages.go_to(3);
        pages.set_items(vec![1, 2, 3]);
        assert_eq!(pages.current_page(), 3);
        assert!(pages.page_items().is_empty());
        pages.reset();
        assert_eq!(pages.page_items(), &[1, 2, 3]);
    }

    #[test]
    fn default_size_is_twelve() {
        let pages = Paginator::with_default_size(vec![0u8; 13]);
        assert_eq!(pages.page_size(), 12);
        assert_eq!(pages.total_pages(), 2);
    }
}
