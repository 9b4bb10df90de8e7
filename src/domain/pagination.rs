/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW_SIZE: usize = 3;

/// Number of pages needed to show `len` items, `page_size` at a time.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items on a 1-based page. The last page may be shorter; page 0 and pages
/// past the end are empty.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> &[T] {
    if page_size == 0 || page_number == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page numbers to show around the current page.
///
/// The window slides so the current page sits in the middle, except near
/// either end of the range where it sticks to the first or last pages.
pub fn page_window(current: usize, page_count: usize) -> Vec<usize> {
    if page_count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, page_count);
    let span = PAGE_WINDOW_SIZE - 1;

    let (start, end) = if current + span > page_count {
        (page_count.saturating_sub(span).max(1), page_count)
    } else {
        let start = current.saturating_sub(1).max(1);
        (start, (start + span).min(page_count))
    };

    (start..=end).collect()
}
