use std::ops::{Range, RangeInclusive};

/// Most numbered page buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Number of pages for `len` items; an empty list still has one page.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(len, page_size))
}

/// Item range of a 1-based page, clamped to `len`.
pub fn page_bounds(page: usize, len: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = page.saturating_mul(page_size).min(len);
    start..end
}

/// Numbered buttons to show: up to [`MAX_PAGE_BUTTONS`] pages centered on
/// `current`, slid back inside `[1, total]` near the edges.
pub fn page_window(current: usize, total: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = (start + MAX_PAGE_BUTTONS - 1).min(total);
    if end - start < MAX_PAGE_BUTTONS - 1 {
        start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
    }
    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_zero() {
        assert_eq!(page_count(0, 25), 1);
        assert_eq!(page_count(1, 25), 1);
        assert_eq!(page_count(25, 25), 1);
        assert_eq!(page_count(26, 25), 2);
        assert_eq!(page_count(100, 10), 10);
    }

    #[test]
    fn pages_partition_the_list() {
        for len in [0usize, 1, 7, 24, 25, 26, 99] {
            for size in [1usize, 3, 10, 25] {
                let pages = page_count(len, size);
                let mut seen = Vec::new();
                for p in 1..=pages {
                    seen.extend(page_bounds(p, len, size));
                }
                assert_eq!(seen, (0..len).collect::<Vec<_>>(), "len={len} size={size}");
            }
        }
    }

    #[test]
    fn bounds_past_the_end_are_empty() {
        assert!(page_bounds(5, 10, 25).is_empty());
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(0, 30, 10), 1);
        assert_eq!(clamp_page(9, 30, 10), 3);
        assert_eq!(clamp_page(2, 0, 10), 1);
    }

    #[test]
    fn window_is_centered() {
        assert_eq!(page_window(5, 10), 3..=7);
    }

    #[test]
    fn window_slides_at_edges() {
        assert_eq!(page_window(1, 10), 1..=5);
        assert_eq!(page_window(2, 10), 1..=5);
        assert_eq!(page_window(10, 10), 6..=10);
        assert_eq!(page_window(9, 10), 6..=10);
    }

    #[test]
    fn window_shrinks_with_few_pages() {
        assert_eq!(page_window(2, 3), 1..=3);
        assert_eq!(page_window(1, 1), 1..=1);
    }
}
