//! Page arithmetic for the encounter history list
//!
//! Pure functions only; the reactive side lives in
//! [`crate::encounter_history`]. Pages are 1-indexed and the page size is a
//! fixed constant.

/// Rows per history page.
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total` rows, never less than 1.
///
/// An empty result set still has one (empty) page so the pager always has a
/// valid position to display.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    total.div_ceil(page_size as u64).max(1) as u32
}

/// Clamp `page` into the valid range `[1, total_pages]`.
pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
    page.max(1).min(total_pages(total, page_size))
}

/// 1-indexed inclusive display range of the rows on `page`.
///
/// With `total == 0` this yields `(1, 0)`; the summary rendering collapses
/// that to its "1 of 1" sentinel instead of showing an inverted range.
pub fn row_range(page: u32, page_size: u32, total: u64) -> (u64, u64) {
    let first = (page as u64 - 1) * page_size as u64 + 1;
    let last = (first + page_size as u64 - 1).min(total);
    (first, last)
}

/// Whether a "previous page" move is legal.
pub fn can_retreat(page: u32) -> bool {
    page > 1
}

/// Whether a "next page" move is legal: false once the current page already
/// reaches the end of the result set.
pub fn can_advance(page: u32, page_size: u32, total: u64) -> bool {
    (page as u64) * (page_size as u64) < total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_stays_in_bounds_for_all_inputs() {
        for total in 0..=57u64 {
            for page in 0..=12u32 {
                let clamped = clamp_page(page, total, PAGE_SIZE);
                let upper = total.div_ceil(PAGE_SIZE as u64).max(1) as u32;
                assert!(clamped >= 1, "page {page} total {total}");
                assert!(clamped <= upper, "page {page} total {total}");
            }
        }
    }

    #[test]
    fn clamp_page_passes_legal_pages_through() {
        assert_eq!(clamp_page(2, 25, PAGE_SIZE), 2);
        assert_eq!(clamp_page(3, 25, PAGE_SIZE), 3);
    }

    #[test]
    fn clamp_page_repairs_out_of_range_pages() {
        assert_eq!(clamp_page(0, 25, PAGE_SIZE), 1);
        assert_eq!(clamp_page(7, 25, PAGE_SIZE), 3);
        assert_eq!(clamp_page(7, 0, PAGE_SIZE), 1);
    }

    #[test]
    fn row_range_covers_full_and_partial_pages() {
        assert_eq!(row_range(1, PAGE_SIZE, 25), (1, 10));
        assert_eq!(row_range(2, PAGE_SIZE, 25), (11, 20));
        assert_eq!(row_range(3, PAGE_SIZE, 25), (21, 25));
    }

    #[test]
    fn row_range_with_no_rows_is_the_sentinel_shape() {
        assert_eq!(row_range(1, PAGE_SIZE, 0), (1, 0));
    }

    #[test]
    fn navigation_legality_matches_the_boundaries() {
        assert!(!can_retreat(1));
        assert!(can_retreat(2));

        assert!(can_advance(1, PAGE_SIZE, 25));
        assert!(can_advance(2, PAGE_SIZE, 25));
        assert!(!can_advance(3, PAGE_SIZE, 25));
        assert!(!can_advance(1, PAGE_SIZE, 10));
        assert!(!can_advance(1, PAGE_SIZE, 0));
    }
}
