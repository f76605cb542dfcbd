//! Fixed-size pagination over a filtered listing.

/// Codes shown per page.
pub const PAGE_SIZE: usize = 10;

/// A borrowed window into a listing. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Number of pages for `len` items. An empty listing still has one page.
pub fn total_pages(len: usize) -> usize {
    ((len + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// Clamps a requested page number into `[1, total_pages(len)]`.
pub fn clamp_page(requested: usize, len: usize) -> usize {
    requested.clamp(1, total_pages(len))
}

/// Returns the requested page, clamped into range.
pub fn page_of<T>(items: &[T], requested: usize) -> Page<'_, T> {
    let number = clamp_page(requested, items.len());
    let start = (number - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages: total_pages(items.len()),
        total_items: items.len(),
    }
}
