// src/pagination.rs
//! Fixed-size page window over the filtered and sorted sequence.

use serde::Serialize;

/// Rows per page.
pub const PAGE_SIZE: usize = 15;

/// `ceil(count / PAGE_SIZE)`; zero items yield zero pages.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Current page cursor (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Back to page 1. Called whenever the underlying sequence changes.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to page `n`. Out-of-range requests (`n < 1` or `n > total_pages`)
    /// are ignored and return `false`.
    pub fn go_to_page(&mut self, n: usize, total_pages: usize) -> bool {
        if n < 1 || n > total_pages {
            return false;
        }
        self.current_page = n;
        true
    }

    /// Pull the cursor back to the last page when the sequence shrank.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    /// Slice the current page out of `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.current_page)
    }

    /// Owned page view over `items`.
    pub fn view<T: Clone>(&self, items: &[T]) -> PageView<T> {
        PageView::new(items, self.current_page)
    }
}

fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One rendered page plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first shown item ("Showing a-b of n"); 0 when empty.
    pub range_start: usize,
    pub range_end: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Explicit empty state: nothing matched, no page to show.
    pub is_empty: bool,
}

impl<T: Clone> PageView<T> {
    /// `current_page` is clamped into `1..=max(total_pages, 1)`.
    pub fn new(items: &[T], current_page: usize) -> Self {
        let total_items = items.len();
        let total_pages = total_pages(total_items);
        let current_page = current_page.clamp(1, total_pages.max(1));
        let window = page_slice(items, current_page);
        let (range_start, range_end) = if window.is_empty() {
            (0, 0)
        } else {
            let start = (current_page - 1) * PAGE_SIZE + 1;
            (start, start + window.len() - 1)
        };
        Self {
            items: window.to_vec(),
            current_page,
            total_pages,
            total_items,
            range_start,
            range_end,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            is_empty: total_items == 0,
        }
    }
}

impl<T> PageView<T> {
    /// Convert each row while keeping the navigation metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageView<U> {
        PageView {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            range_start: self.range_start,
            range_end: self.range_end,
            has_previous: self.has_previous,
            has_next: self.has_next,
            is_empty: self.is_empty,
        }
    }
}
