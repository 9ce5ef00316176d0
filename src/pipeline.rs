// src/pipeline.rs
//! View pipeline: filter → sort → paginate.
//!
//! Pure functions of (records, filter state, page, now). Every input change
//! triggers a full recomputation; nothing is cached between calls.

use chrono::{DateTime, Utc};
use metrics::counter;

use crate::filter::FilterState;
use crate::model::ContentRecord;
use crate::pagination::PageView;
use crate::sort::{sort_records, SortMode};

/// Apply every active predicate, then the selected sort mode.
pub fn filter_and_sort<'a>(
    records: &'a [ContentRecord],
    filters: &FilterState,
    now: DateTime<Utc>,
) -> Vec<&'a ContentRecord> {
    let mut kept: Vec<&ContentRecord> = records
        .iter()
        .filter(|r| filters.matches(r, now))
        .collect();
    sort_records(&mut kept, SortMode::from_sort_by_likes(filters.sort_by_likes));
    kept
}

/// Produce the displayed page for `page` (1-based).
pub fn render(
    records: &[ContentRecord],
    filters: &FilterState,
    page: usize,
    now: DateTime<Utc>,
) -> PageView<ContentRecord> {
    counter!("view_renders_total").increment(1);
    let ordered = filter_and_sort(records, filters, now);
    let page = PageView::new(&ordered, page);
    tracing::trace!(
        target: "pipeline",
        input = records.len(),
        matched = page.total_items,
        page = page.current_page,
        "view rendered"
    );
    page.map(|r| r.clone())
}
