// src/retrieval/mod.rs
//! Boundary to the external retrieval service.
//!
//! Field renaming and text cleanup happen here, so everything past this module
//! works on `ContentRecord`s only.

pub mod error;
pub mod providers;
pub mod types;

pub use error::RetrievalError;
pub use providers::{HttpRetrieval, StaticRetrieval};
pub use types::{RetrievalService, WireRecord};

use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

use crate::model::{ContentRecord, FeedKind};

/// Upper bound on records per feed response.
pub const FETCH_LIMIT: usize = 100;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "retrieval_requests_total",
            "Feed requests sent to the retrieval service."
        );
        describe_counter!(
            "retrieval_errors_total",
            "Feed requests that failed (transport, status or decode)."
        );
        describe_counter!(
            "retrieval_records_dropped_total",
            "Records dropped at the boundary (duplicate id or over the limit)."
        );
        describe_counter!(
            "fetch_stale_discarded_total",
            "Responses discarded because a newer request superseded them."
        );
        describe_counter!("view_renders_total", "View pipeline recomputations.");
        describe_histogram!("retrieval_fetch_ms", "Feed fetch time in milliseconds.");
    });
}

/// Decode HTML entities, strip tags and collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[a-z][^>]*>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

fn clean_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| normalize_text(&s)).filter(|s| !s.is_empty())
}

fn clean_field(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `{feed}-{index}`, suffixed `-1`, `-2`, ... while it clashes with a service id.
fn positional_id(feed: FeedKind, index: usize, taken: &HashSet<String>) -> String {
    let base = format!("{}-{index}", feed.as_str());
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Map wire records onto `ContentRecord`s for `feed`.
///
/// Keeps at most `FETCH_LIMIT` records in service order. Missing ids get a
/// feed-scoped positional id that never shadows an id the service sent; a
/// repeated id keeps its first occurrence.
/// Primary-feed records without a fetch time reuse their publish time.
pub fn normalize_records(feed: FeedKind, raw: Vec<WireRecord>) -> Vec<ContentRecord> {
    let total = raw.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total.min(FETCH_LIMIT));
    let mut out = Vec::with_capacity(total.min(FETCH_LIMIT));

    let window: Vec<WireRecord> = raw.into_iter().take(FETCH_LIMIT).collect();
    let service_ids: HashSet<String> = window.iter().filter_map(WireRecord::resolved_id).collect();

    for (index, w) in window.into_iter().enumerate() {
        let id = w
            .resolved_id()
            .unwrap_or_else(|| positional_id(feed, index, &service_ids));
        if !seen.insert(id.clone()) {
            tracing::debug!(target: "retrieval", %feed, %id, "duplicate record id dropped");
            continue;
        }

        let likes = w.resolved_likes();
        let published_at = clean_field(w.published_at.or(w.published_date_time).or(w.published_at_raw));
        let mut fetched_at = clean_field(w.fetched_at.or(w.fetched_at_raw));
        if feed == FeedKind::Primary && fetched_at.is_none() {
            fetched_at = published_at.clone();
        }

        out.push(ContentRecord {
            id,
            source_id: clean_field(w.source_id.or(w.provider).or(w.source)),
            title: clean_text(w.title),
            summary: clean_text(w.summary.or(w.abstract_text)),
            url: w.url.map(|u| u.trim().to_string()).unwrap_or_default(),
            published_at,
            fetched_at,
            category: clean_field(w.category),
            kind: clean_field(w.kind),
            likes,
            is_viral: w.is_viral,
        });
    }

    let dropped = total - out.len();
    if dropped > 0 {
        counter!("retrieval_records_dropped_total").increment(dropped as u64);
    }
    out
}
