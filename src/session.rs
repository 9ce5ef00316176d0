// src/session.rs
//! Per-view dashboard session.
//!
//! Holds the active tab and category, the filter store, the page cursor and
//! one slot per fetched feed. Every fetch carries a generation token; a
//! response whose token is no longer the slot's latest pending request is
//! discarded, so a late answer for an old selection never overwrites the
//! active one.

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;

use crate::filter::{FilterState, ALL_PUBLISHERS};
use crate::model::{social_samples, ContentCategory, ContentRecord, FeedKind, ViewTab};
use crate::pagination::{total_pages, PageView, Paginator};
use crate::pipeline;
use crate::retrieval::RetrievalError;
use crate::store::{FilterStore, FilterUpdate};

/// Load state of one feed slot. Loading, Ready and Failed exclude each other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet (or the tab is not fetched).
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Handle for one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub feed: FeedKind,
    pub category: ContentCategory,
}

/// What `complete_fetch` did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { records: usize },
    Failed { message: String },
    /// Superseded by a newer request for the same feed; state untouched.
    Stale,
}

#[derive(Debug, Clone, Default)]
struct FeedSlot {
    records: Vec<ContentRecord>,
    load: LoadState,
    category: Option<ContentCategory>,
    pending: Option<u64>,
}

/// Everything the display layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub tab: ViewTab,
    pub category: ContentCategory,
    pub load_state: LoadState,
    pub filters: FilterState,
    pub page: PageView<ContentRecord>,
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    tab: ViewTab,
    category: ContentCategory,
    filters: FilterStore,
    pager: Paginator,
    primary: FeedSlot,
    secondary: FeedSlot,
    social: Vec<ContentRecord>,
    next_generation: u64,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self {
            tab: ViewTab::default(),
            category: ContentCategory::default(),
            filters: FilterStore::new(),
            pager: Paginator::new(),
            primary: FeedSlot::default(),
            secondary: FeedSlot::default(),
            social: social_samples(),
            next_generation: 0,
        }
    }
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ViewTab {
        self.tab
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn filters(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    fn slot(&self, feed: FeedKind) -> &FeedSlot {
        match feed {
            FeedKind::Primary => &self.primary,
            FeedKind::Secondary => &self.secondary,
        }
    }

    fn slot_mut(&mut self, feed: FeedKind) -> &mut FeedSlot {
        match feed {
            FeedKind::Primary => &mut self.primary,
            FeedKind::Secondary => &mut self.secondary,
        }
    }

    /// Switch tab and category. Resets the page; for fetched tabs, starts a
    /// fetch and returns its ticket (the slot enters `Loading`).
    pub fn select(&mut self, tab: ViewTab, category: ContentCategory) -> Option<FetchTicket> {
        self.tab = tab;
        self.category = category;
        self.pager.reset();
        let feed = tab.feed()?;
        Some(self.begin_fetch(feed, category))
    }

    /// Start (or restart) a fetch for `feed`, superseding any pending one.
    pub fn begin_fetch(&mut self, feed: FeedKind, category: ContentCategory) -> FetchTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let slot = self.slot_mut(feed);
        slot.pending = Some(generation);
        slot.load = LoadState::Loading;
        tracing::debug!(target: "session", %feed, category = category.as_param(), generation, "fetch started");
        FetchTicket {
            generation,
            feed,
            category,
        }
    }

    /// Apply a fetch result if its ticket is still the latest for the feed.
    ///
    /// Success replaces the slot's records; failure clears them and stores the
    /// message. The page goes back to 1 only if the ticket matches the active
    /// tab and category.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ContentRecord>, RetrievalError>,
    ) -> FetchOutcome {
        let slot = self.slot_mut(ticket.feed);
        if slot.pending != Some(ticket.generation) {
            counter!("fetch_stale_discarded_total").increment(1);
            tracing::debug!(
                target: "session",
                feed = %ticket.feed,
                generation = ticket.generation,
                latest = ?slot.pending,
                "stale fetch result discarded"
            );
            return FetchOutcome::Stale;
        }

        slot.pending = None;
        slot.category = Some(ticket.category);
        let outcome = match result {
            Ok(records) => {
                let n = records.len();
                slot.records = records;
                slot.load = LoadState::Ready;
                FetchOutcome::Applied { records: n }
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(target: "session", feed = %ticket.feed, error = %e, "feed unavailable");
                slot.records.clear();
                slot.load = LoadState::Failed(message.clone());
                FetchOutcome::Failed { message }
            }
        };
        if self.tab.feed() == Some(ticket.feed) && self.category == ticket.category {
            self.pager.reset();
        }
        outcome
    }

    /// Records of the active tab (empty while loading or after an error).
    pub fn active_records(&self) -> &[ContentRecord] {
        match self.tab.feed() {
            None => &self.social,
            Some(feed) => {
                let slot = self.slot(feed);
                if slot.load == LoadState::Ready && slot.category == Some(self.category) {
                    &slot.records
                } else {
                    &[]
                }
            }
        }
    }

    pub fn load_state(&self) -> LoadState {
        match self.tab.feed() {
            None => LoadState::Ready,
            Some(feed) => self.slot(feed).load.clone(),
        }
    }

    /// Replace one filter field; the page goes back to 1.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        tracing::debug!(target: "session", field = update.field_name(), "filter updated");
        self.filters.set(update);
        self.pager.reset();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset_to_defaults();
        self.pager.reset();
    }

    /// Navigate; out-of-range pages are ignored and return `false`.
    ///
    /// The cursor is first pulled back inside the current page count, which
    /// can shrink between calls as records age out of a recency window.
    pub fn go_to_page(&mut self, page: usize, now: DateTime<Utc>) -> bool {
        let matched = pipeline::filter_and_sort(self.active_records(), self.filters.state(), now).len();
        let total = total_pages(matched);
        self.pager.clamp_to(total);
        self.pager.go_to_page(page, total)
    }

    /// Full recomputation of the displayed page at `now`. A cursor past the
    /// last page renders the last page.
    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        DashboardView {
            tab: self.tab,
            category: self.category,
            load_state: self.load_state(),
            filters: self.filters.state().clone(),
            page: pipeline::render(
                self.active_records(),
                self.filters.state(),
                self.pager.current_page(),
                now,
            ),
        }
    }
}

/// Dropdown vocabularies offered for a tab and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<&'static str>,
    pub publishers: Vec<&'static str>,
    pub content_types: Vec<&'static str>,
    pub durations: Vec<&'static str>,
}

pub fn category_options(tab: ViewTab, category: ContentCategory) -> &'static [&'static str] {
    match (tab, category) {
        (ViewTab::Articles, ContentCategory::Sports) => &["Cricket", "Sports", "NFL", "NBA", "F1"],
        (ViewTab::Articles, ContentCategory::PopCulture) => &["Music", "TV", "Movies", "Entertainment"],
        (ViewTab::Tier2, ContentCategory::Sports) => &[
            "Sports",
            "Cricket",
            "Football",
            "Tennis",
            "Basketball",
            "Hockey",
            "Badminton",
            "Motorsports",
        ],
        (ViewTab::Tier2, ContentCategory::PopCulture) => &[
            "Music",
            "TV",
            "Movies",
            "Lifestyle",
            "Business",
            "Celebrity",
            "Theatre",
            "Hollywood",
        ],
        (ViewTab::Social, _) => &[],
    }
}

/// Values of the (non-constraining) platform dropdown.
pub fn publisher_options(tab: ViewTab, category: ContentCategory) -> &'static [&'static str] {
    match (tab, category) {
        (ViewTab::Articles, _) => &["MSN"],
        (ViewTab::Tier2, ContentCategory::Sports) => &["FoxSports", "NDTV", "Sportstar", "The Print"],
        (ViewTab::Tier2, ContentCategory::PopCulture) => {
            &["People", "Variety", "TMZ", "Deadline", "EW", "Reporter"]
        }
        (ViewTab::Social, _) => &[],
    }
}

pub fn filter_options(tab: ViewTab, category: ContentCategory) -> FilterOptions {
    let mut publishers = vec![ALL_PUBLISHERS];
    publishers.extend_from_slice(publisher_options(tab, category));
    let mut categories = vec![crate::filter::ALL_CATEGORIES];
    categories.extend_from_slice(category_options(tab, category));
    let mut durations = vec![crate::filter::ALL_TIME];
    durations.extend(crate::filter::RecencyWindow::ALL.iter().map(|w| w.label()));
    FilterOptions {
        categories,
        publishers,
        content_types: vec![crate::filter::ALL_TYPES, "video", "article", "slideshow"],
        durations,
    }
}
