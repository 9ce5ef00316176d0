// src/filter.rs
//! Filter state and the per-dimension inclusion predicates.
//!
//! A record is kept iff every active predicate passes. A predicate whose
//! field holds its "no constraint" sentinel is skipped without comparing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ContentRecord;

// --- sentinels ---
pub const ALL_CATEGORIES: &str = "All Categories";
pub const ALL_TYPES: &str = "All Types";
pub const ALL_PUBLISHERS: &str = "All Publishers";
pub const ALL_TIME: &str = "All Time";

/// Recency windows selectable through `FilterState::duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyWindow {
    Last24Hours,
    Last48Hours,
    Last7Days,
    Last30Days,
}

impl RecencyWindow {
    pub const ALL: [RecencyWindow; 4] = [
        RecencyWindow::Last24Hours,
        RecencyWindow::Last48Hours,
        RecencyWindow::Last7Days,
        RecencyWindow::Last30Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecencyWindow::Last24Hours => "Last 24 hours",
            RecencyWindow::Last48Hours => "Last 48 hours",
            RecencyWindow::Last7Days => "Last 7 Days",
            RecencyWindow::Last30Days => "Last 30 Days",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.label() == label)
    }

    /// Maximum age (inclusive) a record may have to stay in the window.
    pub fn threshold(self) -> Duration {
        match self {
            RecencyWindow::Last24Hours => Duration::days(1),
            RecencyWindow::Last48Hours => Duration::days(2),
            RecencyWindow::Last7Days => Duration::days(7),
            RecencyWindow::Last30Days => Duration::days(30),
        }
    }
}

/// Current filter and sort selections of one view session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub keywords: String,
    /// Read and written by the UI but never constrains results.
    pub platform: String,
    pub content_type: String,
    /// Free-text publisher filter, matched against the raw source id.
    pub publication: String,
    pub category: String,
    pub duration: String,
    pub sort_by_likes: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            platform: ALL_PUBLISHERS.to_string(),
            content_type: ALL_TYPES.to_string(),
            publication: String::new(),
            category: ALL_CATEGORIES.to_string(),
            duration: ALL_TIME.to_string(),
            sort_by_likes: false,
        }
    }
}

impl FilterState {
    /// Full inclusion decision, evaluated in pipeline order:
    /// category, keyword, platform, publication, content type, recency.
    pub fn matches(&self, record: &ContentRecord, now: DateTime<Utc>) -> bool {
        self.matches_category(record)
            && self.matches_keywords(record)
            && self.matches_platform(record)
            && self.matches_publication(record)
            && self.matches_content_type(record)
            && self.matches_recency(record, now)
    }

    pub fn matches_category(&self, record: &ContentRecord) -> bool {
        if self.category.is_empty() || self.category == ALL_CATEGORIES {
            return true;
        }
        record
            .category
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            == self.category.to_lowercase()
    }

    pub fn matches_keywords(&self, record: &ContentRecord) -> bool {
        let needle = self.keywords.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        };
        hit(&record.title) || hit(&record.summary)
    }

    /// Platform never constrains results; the field exists for the UI contract only.
    pub fn matches_platform(&self, _record: &ContentRecord) -> bool {
        true
    }

    /// Substring match against the raw `source_id`, not the resolved display
    /// name: typing "Newsweek" does not match a record whose source id is "2".
    pub fn matches_publication(&self, record: &ContentRecord) -> bool {
        let needle = self.publication.trim();
        if needle.is_empty() {
            return true;
        }
        record
            .source_id
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    pub fn matches_content_type(&self, record: &ContentRecord) -> bool {
        if self.content_type.is_empty() || self.content_type == ALL_TYPES {
            return true;
        }
        record.kind.as_deref().unwrap_or_default().to_lowercase()
            == self.content_type.to_lowercase()
    }

    /// Elapsed time since `published_at`, measured at `now`, must not exceed
    /// the window. Records without a parseable publish time are excluded while
    /// a window is active. An unrecognized window label only requires presence.
    pub fn matches_recency(&self, record: &ContentRecord, now: DateTime<Utc>) -> bool {
        if self.duration.is_empty() || self.duration == ALL_TIME {
            return true;
        }
        if record.published_at.is_none() {
            return false;
        }
        let Some(window) = RecencyWindow::from_label(&self.duration) else {
            return true;
        };
        match record.published() {
            Some(published) => now - published <= window.threshold(),
            None => false,
        }
    }

    /// Number of dimensions currently constraining results (platform excluded).
    pub fn active_constraints(&self) -> usize {
        [
            !self.keywords.trim().is_empty(),
            !self.publication.trim().is_empty(),
            !self.content_type.is_empty() && self.content_type != ALL_TYPES,
            !self.category.is_empty() && self.category != ALL_CATEGORIES,
            !self.duration.is_empty() && self.duration != ALL_TIME,
        ]
        .into_iter()
        .filter(|on| *on)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    fn record(id: &str) -> ContentRecord {
        ContentRecord::new(id, format!("https://example.com/{id}"))
    }

    #[test]
    fn keyword_is_trimmed_and_case_insensitive() {
        let mut r = record("a1");
        r.title = Some("Steelers make playoffs".into());
        r.summary = Some("Tomlin reacts".into());

        let mut f = FilterState {
            keywords: "STEELERS ".into(),
            ..FilterState::default()
        };
        assert!(f.matches(&r, now()));

        f.keywords = "chargers".into();
        assert!(!f.matches(&r, now()));

        f.keywords = "tomlin".into();
        assert!(f.matches(&r, now()), "summary is searched too");
    }

    #[test]
    fn keyword_skips_absent_fields() {
        let mut r = record("a1");
        r.summary = Some("Playoff picture".into());
        let f = FilterState {
            keywords: "playoff".into(),
            ..FilterState::default()
        };
        assert!(f.matches_keywords(&r));

        let bare = record("a2");
        assert!(!f.matches_keywords(&bare));
        assert!(FilterState::default().matches_keywords(&bare));
    }

    #[test]
    fn category_compares_case_insensitively_with_absent_as_empty() {
        let mut r = record("a1");
        r.category = Some("nfl".into());
        let f = FilterState {
            category: "NFL".into(),
            ..FilterState::default()
        };
        assert!(f.matches_category(&r));
        assert!(!f.matches_category(&record("a2")));
    }

    #[test]
    fn publication_matches_raw_source_id_only() {
        let mut r = record("a1");
        r.source_id = Some("2".into()); // resolves to "Newsweek" in the source table

        let by_name = FilterState {
            publication: "Newsweek".into(),
            ..FilterState::default()
        };
        assert!(!by_name.matches_publication(&r));

        let by_id = FilterState {
            publication: " 2 ".into(),
            ..FilterState::default()
        };
        assert!(by_id.matches_publication(&r));

        let mut msn = record("a3");
        msn.source_id = Some("FoxSports Digital".into());
        let partial = FilterState {
            publication: "foxsports".into(),
            ..FilterState::default()
        };
        assert!(partial.matches_publication(&msn));
        assert!(!partial.matches_publication(&record("a4")));
    }

    #[test]
    fn platform_never_constrains() {
        let f = FilterState {
            platform: "MSN".into(),
            ..FilterState::default()
        };
        assert!(f.matches(&record("a1"), now()));
        assert_eq!(f.active_constraints(), 0);
    }

    #[test]
    fn content_type_compares_case_insensitively() {
        let mut r = record("a1");
        r.kind = Some("Video".into());
        let f = FilterState {
            content_type: "video".into(),
            ..FilterState::default()
        };
        assert!(f.matches_content_type(&r));
        assert!(!f.matches_content_type(&record("a2")));
    }

    #[test]
    fn recency_boundary_is_inclusive() {
        let f = FilterState {
            duration: "Last 24 hours".into(),
            ..FilterState::default()
        };

        let mut inside = record("in");
        inside.published_at = Some("2024-01-09T00:00:01Z".into());
        assert!(f.matches_recency(&inside, now()));

        let mut exact = record("edge");
        exact.published_at = Some("2024-01-09T00:00:00Z".into());
        assert!(f.matches_recency(&exact, now()));

        let mut outside = record("out");
        outside.published_at = Some("2024-01-08T23:59:59Z".into());
        assert!(!f.matches_recency(&outside, now()));
    }

    #[test]
    fn recency_excludes_absent_and_malformed_dates() {
        let f = FilterState {
            duration: "Last 30 Days".into(),
            ..FilterState::default()
        };
        assert!(!f.matches_recency(&record("none"), now()));

        let mut bad = record("bad");
        bad.published_at = Some("1 day ago".into());
        assert!(!f.matches_recency(&bad, now()));

        assert!(FilterState::default().matches_recency(&record("none"), now()));
    }

    #[test]
    fn recency_windows_map_to_day_thresholds() {
        assert_eq!(RecencyWindow::from_label("Last 48 hours"), Some(RecencyWindow::Last48Hours));
        assert_eq!(RecencyWindow::Last7Days.threshold(), Duration::days(7));
        assert_eq!(RecencyWindow::from_label("last 7 days"), None);

        let f = FilterState {
            duration: "Last 7 Days".into(),
            ..FilterState::default()
        };
        let mut r = record("a");
        r.published_at = Some("2024-01-03T00:00:00Z".into());
        assert!(f.matches_recency(&r, now()));
        r.published_at = Some("2024-01-02T23:00:00Z".into());
        assert!(!f.matches_recency(&r, now()));
    }

    #[test]
    fn default_state_has_no_active_constraints() {
        let f = FilterState::default();
        assert_eq!(f.active_constraints(), 0);
        assert_eq!(f.platform, ALL_PUBLISHERS);
        assert_eq!(f.duration, ALL_TIME);
        assert!(!f.sort_by_likes);
    }
}
