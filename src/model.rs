// src/model.rs
//! Content records, the source lookup table, and feed/category selectors.
//!
//! Records are produced by the retrieval boundary and never mutated after
//! that; the view pipeline only selects, reorders and windows them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized unit of content flowing through the view pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Content kind (video / article / slideshow). Only the primary feed fills it.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub likes: Option<f64>,
    #[serde(default)]
    pub is_viral: Option<bool>,
}

impl ContentRecord {
    /// Minimal record; remaining fields default to absent.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_id: None,
            title: None,
            summary: None,
            url: url.into(),
            published_at: None,
            fetched_at: None,
            category: None,
            kind: None,
            likes: None,
            is_viral: None,
        }
    }

    /// Parsed `published_at`; absent and malformed values both yield `None`.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    pub fn fetched(&self) -> Option<DateTime<Utc>> {
        self.fetched_at.as_deref().and_then(parse_timestamp)
    }

    /// Epoch milliseconds used by the recency sort (0 when absent or unparsable).
    pub fn sort_timestamp(&self) -> i64 {
        self.published().map(|t| t.timestamp_millis()).unwrap_or(0)
    }

    pub fn likes_or_zero(&self) -> f64 {
        self.likes.unwrap_or(0.0)
    }
}

/// Parse an ISO-8601-ish timestamp into UTC.
///
/// Accepts RFC 3339 (`2024-01-09T00:00:01Z`, offsets allowed), a naive
/// date-time (`2024-01-09T00:00:01`, optional fraction, read as UTC) and a bare
/// date (`2024-01-09`, midnight UTC). Anything else is treated as absent.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Publisher entry in the read-only lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub initials: String,
    pub color_class: String,
}

struct SourceSeed {
    id: &'static str,
    name: &'static str,
    platform: &'static str,
    initials: &'static str,
    color_class: &'static str,
}

const SOURCE_SEED: [SourceSeed; 4] = [
    SourceSeed {
        id: "1",
        name: "Sports Illustrated",
        platform: "MSN",
        initials: "SI",
        color_class: "bg-black text-white",
    },
    SourceSeed {
        id: "2",
        name: "Newsweek",
        platform: "Google News",
        initials: "N",
        color_class: "bg-red-600 text-white",
    },
    SourceSeed {
        id: "3",
        name: "The Spun",
        platform: "Yahoo",
        initials: "S",
        color_class: "bg-white text-black border border-gray-200",
    },
    SourceSeed {
        id: "4",
        name: "Sporting News",
        platform: "MSN",
        initials: "SN",
        color_class: "bg-black text-white",
    },
];

static SOURCES: once_cell::sync::Lazy<Vec<Source>> = once_cell::sync::Lazy::new(|| {
    SOURCE_SEED
        .iter()
        .map(|s| Source {
            id: s.id.to_string(),
            name: s.name.to_string(),
            platform: s.platform.to_string(),
            initials: s.initials.to_string(),
            color_class: s.color_class.to_string(),
        })
        .collect()
});

/// All known sources, in table order.
pub fn sources() -> &'static [Source] {
    &SOURCES
}

/// Lookup by id only; the table is never mutated.
pub fn source_by_id(id: &str) -> Option<&'static Source> {
    SOURCES.iter().find(|s| s.id == id)
}

/// The two fetched feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// "Articles" tab.
    Primary,
    /// "Tier 2" tab.
    Secondary,
}

impl FeedKind {
    /// Path segment of the retrieval endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            FeedKind::Primary => "articles",
            FeedKind::Secondary => "tier2",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::Primary => "primary",
            FeedKind::Secondary => "secondary",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical scope of a feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentCategory {
    #[default]
    #[serde(rename = "sports", alias = "Sports")]
    Sports,
    #[serde(rename = "pop-culture", alias = "Pop-Culture")]
    PopCulture,
}

impl ContentCategory {
    /// Value of the `type` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            ContentCategory::Sports => "sports",
            ContentCategory::PopCulture => "pop-culture",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentCategory::Sports => "Sports",
            ContentCategory::PopCulture => "Pop-Culture",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sports" => Some(ContentCategory::Sports),
            "pop-culture" | "pop" | "popculture" => Some(ContentCategory::PopCulture),
            _ => None,
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dashboard tab. Articles and Tier 2 are fetched; Social is a static sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewTab {
    #[default]
    #[serde(rename = "articles", alias = "Articles")]
    Articles,
    #[serde(rename = "tier2", alias = "Tier 2", alias = "tier-2")]
    Tier2,
    #[serde(rename = "social", alias = "Social")]
    Social,
}

impl ViewTab {
    pub fn feed(self) -> Option<FeedKind> {
        match self {
            ViewTab::Articles => Some(FeedKind::Primary),
            ViewTab::Tier2 => Some(FeedKind::Secondary),
            ViewTab::Social => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Articles => "Articles",
            ViewTab::Tier2 => "Tier 2",
            ViewTab::Social => "Social",
        }
    }
}

/// Static sample set shown on the Social tab. It is never fetched, but still
/// passes through filtering, sorting and pagination.
pub fn social_samples() -> Vec<ContentRecord> {
    let sample = |id: &str,
                  source: &str,
                  url: &str,
                  summary: &str,
                  category: &str,
                  viral: bool,
                  published: &str,
                  fetched: &str| ContentRecord {
        id: id.to_string(),
        source_id: Some(source.to_string()),
        title: None,
        summary: Some(summary.to_string()),
        url: url.to_string(),
        // Relative strings as carried by the sample data; they do not parse.
        published_at: Some(published.to_string()),
        fetched_at: Some(fetched.to_string()),
        category: Some(category.to_string()),
        kind: None,
        likes: None,
        is_viral: Some(viral),
    };

    vec![
        sample(
            "s1",
            "4",
            "https://instagram.com/p/12345",
            "Family style coordination trends on social media.",
            "Lifestyle",
            true,
            "6h ago",
            "1h ago",
        ),
        sample(
            "s2",
            "1",
            "https://twitter.com/sports/status/6789",
            "Highlight of the night viral clip.",
            "Sports",
            false,
            "12h ago",
            "2h ago",
        ),
        sample(
            "s3",
            "2",
            "https://facebook.com/tech/posts/1",
            "Tech review of new flagship phone.",
            "Technology",
            true,
            "1 day ago",
            "4h ago",
        ),
    ]
}
