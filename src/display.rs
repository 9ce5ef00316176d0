// src/display.rs
//! Row presentation: source resolution, category labels, relative ages and
//! Pacific publish times.

use chrono::{DateTime, Utc};
use chrono_tz::America::Los_Angeles;
use serde::Serialize;

use crate::model::{parse_timestamp, source_by_id, ContentRecord, Source};

/// Human age of `ts` at `now`. Empty for absent or unparsable timestamps.
pub fn relative_age(ts: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(at) = ts.and_then(parse_timestamp) else {
        return String::new();
    };
    let secs = (now - at).num_seconds();
    if secs < 60 {
        return "Just now".to_string();
    }
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 30 {
        format!("{days}d ago")
    } else if days / 30 < 12 {
        format!("{}mo ago", days / 30)
    } else {
        format!("{}y ago", days / 365)
    }
}

/// Publish time on the Pacific clock, e.g. "Jan 9, 2024, 02:15 PM".
/// Absent gives "N/A"; an unparsable value is shown as-is.
pub fn format_pacific(ts: Option<&str>) -> String {
    let Some(raw) = ts.filter(|s| !s.trim().is_empty()) else {
        return "N/A".to_string();
    };
    match parse_timestamp(raw) {
        Some(at) => at
            .with_timezone(&Los_Angeles)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string(),
        None => raw.to_string(),
    }
}

pub fn format_category(category: Option<&str>) -> String {
    let Some(cat) = category.filter(|c| !c.is_empty()) else {
        return "General".to_string();
    };
    if cat.eq_ignore_ascii_case("tv") {
        return "TV".to_string();
    }
    let mut chars = cat.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Coarse media kind used for the row icon: "video", "slideshow" or "article".
pub fn media_kind(kind: Option<&str>) -> &'static str {
    let k = kind.unwrap_or_default().to_lowercase();
    if k.contains("video") {
        "video"
    } else if k.contains("slideshow") {
        "slideshow"
    } else {
        "article"
    }
}

/// Table entry, or a placeholder built from the raw id.
pub fn resolve_source(source_id: Option<&str>) -> Source {
    if let Some(src) = source_id.and_then(source_by_id) {
        return src.clone();
    }
    let id = source_id.unwrap_or_default();
    Source {
        id: id.to_string(),
        name: if id.is_empty() {
            "Unknown Source".to_string()
        } else {
            id.to_string()
        },
        platform: "RSS Feed".to_string(),
        initials: id
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "?".to_string()),
        color_class: "bg-zinc-500 text-white".to_string(),
    }
}

/// One displayed row: the record plus everything derived for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRow {
    #[serde(flatten)]
    pub record: ContentRecord,
    pub source: Source,
    pub category_label: String,
    pub media_kind: &'static str,
    pub age: String,
    pub published_pacific: String,
}

impl ContentRow {
    pub fn build(record: ContentRecord, now: DateTime<Utc>) -> Self {
        let age = relative_age(record.published_at.as_deref(), now);
        let published_pacific = format_pacific(record.published_at.as_deref());
        Self {
            source: resolve_source(record.source_id.as_deref()),
            category_label: format_category(record.category.as_deref()),
            media_kind: media_kind(record.kind.as_deref()),
            age,
            published_pacific,
            record,
        }
    }
}
