// src/retrieval/providers/fixture.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::model::{ContentCategory, ContentRecord, FeedKind};
use crate::retrieval::types::{RetrievalService, WireRecord};
use crate::retrieval::{normalize_records, RetrievalError};

#[derive(Debug, Clone)]
enum Entry {
    Records(Vec<ContentRecord>),
    Fail(u16),
}

/// In-memory retrieval keyed by (feed, category). Used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRetrieval {
    feeds: HashMap<(FeedKind, ContentCategory), Entry>,
}

/// File layout: `{"articles": {"sports": [...], "pop-culture": [...]}, "tier2": {...}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FixtureFile {
    articles: HashMap<String, Vec<WireRecord>>,
    tier2: HashMap<String, Vec<WireRecord>>,
}

impl StaticRetrieval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(
        mut self,
        feed: FeedKind,
        category: ContentCategory,
        records: Vec<ContentRecord>,
    ) -> Self {
        self.feeds.insert((feed, category), Entry::Records(records));
        self
    }

    /// Make a feed answer with the given HTTP status.
    pub fn with_failure(mut self, feed: FeedKind, category: ContentCategory, status: u16) -> Self {
        self.feeds.insert((feed, category), Entry::Fail(status));
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(s).context("parsing feed fixture json")?;
        let mut out = Self::new();
        for (feed, sections) in [
            (FeedKind::Primary, file.articles),
            (FeedKind::Secondary, file.tier2),
        ] {
            for (key, raw) in sections {
                let category = ContentCategory::parse(&key)
                    .with_context(|| format!("unknown category `{key}` in fixture"))?;
                out = out.with_feed(feed, category, normalize_records(feed, raw));
            }
        }
        Ok(out)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading feed fixture from {}", path.display()))?;
        Self::from_json_str(&content)
    }
}

#[async_trait]
impl RetrievalService for StaticRetrieval {
    async fn fetch(
        &self,
        feed: FeedKind,
        category: ContentCategory,
    ) -> Result<Vec<ContentRecord>, RetrievalError> {
        match self.feeds.get(&(feed, category)) {
            Some(Entry::Records(records)) => Ok(records.clone()),
            Some(Entry::Fail(code)) => Err(RetrievalError::Status {
                status: *code,
                reason: reqwest::StatusCode::from_u16(*code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string(),
            }),
            None => Err(RetrievalError::Unavailable(format!(
                "{feed}/{}",
                category.as_param()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
