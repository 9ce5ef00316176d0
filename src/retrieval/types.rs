// src/retrieval/types.rs
use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{ContentCategory, ContentRecord, FeedKind};
use crate::retrieval::error::RetrievalError;

/// External data-retrieval service: up to 100 records for one feed and
/// category, newest first.
#[async_trait]
pub trait RetrievalService: Send + Sync {
    async fn fetch(
        &self,
        feed: FeedKind,
        category: ContentCategory,
    ) -> Result<Vec<ContentRecord>, RetrievalError>;

    fn name(&self) -> &'static str;
}

/// Tolerant wire shape of one record.
///
/// Accepts the normalized names (`sourceId`, `publishedAt`, ...) as well as
/// the raw document names the store uses (`abstract`, `provider`, `source`,
/// `publishedDateTime`, `published_at`, `unique_key`, `_id`). Each spelling is
/// its own field so documents carrying several of them still decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireRecord {
    pub id: Option<String>,
    pub unique_key: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<serde_json::Value>,

    #[serde(rename = "sourceId")]
    pub source_id: Option<String>,
    pub provider: Option<String>,
    pub source: Option<String>,

    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,

    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "publishedDateTime")]
    pub published_date_time: Option<String>,
    #[serde(rename = "published_at")]
    pub published_at_raw: Option<String>,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: Option<String>,
    #[serde(rename = "fetched_at")]
    pub fetched_at_raw: Option<String>,

    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub likes: Option<serde_json::Value>,
    #[serde(rename = "isViral")]
    pub is_viral: Option<bool>,
}

impl WireRecord {
    /// First usable identifier: `id`, then `unique_key`, then `_id`
    /// (plain string or `{"$oid": "..."}`).
    pub fn resolved_id(&self) -> Option<String> {
        let mongo = self.mongo_id.as_ref().and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => {
                map.get("$oid").and_then(|o| o.as_str()).map(str::to_string)
            }
            _ => None,
        });
        [self.id.clone(), self.unique_key.clone(), mongo]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
    }

    /// Numeric likes; numeric strings are accepted, anything else is absent.
    pub fn resolved_likes(&self) -> Option<f64> {
        match self.likes.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }
}
