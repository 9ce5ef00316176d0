// src/retrieval/providers/http.rs
use async_trait::async_trait;
use metrics::{counter, histogram};
use std::time::Duration;

use crate::config::TrackerConfig;
use crate::model::{ContentCategory, ContentRecord, FeedKind};
use crate::retrieval::types::{RetrievalService, WireRecord};
use crate::retrieval::{ensure_metrics_described, normalize_records, RetrievalError};

/// Retrieval over HTTP: `GET {base}/api/{articles|tier2}?type={sports|pop-culture}`.
pub struct HttpRetrieval {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRetrieval {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("competition-tracker/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout.min(Duration::from_secs(4)))
            .timeout(timeout)
            .build()
            .map_err(RetrievalError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &TrackerConfig) -> Result<Self, RetrievalError> {
        let base = cfg
            .api_base_url
            .as_deref()
            .ok_or_else(|| RetrievalError::Unavailable("http retrieval".into()))?;
        Self::new(base, Duration::from_secs(cfg.http_timeout_secs))
    }

    pub fn endpoint_url(&self, feed: FeedKind) -> String {
        format!("{}/api/{}", self.base_url, feed.endpoint())
    }

    async fn fetch_impl(
        &self,
        feed: FeedKind,
        category: ContentCategory,
    ) -> Result<Vec<ContentRecord>, RetrievalError> {
        let resp = self
            .http
            .get(self.endpoint_url(feed))
            .query(&[("type", category.as_param())])
            .send()
            .await
            .map_err(RetrievalError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RetrievalError::status(status));
        }

        let body = resp.text().await.map_err(RetrievalError::Transport)?;
        let raw: Vec<WireRecord> =
            serde_json::from_str(&body).map_err(|e| RetrievalError::Decode(e.to_string()))?;
        Ok(normalize_records(feed, raw))
    }
}

#[async_trait]
impl RetrievalService for HttpRetrieval {
    async fn fetch(
        &self,
        feed: FeedKind,
        category: ContentCategory,
    ) -> Result<Vec<ContentRecord>, RetrievalError> {
        ensure_metrics_described();
        counter!("retrieval_requests_total").increment(1);
        let t0 = std::time::Instant::now();

        let out = self.fetch_impl(feed, category).await;

        histogram!("retrieval_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        match &out {
            Ok(records) => tracing::info!(
                target: "retrieval",
                %feed,
                category = category.as_param(),
                records = records.len(),
                "feed fetched"
            ),
            Err(e) => {
                counter!("retrieval_errors_total").increment(1);
                tracing::warn!(
                    target: "retrieval",
                    %feed,
                    category = category.as_param(),
                    error = %e,
                    "feed fetch failed"
                );
            }
        }
        out
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
