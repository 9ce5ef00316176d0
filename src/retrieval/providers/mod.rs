// src/retrieval/providers/mod.rs
pub mod fixture;
pub mod http;

pub use fixture::StaticRetrieval;
pub use http::HttpRetrieval;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::retrieval::RetrievalService;

/// Pick the retrieval backend: HTTP when a base URL is configured, else the
/// JSON fixture, else an empty static backend (every feed unavailable).
pub fn from_config(cfg: &TrackerConfig) -> Result<Arc<dyn RetrievalService>> {
    if cfg.api_base_url.is_some() {
        let svc = HttpRetrieval::from_config(cfg).context("building http retrieval client")?;
        return Ok(Arc::new(svc));
    }
    match &cfg.fixture_path {
        Some(path) => Ok(Arc::new(StaticRetrieval::from_path(path)?)),
        None => {
            tracing::warn!(target: "retrieval", "no api_base_url or fixture_path; feeds will be unavailable");
            Ok(Arc::new(StaticRetrieval::new()))
        }
    }
}
