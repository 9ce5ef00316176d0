// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod display;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod pagination;
pub mod pipeline;
pub mod retrieval;
pub mod session;
pub mod sort;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::TrackerConfig;
pub use crate::model::{ContentCategory, ContentRecord, FeedKind, ViewTab};
pub use crate::session::DashboardSession;

use anyhow::Result;
use axum::Router;

/// Log targets emitted by the tracker.
pub const LOG_TARGETS: [&str; 4] = ["api", "session", "retrieval", "pipeline"];

/// `EnvFilter` directive used when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "competition_tracker=info,api=info,session=info,retrieval=info,pipeline=info,warn";

/// Full application router: dashboard API plus `/metrics`, with the
/// retrieval backend chosen from `cfg`.
pub fn app(cfg: &TrackerConfig) -> Result<Router> {
    let retrieval = retrieval::providers::from_config(cfg)?;
    tracing::info!(target: "api", backend = retrieval.name(), "retrieval backend ready");
    let metrics = metrics::Metrics::init()?;
    Ok(router(AppState::new(retrieval)).merge(metrics.router()))
}
