//! Competition tracker: binary entrypoint.
//! Boots the Axum HTTP server with the dashboard API and `/metrics`.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use competition_tracker::TrackerConfig;

const ENV_LOG_FORMAT: &str = "TRACKER_LOG_FORMAT";

/// Compact logs by default, JSON lines when TRACKER_LOG_FORMAT=json.
/// Filter comes from RUST_LOG, falling back to info for the tracker targets.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(competition_tracker::DEFAULT_LOG_FILTER));

    let json = std::env::var(ENV_LOG_FORMAT).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let res = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
    // The shuttle runtime may already have installed a subscriber.
    if res.is_err() {
        tracing::debug!("tracing subscriber already set");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = TrackerConfig::load_default().context("loading tracker config")?;
    tracing::info!(
        api_base_url = cfg.api_base_url.as_deref().unwrap_or("-"),
        timeout_secs = cfg.http_timeout_secs,
        "config loaded"
    );

    let router = competition_tracker::app(&cfg)?;
    Ok(router.into())
}
