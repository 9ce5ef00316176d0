// src/config/mod.rs
pub mod tracker;

pub use tracker::{
    TrackerConfig, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TRACKER_CONFIG_PATH, ENV_API_BASE_URL,
    ENV_HTTP_TIMEOUT_SECS, ENV_TRACKER_CONFIG_PATH,
};
