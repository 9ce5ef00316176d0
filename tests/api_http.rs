// tests/api_http.rs
//
// HTTP-level tests for the dashboard Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt as _; // for `oneshot`

use competition_tracker::retrieval::StaticRetrieval;
use competition_tracker::{router, AppState, ContentCategory, FeedKind};

const BODY_LIMIT: usize = 1024 * 1024;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
}

fn test_router() -> Router {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/feeds.json");
    let svc = StaticRetrieval::from_path(&fixture)
        .expect("fixture loads")
        .with_failure(FeedKind::Secondary, ContentCategory::PopCulture, 500);
    router(AppState::new(Arc::new(svc)).with_clock(fixed_now))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(req.body(body).expect("build request"))
        .await
        .expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, v)
}

fn ids(view: &Value) -> Vec<String> {
    view["page"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_router();
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn initial_view_is_idle_and_empty() {
    let app = test_router();
    let (status, v) = send(&app, "GET", "/api/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["tab"], "articles");
    assert_eq!(v["loadState"]["state"], "idle");
    assert_eq!(v["page"]["isEmpty"], true);
    assert_eq!(v["filters"]["platform"], "All Publishers");
}

#[tokio::test]
async fn select_loads_feed_newest_first_with_rows() {
    let app = test_router();
    let (status, v) = send(
        &app,
        "POST",
        "/api/select",
        Some(json!({"tab": "articles", "category": "sports"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["loadState"]["state"], "ready");
    assert_eq!(v["page"]["totalItems"], 3);
    assert_eq!(ids(&v), vec!["a-1001", "a-1002", "a-1003"]);

    let first = &v["page"]["items"][0];
    assert_eq!(first["source"]["name"], "Sports Illustrated");
    assert_eq!(first["age"], "1h ago");
    assert_eq!(first["publishedPacific"], "Jan 9, 2024, 02:15 PM");
    assert_eq!(first["categoryLabel"], "NFL");
    assert_eq!(first["type"], "article");
}

#[tokio::test]
async fn filters_narrow_sort_and_reset() {
    let app = test_router();
    send(&app, "POST", "/api/select", Some(json!({"tab": "articles"}))).await;

    let (_, v) = send(
        &app,
        "POST",
        "/api/filters",
        Some(json!({"field": "keywords", "value": "  LAKERS "})),
    )
    .await;
    assert_eq!(ids(&v), vec!["a-1002"]);

    send(&app, "POST", "/api/filters/reset", None).await;
    let (_, v) = send(
        &app,
        "POST",
        "/api/filters",
        Some(json!({"field": "duration", "value": "Last 24 hours"})),
    )
    .await;
    assert_eq!(ids(&v), vec!["a-1001", "a-1002"]);

    let (_, v) = send(&app, "POST", "/api/filters/reset", None).await;
    assert_eq!(v["filters"]["duration"], "All Time");
    assert_eq!(v["page"]["totalItems"], 3);

    // Platform is accepted but never narrows results.
    let (_, v) = send(
        &app,
        "POST",
        "/api/filters",
        Some(json!({"field": "platform", "value": "MSN"})),
    )
    .await;
    assert_eq!(v["filters"]["platform"], "MSN");
    assert_eq!(v["page"]["totalItems"], 3);
}

#[tokio::test]
async fn engagement_sort_puts_absent_likes_last() {
    let app = test_router();
    send(&app, "POST", "/api/select", Some(json!({"tab": "articles"}))).await;
    let (_, v) = send(
        &app,
        "POST",
        "/api/filters",
        Some(json!({"field": "sortByLikes", "value": true})),
    )
    .await;
    assert_eq!(ids(&v), vec!["a-1001", "a-1002", "a-1003"]);
    assert_eq!(v["filters"]["sortByLikes"], true);
}

#[tokio::test]
async fn failed_feed_shows_error_and_no_rows() {
    let app = test_router();
    send(&app, "POST", "/api/select", Some(json!({"tab": "tier2"}))).await;
    let (_, v) = send(
        &app,
        "POST",
        "/api/select",
        Some(json!({"tab": "tier2", "category": "pop-culture"})),
    )
    .await;
    assert_eq!(v["loadState"]["state"], "failed");
    assert_eq!(v["loadState"]["message"], "Server Error: Internal Server Error");
    assert_eq!(v["page"]["totalItems"], 0);
    assert_eq!(v["page"]["isEmpty"], true);
}

#[tokio::test]
async fn out_of_range_page_is_ignored() {
    let app = test_router();
    send(&app, "POST", "/api/select", Some(json!({"tab": "tier2", "category": "sports"}))).await;
    let (status, v) = send(&app, "POST", "/api/page", Some(json!({"page": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["page"]["currentPage"], 1);
    assert_eq!(v["page"]["totalPages"], 1);
    assert_eq!(v["page"]["rangeStart"], 1);
    assert_eq!(v["page"]["rangeEnd"], 2);
}

#[tokio::test]
async fn social_tab_serves_static_samples() {
    let app = test_router();
    let (_, v) = send(&app, "POST", "/api/select", Some(json!({"tab": "social"}))).await;
    assert_eq!(v["loadState"]["state"], "ready");
    assert_eq!(v["page"]["totalItems"], 3);
    // literal relative timestamps do not parse, so no age is shown
    assert_eq!(v["page"]["items"][0]["age"], "");
}

#[tokio::test]
async fn options_follow_query_or_current_selection() {
    let app = test_router();
    let (_, v) = send(&app, "GET", "/api/options?tab=tier2&category=sports", None).await;
    let publishers: Vec<&str> = v["publishers"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p.as_str())
        .collect();
    assert_eq!(publishers, vec!["All Publishers", "FoxSports", "NDTV", "Sportstar", "The Print"]);

    let (_, v) = send(&app, "GET", "/api/options", None).await;
    assert_eq!(v["categories"][1], "Cricket");
    assert_eq!(v["publishers"][1], "MSN");
}

#[tokio::test]
async fn malformed_filter_update_is_rejected() {
    let app = test_router();
    let (status, _) = send(
        &app,
        "POST",
        "/api/filters",
        Some(json!({"field": "sortByLikes", "value": "yes"})),
    )
    .await;
    assert!(status.is_client_error(), "got {status}");
}
