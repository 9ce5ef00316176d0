// tests/session_race.rs
//
// Overlapping selections: a slow response for an earlier selection must not
// overwrite the records of the selection that is now active.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::Request,
    Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt as _;

use competition_tracker::retrieval::{RetrievalError, RetrievalService};
use competition_tracker::{router, AppState, ContentCategory, ContentRecord, FeedKind};

/// Sports answers only after `release` is notified; pop-culture answers at once.
struct GatedRetrieval {
    sports_started: Notify,
    release: Notify,
}

fn batch(prefix: &str, n: usize) -> Vec<ContentRecord> {
    (0..n)
        .map(|i| {
            let mut r = ContentRecord::new(format!("{prefix}-{i}"), format!("https://x/{prefix}/{i}"));
            r.title = Some(format!("{prefix} headline {i}"));
            r.published_at = Some(format!("2024-01-0{}T00:00:00Z", 1 + i));
            r
        })
        .collect()
}

#[async_trait]
impl RetrievalService for GatedRetrieval {
    async fn fetch(
        &self,
        _feed: FeedKind,
        category: ContentCategory,
    ) -> Result<Vec<ContentRecord>, RetrievalError> {
        match category {
            ContentCategory::Sports => {
                self.sports_started.notify_one();
                self.release.notified().await;
                Ok(batch("sports", 5))
            }
            ContentCategory::PopCulture => Ok(batch("pop", 2)),
        }
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

async fn post_select(app: Router, body: Value) -> Value {
    let req = Request::post("/api/select")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn late_response_for_previous_category_is_discarded() {
    let svc = Arc::new(GatedRetrieval {
        sports_started: Notify::new(),
        release: Notify::new(),
    });
    let app = router(AppState::new(svc.clone()));

    let slow = tokio::spawn(post_select(
        app.clone(),
        json!({"tab": "articles", "category": "sports"}),
    ));
    svc.sports_started.notified().await;

    let pop = post_select(app.clone(), json!({"tab": "articles", "category": "pop-culture"})).await;
    assert_eq!(pop["category"], "pop-culture");
    assert_eq!(pop["page"]["totalItems"], 2);

    svc.release.notify_one();
    let late = slow.await.expect("slow request task");

    // The slow request still answers with the active (pop-culture) view.
    assert_eq!(late["category"], "pop-culture");
    assert_eq!(late["loadState"]["state"], "ready");
    let ids: Vec<&str> = late["page"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["pop-1", "pop-0"]);
}

#[tokio::test]
async fn pending_selection_reports_loading() {
    let svc = Arc::new(GatedRetrieval {
        sports_started: Notify::new(),
        release: Notify::new(),
    });
    let state = AppState::new(svc.clone());
    let app = router(state.clone());

    let slow = tokio::spawn(post_select(app.clone(), json!({"tab": "articles"})));
    svc.sports_started.notified().await;

    {
        let session = state.session.read().await;
        assert_eq!(
            session.load_state(),
            competition_tracker::session::LoadState::Loading
        );
        assert!(session.active_records().is_empty());
    }

    svc.release.notify_one();
    let done = slow.await.unwrap();
    assert_eq!(done["page"]["totalItems"], 5);
}
