// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::display::ContentRow;
use crate::filter::FilterState;
use crate::model::{ContentCategory, ViewTab};
use crate::pagination::PageView;
use crate::retrieval::RetrievalService;
use crate::session::{filter_options, DashboardSession, DashboardView, FetchOutcome, FilterOptions, LoadState};
use crate::store::FilterUpdate;

/// Time source for age and recency computations.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<DashboardSession>>,
    pub retrieval: Arc<dyn RetrievalService>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(retrieval: Arc<dyn RetrievalService>) -> Self {
        Self {
            session: Arc::new(RwLock::new(DashboardSession::new())),
            retrieval,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/view", get(view))
        .route("/api/select", post(select))
        .route("/api/filters", post(update_filter))
        .route("/api/filters/reset", post(reset_filters))
        .route("/api/page", post(go_to_page))
        .route("/api/options", get(options))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// `DashboardView` with presentation rows instead of bare records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub tab: ViewTab,
    pub category: ContentCategory,
    pub load_state: LoadState,
    pub filters: FilterState,
    pub page: PageView<ContentRow>,
}

impl ViewResponse {
    fn build(view: DashboardView, now: DateTime<Utc>) -> Self {
        Self {
            tab: view.tab,
            category: view.category,
            load_state: view.load_state,
            filters: view.filters,
            page: view.page.map(|r| ContentRow::build(r, now)),
        }
    }
}

async fn current_view(state: &AppState) -> Json<ViewResponse> {
    let now = (state.clock)();
    let view = state.session.read().await.view(now);
    Json(ViewResponse::build(view, now))
}

async fn view(State(state): State<AppState>) -> Json<ViewResponse> {
    current_view(&state).await
}

#[derive(Debug, Deserialize)]
struct SelectReq {
    tab: ViewTab,
    #[serde(default)]
    category: ContentCategory,
}

async fn select(State(state): State<AppState>, Json(req): Json<SelectReq>) -> Json<ViewResponse> {
    let ticket = state.session.write().await.select(req.tab, req.category);

    // The lock is released while the fetch is in flight; the generation
    // check in `complete_fetch` drops the answer if another selection won.
    if let Some(ticket) = ticket {
        let result = state.retrieval.fetch(ticket.feed, ticket.category).await;
        let outcome = state.session.write().await.complete_fetch(ticket, result);
        match outcome {
            FetchOutcome::Applied { records } => tracing::info!(
                target: "api",
                tab = req.tab.label(),
                category = req.category.as_param(),
                records,
                backend = state.retrieval.name(),
                "selection loaded"
            ),
            FetchOutcome::Failed { message } => tracing::warn!(
                target: "api",
                tab = req.tab.label(),
                category = req.category.as_param(),
                %message,
                "selection failed"
            ),
            FetchOutcome::Stale => tracing::debug!(
                target: "api",
                generation = ticket.generation,
                "selection superseded"
            ),
        }
    }

    current_view(&state).await
}

async fn update_filter(
    State(state): State<AppState>,
    Json(update): Json<FilterUpdate>,
) -> Json<ViewResponse> {
    state.session.write().await.update_filter(update);
    current_view(&state).await
}

async fn reset_filters(State(state): State<AppState>) -> Json<ViewResponse> {
    state.session.write().await.reset_filters();
    current_view(&state).await
}

#[derive(Debug, Deserialize)]
struct PageReq {
    page: usize,
}

async fn go_to_page(State(state): State<AppState>, Json(req): Json<PageReq>) -> Json<ViewResponse> {
    let now = (state.clock)();
    if !state.session.write().await.go_to_page(req.page, now) {
        tracing::debug!(target: "api", page = req.page, "page request out of range; ignored");
    }
    current_view(&state).await
}

#[derive(Debug, Default, Deserialize)]
struct OptionsQuery {
    tab: Option<ViewTab>,
    category: Option<ContentCategory>,
}

/// Dropdown values for the given (or current) tab and category.
async fn options(
    State(state): State<AppState>,
    Query(q): Query<OptionsQuery>,
) -> Json<FilterOptions> {
    let (tab, category) = {
        let s = state.session.read().await;
        (q.tab.unwrap_or(s.tab()), q.category.unwrap_or(s.category()))
    };
    Json(filter_options(tab, category))
}
