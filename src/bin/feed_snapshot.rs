//! Fetch one tab through the configured backend and print its first page.
//!
//! Usage: `feed_snapshot [articles|tier2|social] [sports|pop-culture] [keywords...]`

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use competition_tracker::display::ContentRow;
use competition_tracker::retrieval::providers;
use competition_tracker::session::LoadState;
use competition_tracker::store::FilterUpdate;
use competition_tracker::{ContentCategory, DashboardSession, TrackerConfig, ViewTab};

fn parse_tab(s: &str) -> Result<ViewTab> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| anyhow!("unknown tab `{s}` (articles, tier2, social)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let tab = args.next().map(|s| parse_tab(&s)).transpose()?.unwrap_or_default();
    let category = match args.next() {
        Some(s) => ContentCategory::parse(&s).with_context(|| format!("unknown category `{s}`"))?,
        None => ContentCategory::default(),
    };
    let keywords = args.collect::<Vec<_>>().join(" ");

    let cfg = TrackerConfig::load_default()?;
    let retrieval = providers::from_config(&cfg)?;

    let mut session = DashboardSession::new();
    if let Some(ticket) = session.select(tab, category) {
        let result = retrieval.fetch(ticket.feed, ticket.category).await;
        session.complete_fetch(ticket, result);
    }
    if !keywords.is_empty() {
        session.update_filter(FilterUpdate::Keywords(keywords));
    }

    let now = Utc::now();
    let view = session.view(now);
    if let LoadState::Failed(message) = &view.load_state {
        println!("{} / {}: {message}", tab.label(), category.label());
        return Ok(());
    }

    let page = view.page.map(|r| ContentRow::build(r, now));
    println!(
        "{} / {}: showing {}-{} of {}",
        tab.label(),
        category.label(),
        page.range_start,
        page.range_end,
        page.total_items
    );
    for row in &page.items {
        println!(
            "{:>8}  {:<20} {:<12} {}",
            row.age,
            row.source.name,
            row.category_label,
            row.record.title.as_deref().unwrap_or("(untitled)")
        );
    }
    Ok(())
}
