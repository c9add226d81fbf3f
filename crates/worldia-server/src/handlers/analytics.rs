//! Click tracking endpoints.

use super::ApiResult;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use worldia_core::config::AnalyticsConfig;
use worldia_core::{ClickEvent, ClickStats};

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    top: Option<usize>,
}

pub async fn track_click(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ClickEvent>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(event) = body?;
    state.clicks.track(&event)?;
    Ok(Json(json!({
        "success": true,
        "tracked": true,
        "message": "Click tracked successfully",
    })))
}

/// `GET /api/analytics/click[?top=N]`.
pub async fn click_stats(
    State(state): State<Arc<AppState>>,
    query: Option<Query<StatsQuery>>,
) -> Json<ClickStats> {
    let top = query
        .and_then(|Query(q)| q.top)
        .unwrap_or(AnalyticsConfig::DEFAULT_TOP_TOOLS);
    Json(state.clicks.stats(top))
}
