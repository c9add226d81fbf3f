//! Catalog endpoints.

use super::{ApiError, ApiResult};
use crate::server::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use worldia_core::{RawToolQuery, ToolQuery, ToolRecord, ToolsResponse, WorldiaError};

/// `GET /api/tools`. Malformed values fall back to defaults; a repeated
/// key keeps its first value.
pub async fn list_tools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ToolsResponse> {
    let raw = match query {
        Ok(Query(pairs)) => RawToolQuery::from_pairs(pairs),
        Err(rejection) => {
            debug!("Ignoring unparseable tools query: {}", rejection);
            RawToolQuery::default()
        }
    };
    Json(state.catalog.query(&ToolQuery::from_raw(raw)))
}

/// `GET /api/tools/:id`.
pub async fn get_tool(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ToolRecord>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError(WorldiaError::NotFound { what: "Tool", id }))
}
