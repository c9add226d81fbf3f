//! Like, favorite, rating, comment and share endpoints.
//!
//! Mutations other than sharing require a session. Summaries are public and
//! personalised when a session is present.

use super::{
    get_i64_param, get_str_param, item_from_body, item_from_query, optional_user, require_user,
    ApiResult,
};
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use worldia_core::interactions::{FavoriteSummary, LikeSummary, RatingSummary};
use worldia_core::WorldiaError;

type Params = HashMap<String, String>;

pub async fn toggle_like(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let user = require_user(&state, &headers).await?;
    let Json(params) = body?;
    let item = item_from_body(&params)?;
    let liked = state.interactions.toggle_like(&user.id, &item)?;
    Ok(Json(json!({ "liked": liked, "success": true })))
}

pub async fn like_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<Params>,
) -> ApiResult<Json<LikeSummary>> {
    let item = item_from_query(&query)?;
    let user = optional_user(&state, &headers).await;
    let summary = state
        .interactions
        .like_summary(&item, user.as_ref().map(|u| u.id.as_str()))?;
    Ok(Json(summary))
}

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let user = require_user(&state, &headers).await?;
    let Json(params) = body?;
    let item = item_from_body(&params)?;
    let favorited = state.interactions.toggle_favorite(&user.id, &item)?;
    Ok(Json(json!({ "favorited": favorited, "success": true })))
}

pub async fn favorite_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<Params>,
) -> ApiResult<Json<FavoriteSummary>> {
    let item = item_from_query(&query)?;
    let user = optional_user(&state, &headers).await;
    let summary = state
        .interactions
        .favorite_summary(&item, user.as_ref().map(|u| u.id.as_str()))?;
    Ok(Json(summary))
}

pub async fn rate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let user = require_user(&state, &headers).await?;
    let Json(params) = body?;
    let item = item_from_body(&params)?;
    let score = get_i64_param(&params, "score", "score").ok_or_else(|| {
        WorldiaError::validation("score", "itemId, itemType, and score are required")
    })?;
    let rating = state.interactions.rate(&user.id, &item, score)?;
    Ok(Json(json!({ "rating": rating, "success": true })))
}

pub async fn rating_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<Params>,
) -> ApiResult<Json<RatingSummary>> {
    let item = item_from_query(&query)?;
    let user = optional_user(&state, &headers).await;
    let summary = state
        .interactions
        .rating_summary(&item, user.as_ref().map(|u| u.id.as_str()))?;
    Ok(Json(summary))
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let user = require_user(&state, &headers).await?;
    let Json(params) = body?;
    let item = item_from_body(&params)?;
    let content = get_str_param(&params, "content", "content").unwrap_or_default();
    let rating = get_i64_param(&params, "rating", "rating");
    let comment = state
        .interactions
        .add_comment(&user, &item, content, rating)?;
    Ok(Json(json!({ "comment": comment, "success": true })))
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Params>,
) -> ApiResult<Json<Value>> {
    let item = item_from_query(&query)?;
    let comments = state.interactions.comments(&item)?;
    Ok(Json(json!({ "comments": comments })))
}

pub async fn record_share(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(params) = body?;
    let (item, platform) = match (
        item_from_body(&params),
        get_str_param(&params, "platform", "platform"),
    ) {
        (Ok(item), Some(platform)) => (item, platform),
        _ => {
            return Err(WorldiaError::validation(
                "platform",
                "itemId, itemType, and platform are required",
            )
            .into())
        }
    };
    let count = state.interactions.record_share(&item, platform)?;
    Ok(Json(json!({ "success": true, "platform": platform, "count": count })))
}

pub async fn share_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Params>,
) -> ApiResult<Json<Value>> {
    let item = item_from_query(&query)?;
    let count = state.interactions.share_count(&item)?;
    Ok(Json(json!({ "count": count })))
}
