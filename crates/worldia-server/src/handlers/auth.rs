//! Account endpoints.

use super::{
    expired_session_cookie, optional_user, session_cookie, session_token, ApiResult,
};
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use worldia_core::Session;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn with_session(session: Session) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(json!({ "user": session.user })),
    )
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let session = state
        .accounts
        .register(&body.name, &body.email, &body.password)
        .await?;
    Ok(with_session(session))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let session = state.accounts.login(&body.email, &body.password).await?;
    info!("User {} logged in", session.user.id);
    Ok(with_session(session))
}

pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.accounts.logout(&token).await;
    }
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(json!({ "success": true })),
    )
}

/// `{"user": ...}` or `{"user": null}`.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    Json(json!({ "user": optional_user(&state, &headers).await }))
}
