//! HTTP request handlers, split by domain.

pub mod ai;
pub mod analytics;
pub mod auth;
pub mod interactions;
pub mod tools;

use crate::server::AppState;
use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{error, warn};
use worldia_core::config::SessionConfig;
use worldia_core::{ItemRef, PublicUser, WorldiaError};

// ============================================================================
// Error responses
// ============================================================================

/// Error returned by handlers; renders as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub WorldiaError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<WorldiaError> for ApiError {
    fn from(err: WorldiaError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(WorldiaError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            if status == StatusCode::BAD_GATEWAY {
                warn!("Upstream failure: {}", self.0);
            }
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Extract an optional integer parameter. Numeric strings are accepted.
pub(crate) fn get_i64_param(params: &Value, snake: &str, camel: &str) -> Option<i64> {
    let value = params.get(snake).or_else(|| params.get(camel))?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// `(itemId, itemType)` from a JSON body.
pub(crate) fn item_from_body(params: &Value) -> ApiResult<ItemRef> {
    Ok(ItemRef::new(
        get_str_param(params, "item_id", "itemId").unwrap_or_default(),
        get_str_param(params, "item_type", "itemType").unwrap_or_default(),
    )?)
}

/// `(itemId, itemType)` from query parameters.
pub(crate) fn item_from_query(query: &HashMap<String, String>) -> ApiResult<ItemRef> {
    Ok(ItemRef::new(
        query.get("itemId").cloned().unwrap_or_default(),
        query.get("itemType").cloned().unwrap_or_default(),
    )?)
}

// ============================================================================
// Sessions
// ============================================================================

/// Session token from the `Cookie` header.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SessionConfig::COOKIE_NAME)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

pub(crate) async fn optional_user(state: &AppState, headers: &HeaderMap) -> Option<PublicUser> {
    let token = session_token(headers)?;
    state.accounts.user_for_session(&token).await
}

pub(crate) async fn require_user(state: &AppState, headers: &HeaderMap) -> ApiResult<PublicUser> {
    optional_user(state, headers)
        .await
        .ok_or(ApiError(WorldiaError::Unauthorized))
}

pub(crate) fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SessionConfig::COOKIE_NAME,
        token,
        SessionConfig::LIFETIME.as_secs()
    )
}

pub(crate) fn expired_session_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SessionConfig::COOKIE_NAME
    )
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Bytes;
    use axum::http::HeaderValue;
    use worldia_core::ai::{CompletionRequest, ImageJob, SpeechJob, VideoJob, VideoStatus, VideoTask};
    use worldia_core::{AiProvider, Result};

    /// Provider that fails every call, for tests that never reach the AI routes.
    pub(crate) struct UnavailableProvider;

    fn unavailable<T>() -> Result<T> {
        Err(WorldiaError::Upstream {
            service: "ai".into(),
            message: "unavailable".into(),
        })
    }

    #[async_trait]
    impl AiProvider for UnavailableProvider {
        async fn chat(&self, _: &CompletionRequest) -> Result<String> {
            unavailable()
        }
        async fn image(&self, _: &ImageJob) -> Result<String> {
            unavailable()
        }
        async fn speech(&self, _: &SpeechJob) -> Result<Bytes> {
            unavailable()
        }
        async fn transcribe(&self, _: &str) -> Result<String> {
            unavailable()
        }
        async fn create_video(&self, _: &VideoJob) -> Result<VideoTask> {
            unavailable()
        }
        async fn video_status(&self, _: &str) -> Result<VideoStatus> {
            unavailable()
        }
    }

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; worldia_session=abc-123; lang=es"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("worldia_session="));
        assert!(session_token(&headers).is_none());
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("worldia_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_param_helpers() {
        let params = json!({ "itemId": "chatgpt", "item_type": "tool", "score": "4", "n": 3.9 });
        assert_eq!(get_str_param(&params, "item_id", "itemId"), Some("chatgpt"));
        assert_eq!(get_i64_param(&params, "score", "score"), Some(4));
        assert_eq!(get_i64_param(&params, "n", "n"), Some(3));
        assert!(get_i64_param(&params, "missing", "missing").is_none());

        let item = item_from_body(&params).unwrap();
        assert_eq!(item.item_type, "tool");
        assert!(item_from_body(&json!({ "itemId": "x" })).is_err());
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError(WorldiaError::EmailTaken).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response = ApiError(WorldiaError::Other("db exploded".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = ApiError(WorldiaError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
