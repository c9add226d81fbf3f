//! AI playground proxy endpoints.

use super::ApiResult;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use worldia_core::ai::{
    ChatRequest, CodeRequest, ImageRequest, SpeechRequest, TranscriptionRequest, VideoRequest,
    VideoStatus,
};
use worldia_core::WorldiaError;

pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let completion = request.into_completion()?;
    debug!("Chat request with {} messages", completion.messages.len());
    let response = state.ai.chat(&completion).await?;
    Ok(Json(json!({ "response": response })))
}

pub async fn code(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CodeRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let completion = request.into_completion()?;
    let result = state.ai.chat(&completion).await?;
    Ok(Json(json!({ "result": result, "success": true })))
}

pub async fn image(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ImageRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let job = request.into_job()?;
    debug!("Generating {} image", job.size);
    let image = state.ai.image(&job).await?;
    Ok(Json(json!({
        "success": true,
        "image": image,
        "prompt": job.prompt,
        "size": job.size,
    })))
}

/// Returns `audio/wav` bytes.
pub async fn speech(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SpeechRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = body?;
    let job = request.into_job()?;
    let audio = state.ai.speech(&job).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        audio,
    ))
}

pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranscriptionRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let audio = request.into_audio()?;
    let text = state.ai.transcribe(&audio).await?;
    Ok(Json(json!({ "text": text })))
}

pub async fn create_video(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VideoRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let job = request.into_job()?;
    let task = state.ai.create_video(&job).await?;
    Ok(Json(json!({
        "success": true,
        "taskId": task.task_id,
        "status": task.status,
    })))
}

/// `GET /api/ai/video?taskId=...`.
pub async fn video_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<VideoStatus>> {
    let task_id = query
        .get("taskId")
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| WorldiaError::validation("taskId", "taskId is required"))?;
    Ok(Json(state.ai.video_status(task_id).await?))
}
