//! AI provider abstraction and its HTTP implementation.

use super::{CompletionRequest, ImageJob, SpeechJob, VideoJob, VideoStatus, VideoTask};
use crate::config::{normalize_base_url, AiConfig, AiSettings};
use crate::error::{Result, WorldiaError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Backend that fulfils AI playground requests.
///
/// Implement this to plug in a different model host; the server only talks to
/// this trait.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Run a chat completion and return the assistant's text.
    async fn chat(&self, request: &CompletionRequest) -> Result<String>;

    /// Generate an image; returns base64-encoded image data.
    async fn image(&self, job: &ImageJob) -> Result<String>;

    /// Synthesize speech; returns WAV bytes.
    async fn speech(&self, job: &SpeechJob) -> Result<Bytes>;

    /// Transcribe base64-encoded audio.
    async fn transcribe(&self, audio_base64: &str) -> Result<String>;

    async fn create_video(&self, job: &VideoJob) -> Result<VideoTask>;

    async fn video_status(&self, task_id: &str) -> Result<VideoStatus>;
}

/// OpenAI-style JSON API over HTTP.
pub struct HttpAiProvider {
    client: Client,
    settings: AiSettings,
}

impl HttpAiProvider {
    pub fn new(mut settings: AiSettings) -> Result<Self> {
        settings.base_url = normalize_base_url(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(AiConfig::USER_AGENT)
            .build()
            .map_err(|e| WorldiaError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.settings.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| WorldiaError::Network {
                message: format!("{} request failed: {}", what, e),
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AI provider returned {} for {}", status, what);
            return Err(upstream(format!(
                "{} returned {}: {}",
                what,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(response)
    }

    async fn post_json(&self, path: &str, body: &Value, what: &str) -> Result<Value> {
        debug!("POST {} ({})", path, what);
        let response = self
            .send(self.client.post(self.url(path)).json(body), what)
            .await?;
        Ok(response.json::<Value>().await?)
    }
}

fn upstream(message: impl Into<String>) -> WorldiaError {
    WorldiaError::Upstream {
        service: "ai".to_string(),
        message: message.into(),
    }
}

fn parse_completion(body: &Value) -> Result<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| upstream("Empty response from AI"))
}

fn parse_image(body: &Value) -> Result<String> {
    let first = body.pointer("/data/0");
    first
        .and_then(|d| d.get("base64").or_else(|| d.get("b64_json")))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| upstream("Image generation returned empty result"))
}

fn parse_video_task(body: &Value) -> Result<VideoTask> {
    let task_id = body
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| upstream("Video task response has no id"))?;
    Ok(VideoTask {
        task_id: task_id.to_string(),
        status: body
            .get("task_status")
            .and_then(Value::as_str)
            .unwrap_or("PROCESSING")
            .to_string(),
    })
}

fn parse_video_status(task_id: &str, body: &Value) -> VideoStatus {
    let status = body
        .get("task_status")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_string();
    let video_url = if status == "SUCCESS" {
        body.pointer("/video_result/0/url")
            .and_then(Value::as_str)
            .map(str::to_string)
    } else {
        None
    };
    VideoStatus {
        task_id: task_id.to_string(),
        status,
        video_url,
    }
}

#[async_trait]
impl AiProvider for HttpAiProvider {
    async fn chat(&self, request: &CompletionRequest) -> Result<String> {
        let mut body = serde_json::to_value(request)?;
        body["thinking"] = json!({ "type": "disabled" });
        let response = self.post_json("chat/completions", &body, "chat").await?;
        parse_completion(&response)
    }

    async fn image(&self, job: &ImageJob) -> Result<String> {
        let response = self
            .post_json("images/generations", &serde_json::to_value(job)?, "image")
            .await?;
        parse_image(&response)
    }

    async fn speech(&self, job: &SpeechJob) -> Result<Bytes> {
        let body = json!({
            "input": job.input,
            "voice": job.voice,
            "speed": job.speed,
            "response_format": "wav",
            "stream": false,
        });
        let response = self
            .send(self.client.post(self.url("audio/tts")).json(&body), "tts")
            .await?;
        Ok(response.bytes().await?)
    }

    async fn transcribe(&self, audio_base64: &str) -> Result<String> {
        let body = json!({ "file_base64": audio_base64 });
        let response = self.post_json("audio/asr", &body, "asr").await?;
        response
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| upstream("Transcription response has no text"))
    }

    async fn create_video(&self, job: &VideoJob) -> Result<VideoTask> {
        let response = self
            .post_json("videos/generations", &serde_json::to_value(job)?, "video")
            .await?;
        parse_video_task(&response)
    }

    async fn video_status(&self, task_id: &str) -> Result<VideoStatus> {
        if task_id.trim().is_empty() {
            return Err(WorldiaError::validation("taskId", "taskId is required"));
        }
        let path = format!("async-result/{}", urlencoding::encode(task_id));
        debug!("GET {}", path);
        let response = self
            .send(self.client.get(self.url(&path)), "video status")
            .await?;
        let body = response.json::<Value>().await?;
        Ok(parse_video_status(task_id, &body))
    }
}
