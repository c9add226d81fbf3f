//! AI playground proxy: request validation and shaping.
//!
//! Incoming bodies are validated here and turned into provider jobs; the
//! [`AiProvider`] implementation only moves them over the wire.

mod provider;

pub use provider::{AiProvider, HttpAiProvider};

use crate::config::AiConfig;
use crate::error::{Result, WorldiaError};
use serde::{Deserialize, Serialize};

const ASSISTANT_PROMPT: &str = "Eres el asistente de WORLD.IA, una plataforma completa de herramientas de IA.
Tu objetivo es ayudar a los usuarios a:
- Encontrar las mejores herramientas de IA para sus necesidades
- Responder preguntas sobre IA y tecnología
- Ayudar con prompts y uso de herramientas de IA
- Proporcionar información sobre las últimas tendencias en IA
Responde de manera amigable, concisa y útil. Si no sabes algo, admítelo honestamente.
Puedes responder en español o inglés según el idioma del usuario.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A chat completion call as sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One prior turn as sent by the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/ai/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl ChatRequest {
    /// System prompt, then history, then the new message.
    pub fn into_completion(self) -> Result<CompletionRequest> {
        let message = match self.message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(WorldiaError::validation("message", "Message is required")),
        };

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::new(ChatRole::System, ASSISTANT_PROMPT));
        messages.extend(self.history.into_iter().map(|h| {
            let role = if h.role == "assistant" {
                ChatRole::Assistant
            } else {
                ChatRole::User
            };
            ChatMessage::new(role, h.content)
        }));
        messages.push(ChatMessage::new(ChatRole::User, message));

        Ok(CompletionRequest {
            messages,
            temperature: None,
            max_tokens: None,
        })
    }
}

/// What the code assistant should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMode {
    Generate,
    Explain,
    Debug,
    Improve,
    /// Any unrecognised mode: plain helper prompt.
    Freeform,
}

impl CodeMode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "generate" => CodeMode::Generate,
            "explain" => CodeMode::Explain,
            "debug" => CodeMode::Debug,
            "improve" => CodeMode::Improve,
            _ => CodeMode::Freeform,
        }
    }

    fn system_prompt(self) -> &'static str {
        match self {
            CodeMode::Generate => "You are an expert programmer. Generate clean, efficient, and well-documented code.
Always include comments explaining the code. Use best practices for the specified language.
Return only the code with markdown code blocks.",
            CodeMode::Explain => "You are an expert programmer and teacher. Explain code in a clear, easy-to-understand way.
Use markdown formatting for better readability. Include examples if helpful.",
            CodeMode::Debug => "You are an expert debugger. Analyze code for bugs, errors, and potential issues.
Provide clear explanations of problems and suggest fixes. Use markdown formatting.",
            CodeMode::Improve => "You are an expert code reviewer. Improve code quality, performance, and readability.
Suggest optimizations and best practices. Return the improved code with explanations.",
            CodeMode::Freeform => "You are a helpful coding assistant.",
        }
    }
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_mode() -> String {
    "generate".to_string()
}

/// Body of `POST /api/ai/code`.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl CodeRequest {
    pub fn into_completion(self) -> Result<CompletionRequest> {
        let prompt = present(self.prompt.as_deref());
        let code = present(self.code.as_deref());
        if prompt.is_none() && code.is_none() {
            return Err(WorldiaError::validation("prompt", "Prompt or code is required"));
        }

        let lang = self.language.as_str();
        let code_block = |verb: &str| {
            format!(
                "{} this {} code:\n\n```{}\n{}\n```",
                verb,
                lang,
                lang,
                code.unwrap_or_default()
            )
        };

        let mode = CodeMode::parse(&self.mode);
        let user_prompt = match mode {
            CodeMode::Generate => {
                format!("Generate {} code for: {}", lang, prompt.unwrap_or_default())
            }
            CodeMode::Explain => code_block("Explain"),
            CodeMode::Debug => format!(
                "{}\n\nProblem: {}",
                code_block("Debug"),
                prompt.unwrap_or("Find and fix any issues")
            ),
            CodeMode::Improve => code_block("Improve"),
            CodeMode::Freeform => prompt.or(code).unwrap_or_default().to_string(),
        };

        Ok(CompletionRequest {
            messages: vec![
                ChatMessage::new(ChatRole::System, mode.system_prompt()),
                ChatMessage::new(ChatRole::User, user_prompt),
            ],
            temperature: Some(AiConfig::CODE_TEMPERATURE),
            max_tokens: Some(AiConfig::CODE_MAX_TOKENS),
        })
    }
}

/// Body of `POST /api/ai/image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// A validated image generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageJob {
    pub prompt: String,
    pub size: String,
}

impl ImageRequest {
    pub fn into_job(self) -> Result<ImageJob> {
        let prompt = present(self.prompt.as_deref())
            .ok_or_else(|| WorldiaError::validation("prompt", "Prompt is required"))?
            .trim()
            .to_string();
        let size = self
            .size
            .unwrap_or_else(|| AiConfig::DEFAULT_IMAGE_SIZE.to_string());
        if !AiConfig::SUPPORTED_IMAGE_SIZES.contains(&size.as_str()) {
            return Err(WorldiaError::validation(
                "size",
                format!(
                    "Invalid size. Use: {}",
                    AiConfig::SUPPORTED_IMAGE_SIZES.join(", ")
                ),
            ));
        }
        Ok(ImageJob { prompt, size })
    }
}

/// Body of `POST /api/ai/tts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
}

/// A validated text-to-speech job. Audio comes back as WAV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechJob {
    pub input: String,
    pub voice: String,
    pub speed: f32,
}

impl SpeechRequest {
    pub fn into_job(self) -> Result<SpeechJob> {
        let text = match self.text {
            Some(t) if !t.is_empty() => t,
            _ => return Err(WorldiaError::validation("text", "Text is required")),
        };
        let speed = self
            .speed
            .filter(|s| s.is_finite())
            .unwrap_or(1.0)
            .clamp(AiConfig::TTS_MIN_SPEED, AiConfig::TTS_MAX_SPEED);

        Ok(SpeechJob {
            input: text.chars().take(AiConfig::TTS_MAX_CHARS).collect(),
            voice: self
                .voice
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| AiConfig::TTS_DEFAULT_VOICE.to_string()),
            speed,
        })
    }
}

/// Body of `POST /api/ai/asr`: base64-encoded audio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionRequest {
    #[serde(default)]
    pub audio: Option<String>,
}

impl TranscriptionRequest {
    pub fn into_audio(self) -> Result<String> {
        match self.audio {
            Some(audio) if !audio.trim().is_empty() => Ok(audio),
            _ => Err(WorldiaError::validation("audio", "Audio data is required")),
        }
    }
}

/// Body of `POST /api/ai/video`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub fps: Option<u32>,
    #[serde(default)]
    pub size: Option<String>,
}

/// A validated video generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quality: String,
    pub duration: u32,
    pub fps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VideoRequest {
    pub fn into_job(self) -> Result<VideoJob> {
        let prompt = self.prompt.filter(|p| !p.trim().is_empty());
        let image_url = self.image_url.filter(|u| !u.trim().is_empty());
        if prompt.is_none() && image_url.is_none() {
            return Err(WorldiaError::validation(
                "prompt",
                "Either prompt or image_url is required",
            ));
        }

        Ok(VideoJob {
            prompt,
            image_url,
            quality: self
                .quality
                .unwrap_or_else(|| AiConfig::VIDEO_DEFAULT_QUALITY.to_string()),
            duration: self.duration.unwrap_or(AiConfig::VIDEO_DEFAULT_DURATION),
            fps: self.fps.unwrap_or(AiConfig::VIDEO_DEFAULT_FPS),
            size: self.size,
        })
    }
}

/// A queued video generation task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTask {
    pub task_id: String,
    pub status: String,
}

/// Poll result of a video task. `video_url` is set once the task succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub task_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
