//! Centralized configuration for the WORLD.IA backend.
//!
//! Constant groups for the catalog endpoint, the fetch cache, sessions and the
//! AI provider, plus [`AiSettings`] which is resolved from the environment at
//! startup.

use crate::error::{Result, WorldiaError};
use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "WORLD.IA";
    pub const DATA_DIR_NAME: &'static str = "worldia";
    pub const DATABASE_FILENAME: &'static str = "worldia.sqlite";
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;
    /// Requests handled concurrently before new ones queue.
    pub const MAX_CONCURRENT_REQUESTS: usize = 256;
}

/// Catalog query defaults.
pub struct CatalogConfig;

impl CatalogConfig {
    pub const DEFAULT_PAGE: usize = 1;
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 200;
    pub const TOP_RATED_THRESHOLD: f32 = 4.5;

    // Home page section sizes
    pub const FEATURED_LIMIT: usize = 8;
    pub const TRENDING_LIMIT: usize = 8;
    pub const NEWEST_LIMIT: usize = 12;
    pub const TOP_RATED_LIMIT: usize = 12;

    pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Client fetch cache defaults.
pub struct CacheConfig;

impl CacheConfig {
    pub const TTL: Duration = Duration::from_secs(5 * 60);
    pub const DEDUPING_INTERVAL: Duration = Duration::from_millis(2000);
    pub const MAX_ENTRIES: u64 = 1000;
}

/// Session cookie configuration.
pub struct SessionConfig;

impl SessionConfig {
    pub const COOKIE_NAME: &'static str = "worldia_session";
    pub const LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 30); // 30 days
}

/// Analytics configuration.
pub struct AnalyticsConfig;

impl AnalyticsConfig {
    /// Estimated revenue credited per outbound `click` action.
    pub const REVENUE_PER_CLICK: f64 = 0.001;
    pub const DEFAULT_TOP_TOOLS: usize = 3;
}

/// AI provider configuration.
pub struct AiConfig;

impl AiConfig {
    pub const BASE_URL_ENV: &'static str = "WORLDIA_AI_BASE_URL";
    pub const API_KEY_ENV: &'static str = "WORLDIA_AI_API_KEY";
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8080/v1";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
    pub const USER_AGENT: &'static str = "WorldIA/0.3";

    pub const SUPPORTED_IMAGE_SIZES: [&'static str; 7] = [
        "1024x1024",
        "768x1344",
        "864x1152",
        "1344x768",
        "1152x864",
        "1440x720",
        "720x1440",
    ];
    pub const DEFAULT_IMAGE_SIZE: &'static str = "1024x1024";

    pub const TTS_MAX_CHARS: usize = 1000;
    pub const TTS_DEFAULT_VOICE: &'static str = "tongtong";
    pub const TTS_MIN_SPEED: f32 = 0.5;
    pub const TTS_MAX_SPEED: f32 = 2.0;

    pub const CODE_TEMPERATURE: f32 = 0.7;
    pub const CODE_MAX_TOKENS: u32 = 2048;

    pub const VIDEO_DEFAULT_QUALITY: &'static str = "speed";
    pub const VIDEO_DEFAULT_DURATION: u32 = 5;
    pub const VIDEO_DEFAULT_FPS: u32 = 30;
}

/// Runtime settings for the AI provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: AiConfig::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: AiConfig::REQUEST_TIMEOUT,
        }
    }
}

/// Check that `raw` is an absolute `http(s)` URL and strip its trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| WorldiaError::Config {
        message: format!("Invalid base URL '{}': {}", raw, e),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(WorldiaError::Config {
            message: format!("Base URL must use http or https: {}", raw),
        });
    }
    Ok(trimmed.to_string())
}

impl AiSettings {
    /// Resolve settings from `WORLDIA_AI_BASE_URL` / `WORLDIA_AI_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(AiConfig::BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| AiConfig::DEFAULT_BASE_URL.to_string());
        let api_key = lookup(AiConfig::API_KEY_ENV).filter(|v| !v.trim().is_empty());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: AiConfig::REQUEST_TIMEOUT,
        }
    }
}
