//! HTTP client for the tools endpoint, wired into a [`FetchCache`].

use crate::catalog::{ToolQuery, ToolsResponse};
use crate::config::{normalize_base_url, AiConfig, CatalogConfig};
use crate::error::{Result, WorldiaError};
use crate::fetch_cache::{FetchCache, Resource};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Fetches catalog pages from a running server.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    cache: Arc<FetchCache<ToolsResponse>>,
}

impl CatalogClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>, cache: Arc<FetchCache<ToolsResponse>>) -> Result<Self> {
        Self::with_timeout(base_url, cache, CatalogConfig::CLIENT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        cache: Arc<FetchCache<ToolsResponse>>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(AiConfig::USER_AGENT)
            .build()
            .map_err(|e| WorldiaError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self {
            client,
            base_url,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<FetchCache<ToolsResponse>> {
        &self.cache
    }

    /// Request path for a query; doubles as the cache key.
    pub fn path_for(query: &ToolQuery) -> String {
        format!("/api/tools?{}", query.to_query_string())
    }

    /// Fetch one page, bypassing the cache.
    pub async fn fetch_tools(&self, query: &ToolQuery) -> Result<ToolsResponse> {
        let url = format!("{}{}", self.base_url, Self::path_for(query));
        Self::get_json(&self.client, &url).await
    }

    async fn get_json(client: &Client, url: &str) -> Result<ToolsResponse> {
        debug!("GET {}", url);
        let response = client.get(url).send().await.map_err(|e| WorldiaError::Network {
            message: format!("GET {} failed: {}", url, e),
            source: Some(e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorldiaError::Upstream {
                service: "catalog".to_string(),
                message: format!("GET {} returned {}", url, status),
            });
        }

        Ok(response.json::<ToolsResponse>().await?)
    }

    /// A cache-backed resource for `query`, keyed by its request path.
    pub fn resource_for(&self, query: &ToolQuery) -> Resource<ToolsResponse> {
        let path = Self::path_for(query);
        let url = format!("{}{}", self.base_url, path);
        let client = self.client.clone();
        Resource::new(path, Arc::clone(&self.cache), move || {
            let client = client.clone();
            let url = url.clone();
            async move { Self::get_json(&client, &url).await }
        })
    }

    pub fn featured(&self) -> Resource<ToolsResponse> {
        self.resource_for(&ToolQuery::default().featured().limit(CatalogConfig::FEATURED_LIMIT))
    }

    pub fn trending(&self) -> Resource<ToolsResponse> {
        self.resource_for(&ToolQuery::default().trending().limit(CatalogConfig::TRENDING_LIMIT))
    }

    pub fn newest(&self) -> Resource<ToolsResponse> {
        self.resource_for(&ToolQuery::default().newest().limit(CatalogConfig::NEWEST_LIMIT))
    }

    pub fn top_rated(&self) -> Resource<ToolsResponse> {
        self.resource_for(&ToolQuery::default().top_rated().limit(CatalogConfig::TOP_RATED_LIMIT))
    }
}
