//! HTTP server implementation using Axum.

use crate::handlers::{ai, analytics, auth, handle_health, interactions, tools};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use worldia_core::config::AppConfig;
use worldia_core::{AccountStore, AiProvider, CatalogStore, ClickTracker, InteractionStore};

/// Application state shared across handlers.
pub struct AppState {
    /// Read-only tool catalog
    pub catalog: CatalogStore,
    /// Accounts and sessions
    pub accounts: AccountStore,
    /// Likes, favorites, ratings, comments, shares
    pub interactions: InteractionStore,
    /// Outbound click counters
    pub clicks: ClickTracker,
    /// AI playground backend
    pub ai: Arc<dyn AiProvider>,
}

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        interactions: InteractionStore,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            catalog,
            accounts: AccountStore::new(),
            interactions,
            clicks: ClickTracker::new(),
            ai,
        }
    }
}

/// Build the API router.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Configure CORS for the browser frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        // Catalog
        .route("/api/tools", get(tools::list_tools))
        .route("/api/tools/:id", get(tools::get_tool))
        // Accounts
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::current_user))
        // Interactions
        .route(
            "/api/interactions/like",
            post(interactions::toggle_like).get(interactions::like_summary),
        )
        .route(
            "/api/interactions/favorite",
            post(interactions::toggle_favorite).get(interactions::favorite_summary),
        )
        .route(
            "/api/interactions/rate",
            post(interactions::rate).get(interactions::rating_summary),
        )
        .route(
            "/api/interactions/comment",
            post(interactions::add_comment).get(interactions::list_comments),
        )
        .route(
            "/api/interactions/share",
            post(interactions::record_share).get(interactions::share_count),
        )
        // Analytics
        .route(
            "/api/analytics/click",
            post(analytics::track_click).get(analytics::click_stats),
        )
        // AI playground
        .route("/api/ai/chat", post(ai::chat))
        .route("/api/ai/code", post(ai::code))
        .route("/api/ai/image", post(ai::image))
        .route("/api/ai/tts", post(ai::speech))
        .route("/api/ai/asr", post(ai::transcribe))
        .route("/api/ai/video", post(ai::create_video).get(ai::video_status))
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(AppConfig::MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let app = build_router(Arc::new(state));

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
