//! WORLD.IA Core - Headless library for the bilingual AI tools directory.
//!
//! This crate provides the catalog and its filter/paginate engine, a
//! client-side fetch cache, accounts, item interactions, click analytics and
//! the AI playground request shaping. It can be used without the HTTP layer
//! in `worldia-server`.
//!
//! # Example
//!
//! ```rust,ignore
//! use worldia_core::{CatalogStore, ToolQuery, Category};
//!
//! let store = CatalogStore::builtin();
//! let page = store.query(&ToolQuery::default().category(Category::Coding).limit(10));
//! println!("{} of {} coding tools", page.tools.len(), page.pagination.total);
//! ```

pub mod accounts;
pub mod ai;
pub mod analytics;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch_cache;
pub mod interactions;

// Re-export commonly used types
pub use accounts::{AccountStore, PublicUser, Session};
pub use ai::{AiProvider, HttpAiProvider};
pub use analytics::{ClickAction, ClickEvent, ClickStats, ClickTracker};
pub use catalog::{
    CatalogStore, Category, Facets, Pagination, RawToolQuery, ToolQuery, ToolRecord,
    ToolsResponse,
};
pub use client::CatalogClient;
pub use config::AiSettings;
pub use error::{Result, WorldiaError};
pub use fetch_cache::{FetchCache, FetchCacheConfig, FetchOutcome, Resource, ResourceState};
pub use interactions::{InteractionStore, ItemRef};
