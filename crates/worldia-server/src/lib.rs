//! WORLD.IA Server - HTTP API for the AI tools directory.
//!
//! Wraps `worldia-core` in an Axum router: the catalog endpoint, accounts,
//! interactions, click analytics and the AI playground proxy.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState};
