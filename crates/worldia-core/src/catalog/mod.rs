//! Static AI tool catalog and its query engine.
//!
//! This module provides:
//! - Tool records and facet types
//! - The built-in directory data
//! - Query parsing with silent fallback to defaults
//! - The filter/paginate engine and the shared read-only store

mod data;
mod engine;
mod query;
mod store;
mod types;

pub use data::{builtin_facets, builtin_tools};
pub use engine::{filter, paginate, Pagination, ToolPage};
pub use query::{CategoryFilter, RawToolQuery, ToolQuery};
pub use store::{CatalogStore, ToolsResponse};
pub use types::{
    Category, CategoryInfo, Facets, GlossaryTerm, PopularTask, Pricing, ProfessionFilter,
    ToolRecord,
};
