//! Immutable, shareable catalog store.

use super::data::{builtin_facets, builtin_tools};
use super::engine::{paginate, Pagination};
use super::query::ToolQuery;
use super::types::{CategoryInfo, Facets, GlossaryTerm, PopularTask, ProfessionFilter, ToolRecord};
use crate::error::{Result, WorldiaError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Body of `GET /api/tools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsResponse {
    pub tools: Vec<ToolRecord>,
    pub pagination: Pagination,
    pub categories: Vec<CategoryInfo>,
    pub popular_tasks: Vec<PopularTask>,
    pub profession_filters: Vec<ProfessionFilter>,
    pub ai_glossary: Vec<GlossaryTerm>,
    /// Size of the whole catalog, independent of filters.
    pub total_count: usize,
}

/// On-disk catalog file. Facets are optional and default to the built-in set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    tools: Vec<ToolRecord>,
    #[serde(default)]
    facets: Option<Facets>,
}

/// The catalog, loaded once and shared read-only for the process lifetime.
///
/// Cloning is cheap: both halves sit behind `Arc`.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    tools: Arc<[ToolRecord]>,
    facets: Arc<Facets>,
}

impl CatalogStore {
    /// Create a store, validating ids and ratings.
    pub fn new(tools: Vec<ToolRecord>, facets: Facets) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.id.as_str()) {
                return Err(WorldiaError::validation(
                    "id",
                    format!("Duplicate tool id: {}", tool.id),
                ));
            }
            if let Some(rating) = tool.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(WorldiaError::validation(
                        "rating",
                        format!("Rating for {} must be between 0 and 5, got {}", tool.id, rating),
                    ));
                }
            }
        }

        Ok(Self {
            tools: tools.into(),
            facets: Arc::new(facets),
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            tools: builtin_tools().into(),
            facets: Arc::new(builtin_facets()),
        }
    }

    /// Load a catalog from a JSON file of the form `{"tools": [...], "facets": {...}}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| WorldiaError::io_with_path(e, path))?;
        let file: CatalogFile = serde_json::from_str(&contents)?;
        let store = Self::new(file.tools, file.facets.unwrap_or_else(builtin_facets))?;
        info!("Loaded {} tools from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Run a query and assemble the full response body.
    pub fn query(&self, query: &ToolQuery) -> ToolsResponse {
        let page = paginate(&self.tools, &self.facets, query);
        debug!(
            "Catalog query {:?} -> {} of {} matches",
            query,
            page.tools.len(),
            page.pagination.total
        );

        ToolsResponse {
            tools: page.tools,
            pagination: page.pagination,
            categories: self.facets.categories.clone(),
            popular_tasks: self.facets.popular_tasks.clone(),
            profession_filters: self.facets.profession_filters.clone(),
            ai_glossary: self.facets.ai_glossary.clone(),
            total_count: self.tools.len(),
        }
    }
}
