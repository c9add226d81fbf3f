//! Catalog query parsing.
//!
//! Query strings arrive loosely typed; [`RawToolQuery`] captures them verbatim
//! and [`ToolQuery::from_raw`] turns them into a validated, already-defaulted
//! query. Malformed values never fail: they fall back to defaults.

use super::types::Category;
use crate::config::CatalogConfig;
use serde::Deserialize;

/// Category selector of a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// A category string that names no known category. Matches nothing.
    Unknown(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "all" {
            CategoryFilter::All
        } else {
            raw.parse::<Category>()
                .map(CategoryFilter::Only)
                .unwrap_or_else(|_| CategoryFilter::Unknown(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
            CategoryFilter::Unknown(raw) => raw,
        }
    }
}

/// Query string parameters of `GET /api/tools`, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawToolQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub featured: Option<String>,
    pub trending: Option<String>,
    pub newest: Option<String>,
    pub top_rated: Option<String>,
    pub task: Option<String>,
    pub profession: Option<String>,
}

impl RawToolQuery {
    /// Collect decoded query pairs. When a key repeats, its first value wins
    /// and unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut raw.page,
                "limit" => &mut raw.limit,
                "category" => &mut raw.category,
                "search" => &mut raw.search,
                "featured" => &mut raw.featured,
                "trending" => &mut raw.trending,
                "newest" => &mut raw.newest,
                "topRated" => &mut raw.top_rated,
                "task" => &mut raw.task,
                "profession" => &mut raw.profession,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }
}

/// A validated catalog query.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolQuery {
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
    pub category: CategoryFilter,
    pub search: String,
    pub featured: bool,
    pub trending: bool,
    pub newest: bool,
    pub top_rated: bool,
    pub task: Option<String>,
    pub profession: Option<String>,
}

impl Default for ToolQuery {
    fn default() -> Self {
        Self {
            page: CatalogConfig::DEFAULT_PAGE,
            limit: CatalogConfig::DEFAULT_LIMIT,
            category: CategoryFilter::All,
            search: String::new(),
            featured: false,
            trending: false,
            newest: false,
            top_rated: false,
            task: None,
            profession: None,
        }
    }
}

/// Parse a positive integer, or `None` for anything else.
fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

fn flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

impl ToolQuery {
    /// Validate raw query string parameters.
    pub fn from_raw(raw: RawToolQuery) -> Self {
        let limit = positive(raw.limit.as_deref())
            .unwrap_or(CatalogConfig::DEFAULT_LIMIT)
            .min(CatalogConfig::MAX_LIMIT);

        Self {
            page: positive(raw.page.as_deref()).unwrap_or(CatalogConfig::DEFAULT_PAGE),
            limit,
            category: CategoryFilter::parse(raw.category.as_deref().unwrap_or("all")),
            search: raw.search.unwrap_or_default(),
            featured: flag(raw.featured.as_deref()),
            trending: flag(raw.trending.as_deref()),
            newest: flag(raw.newest.as_deref()),
            top_rated: flag(raw.top_rated.as_deref()),
            task: non_empty(raw.task),
            profession: non_empty(raw.profession),
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, CatalogConfig::MAX_LIMIT);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn trending(mut self) -> Self {
        self.trending = true;
        self
    }

    pub fn newest(mut self) -> Self {
        self.newest = true;
        self
    }

    pub fn top_rated(mut self) -> Self {
        self.top_rated = true;
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    /// Encode as a query string. `page` and `limit` are always present;
    /// everything else only when it differs from the default.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("page={}", self.page),
            format!("limit={}", self.limit),
        ];
        if self.category != CategoryFilter::All {
            parts.push(format!(
                "category={}",
                urlencoding::encode(self.category.as_str())
            ));
        }
        if !self.search.is_empty() {
            parts.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        for (name, enabled) in [
            ("featured", self.featured),
            ("trending", self.trending),
            ("newest", self.newest),
            ("topRated", self.top_rated),
        ] {
            if enabled {
                parts.push(format!("{}=true", name));
            }
        }
        if let Some(task) = &self.task {
            parts.push(format!("task={}", urlencoding::encode(task)));
        }
        if let Some(profession) = &self.profession {
            parts.push(format!("profession={}", urlencoding::encode(profession)));
        }
        parts.join("&")
    }
}
