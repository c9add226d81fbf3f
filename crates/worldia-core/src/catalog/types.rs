//! Catalog record and facet types.
//!
//! Field names serialize in camelCase to match the JSON the directory
//! frontend consumes.

use crate::error::WorldiaError;
use serde::{Deserialize, Serialize};

/// Tool category. The set is fixed; `3d` is spelled out as `ThreeD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "images")]
    Images,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "chat")]
    Chat,
    #[serde(rename = "coding")]
    Coding,
    #[serde(rename = "productivity")]
    Productivity,
    #[serde(rename = "presentations")]
    Presentations,
    #[serde(rename = "data")]
    Data,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "marketing")]
    Marketing,
    #[serde(rename = "research")]
    Research,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Audio,
        Category::Images,
        Category::Video,
        Category::Chat,
        Category::Coding,
        Category::Productivity,
        Category::Presentations,
        Category::Data,
        Category::ThreeD,
        Category::Marketing,
        Category::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Audio => "audio",
            Category::Images => "images",
            Category::Video => "video",
            Category::Chat => "chat",
            Category::Coding => "coding",
            Category::Productivity => "productivity",
            Category::Presentations => "presentations",
            Category::Data => "data",
            Category::ThreeD => "3d",
            Category::Marketing => "marketing",
            Category::Research => "research",
        }
    }

}

impl std::str::FromStr for Category {
    type Err = WorldiaError;

    /// Exact, case-sensitive lookup by wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| WorldiaError::validation("category", format!("Unknown category: {}", s)))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pricing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pricing {
    Free,
    Freemium,
    Paid,
}

/// A single AI tool in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub description_es: String,
    pub category: Category,
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub is_new: bool,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    /// Partner link used for outbound traffic when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
}

impl ToolRecord {
    /// Outbound link for the tool, preferring the affiliate URL.
    pub fn affiliate_link(&self) -> &str {
        self.affiliate_url.as_deref().unwrap_or(&self.url)
    }
}

/// Category chip shown above the tool grid. The first entry is `all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub name_es: String,
}

/// A task shortcut ("write code", "make a logo") mapped to categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularTask {
    pub id: String,
    pub name: String,
    pub name_es: String,
    pub icon: String,
    pub categories: Vec<Category>,
}

/// A profession shortcut mapped to categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionFilter {
    pub id: String,
    pub name: String,
    pub name_es: String,
    pub icon: String,
    pub categories: Vec<Category>,
}

/// Glossary entry, bilingual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub definition_es: String,
    pub category: String,
    #[serde(default)]
    pub related_terms: Vec<String>,
}

/// Static reference lists returned with every catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<CategoryInfo>,
    pub popular_tasks: Vec<PopularTask>,
    pub profession_filters: Vec<ProfessionFilter>,
    pub ai_glossary: Vec<GlossaryTerm>,
}

impl Facets {
    pub fn task(&self, id: &str) -> Option<&PopularTask> {
        self.popular_tasks.iter().find(|t| t.id == id)
    }

    pub fn profession(&self, id: &str) -> Option<&ProfessionFilter> {
        self.profession_filters.iter().find(|p| p.id == id)
    }
}
