//! Filter and paginate the catalog.
//!
//! Filters run in a fixed order: category, task, profession, search,
//! featured, trending, newest, top rated. Only the top-rated filter reorders
//! its input (stable sort by rating, highest first); every other filter
//! preserves catalog order.

use super::query::{CategoryFilter, ToolQuery};
use super::types::{Category, Facets, ToolRecord};
use crate::config::CatalogConfig;
use serde::{Deserialize, Serialize};

/// Pagination metadata of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_more: page < total_pages,
        }
    }

    /// Index range of this page within the filtered sequence.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit).min(self.total);
        let end = start.saturating_add(self.limit).min(self.total);
        start..end
    }
}

/// One page of filtered tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPage {
    pub tools: Vec<ToolRecord>,
    pub pagination: Pagination,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Categories allowed by a task or profession id; `None` when the id is unset.
/// An unknown id yields an empty allow-list.
fn allowed_categories<'f>(
    id: Option<&str>,
    lookup: impl Fn(&str) -> Option<&'f [Category]>,
) -> Option<&'f [Category]> {
    id.map(|id| lookup(id).unwrap_or(&[]))
}

/// Apply every active filter of `query`, returning matches in result order.
pub fn filter<'a>(tools: &'a [ToolRecord], facets: &Facets, query: &ToolQuery) -> Vec<&'a ToolRecord> {
    let task_categories = allowed_categories(query.task.as_deref(), |id| {
        facets.task(id).map(|t| t.categories.as_slice())
    });
    let profession_categories = allowed_categories(query.profession.as_deref(), |id| {
        facets.profession(id).map(|p| p.categories.as_slice())
    });
    let needle = query.search.to_lowercase();

    let mut matched: Vec<&ToolRecord> = tools
        .iter()
        .filter(|tool| match &query.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => tool.category == *category,
            CategoryFilter::Unknown(_) => false,
        })
        .filter(|tool| task_categories.map_or(true, |allowed| allowed.contains(&tool.category)))
        .filter(|tool| {
            profession_categories.map_or(true, |allowed| allowed.contains(&tool.category))
        })
        .filter(|tool| {
            needle.is_empty()
                || contains_ci(&tool.name, &needle)
                || contains_ci(&tool.description, &needle)
                || contains_ci(&tool.description_es, &needle)
        })
        .filter(|tool| !query.featured || tool.featured)
        .filter(|tool| !query.trending || tool.trending)
        .filter(|tool| !query.newest || tool.is_new)
        .filter(|tool| {
            !query.top_rated
                || tool
                    .rating
                    .is_some_and(|r| r >= CatalogConfig::TOP_RATED_THRESHOLD)
        })
        .collect();

    if query.top_rated {
        // `sort_by` is stable: equal ratings keep catalog order.
        matched.sort_by(|a, b| {
            let a = a.rating.unwrap_or_default();
            let b = b.rating.unwrap_or_default();
            b.total_cmp(&a)
        });
    }

    matched
}

/// Filter, optionally sort, and slice one page.
pub fn paginate(tools: &[ToolRecord], facets: &Facets, query: &ToolQuery) -> ToolPage {
    let matched = filter(tools, facets, query);
    let pagination = Pagination::new(query.page, query.limit, matched.len());
    let tools = matched[pagination.range()]
        .iter()
        .map(|tool| (*tool).clone())
        .collect();

    ToolPage { tools, pagination }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::data::{builtin_facets, builtin_tools};
    use crate::catalog::types::Pricing;

    fn tool(id: &str, category: Category, rating: Option<f32>) -> ToolRecord {
        ToolRecord {
            id: id.to_string(),
            name: id.to_string(),
            description: format!("{} description", id),
            description_es: format!("descripción de {}", id),
            category,
            pricing: Pricing::Free,
            rating,
            featured: false,
            trending: false,
            is_new: false,
            url: format!("https://{}.example", id),
            icon: String::new(),
            affiliate_url: None,
        }
    }

    /// 120 tools, every fourth one in `coding` (30 total).
    fn synthetic_catalog() -> Vec<ToolRecord> {
        (0..120)
            .map(|i| {
                let category = if i % 4 == 0 { Category::Coding } else { Category::Images };
                let mut t = tool(&format!("tool-{:03}", i), category, Some((i % 6) as f32));
                t.featured = i % 3 == 0;
                t.trending = i % 5 == 0;
                t.is_new = i % 2 == 0;
                t
            })
            .collect()
    }

    fn ids(page: &ToolPage) -> Vec<&str> {
        page.tools.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_unfiltered_pages_are_catalog_slices() {
        let catalog = synthetic_catalog();
        let facets = Facets::default();
        for (page, limit) in [(1, 50), (2, 50), (3, 50), (1, 7), (4, 7), (18, 7)] {
            let result = paginate(&catalog, &facets, &ToolQuery::default().page(page).limit(limit));
            let start = ((page - 1) * limit).min(catalog.len());
            let end = (start + limit).min(catalog.len());
            assert_eq!(result.tools, catalog[start..end].to_vec(), "page {} limit {}", page, limit);
        }
    }

    #[test]
    fn test_category_page_two_of_three() {
        let catalog = synthetic_catalog();
        let query = ToolQuery::default().category(Category::Coding).page(2).limit(10);
        let result = paginate(&catalog, &Facets::default(), &query);

        let coding: Vec<&str> = catalog
            .iter()
            .filter(|t| t.category == Category::Coding)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids(&result), coding[10..20].to_vec());
        assert_eq!(result.pagination.total, 30);
        assert_eq!(result.pagination.total_pages, 3);
        assert!(result.pagination.has_more);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let catalog: Vec<ToolRecord> = synthetic_catalog().into_iter().take(50).collect();
        let result = paginate(&catalog, &Facets::default(), &ToolQuery::default().page(999));
        assert!(result.tools.is_empty());
        assert_eq!(result.pagination.total, 50);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_more);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let catalog = synthetic_catalog();
        let query = ToolQuery::default().page(usize::MAX).limit(200);
        let result = paginate(&catalog, &Facets::default(), &query);
        assert!(result.tools.is_empty());
    }

    #[test]
    fn test_pagination_arithmetic() {
        for (total, limit, page) in [(0, 10, 1), (1, 10, 1), (10, 10, 1), (11, 10, 1), (11, 10, 2), (30, 7, 5)] {
            let p = Pagination::new(page, limit, total);
            assert_eq!(p.total_pages, (total + limit - 1) / limit);
            assert_eq!(p.has_more, page < p.total_pages);
        }
    }

    #[test]
    fn test_total_counts_all_active_filters() {
        let catalog = synthetic_catalog();
        let query = ToolQuery::default()
            .category(Category::Coding)
            .featured()
            .newest()
            .limit(3);
        let expected = catalog
            .iter()
            .filter(|t| t.category == Category::Coding && t.featured && t.is_new)
            .count();
        let result = paginate(&catalog, &Facets::default(), &query);
        assert_eq!(result.pagination.total, expected);
        assert!(result.tools.len() <= 3);
        assert!(result
            .tools
            .iter()
            .all(|t| t.category == Category::Coding && t.featured && t.is_new));
    }

    #[test]
    fn test_top_rated_filters_and_sorts_stably() {
        let catalog = vec![
            tool("a", Category::Chat, Some(4.5)),
            tool("b", Category::Chat, Some(4.9)),
            tool("c", Category::Chat, None),
            tool("d", Category::Chat, Some(4.4)),
            tool("e", Category::Chat, Some(4.9)),
            tool("f", Category::Chat, Some(4.7)),
        ];
        let result = paginate(&catalog, &Facets::default(), &ToolQuery::default().top_rated());
        assert_eq!(ids(&result), vec!["b", "e", "f", "a"]);
        assert!(result.tools.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(result.tools.iter().all(|t| t.rating.unwrap() >= 4.5));
    }

    #[test]
    fn test_other_filters_keep_catalog_order() {
        let mut low = tool("low", Category::Chat, Some(4.6));
        let mut high = tool("high", Category::Chat, Some(5.0));
        low.featured = true;
        high.featured = true;
        let catalog = vec![low, high];

        let result = paginate(&catalog, &Facets::default(), &ToolQuery::default().featured());
        assert_eq!(ids(&result), vec!["low", "high"]);

        let result = paginate(&catalog, &Facets::default(), &ToolQuery::default().featured().top_rated());
        assert_eq!(ids(&result), vec!["high", "low"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut chatgpt = tool("chatgpt", Category::Chat, Some(4.8));
        chatgpt.name = "ChatGPT".to_string();
        let catalog = vec![chatgpt, tool("midjourney", Category::Images, None)];

        for term in ["chat", "CHAT", "atGP"] {
            let result = paginate(&catalog, &Facets::default(), &ToolQuery::default().search(term));
            assert_eq!(ids(&result), vec!["chatgpt"], "term {}", term);
        }
    }

    #[test]
    fn test_search_matches_spanish_description() {
        let catalog = builtin_tools();
        let result = paginate(&catalog, &builtin_facets(), &ToolQuery::default().search("CANCIONES"));
        assert_eq!(ids(&result), vec!["suno"]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let catalog = synthetic_catalog();
        let query = ToolQuery {
            category: CategoryFilter::Unknown("cooking".into()),
            ..ToolQuery::default()
        };
        let result = paginate(&catalog, &Facets::default(), &query);
        assert!(result.tools.is_empty());
        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.total_pages, 0);
        assert!(!result.pagination.has_more);
    }

    #[test]
    fn test_task_and_profession_narrow_by_category() {
        let catalog = builtin_tools();
        let facets = builtin_facets();

        let result = paginate(&catalog, &facets, &ToolQuery::default().task("write-code"));
        assert!(!result.tools.is_empty());
        assert!(result.tools.iter().all(|t| t.category == Category::Coding));

        let result = paginate(&catalog, &facets, &ToolQuery::default().profession("analyst"));
        assert!(result
            .tools
            .iter()
            .all(|t| matches!(t.category, Category::Data | Category::Research)));

        let result = paginate(&catalog, &facets, &ToolQuery::default().task("juggling"));
        assert!(result.tools.is_empty());
    }

    #[test]
    fn test_same_query_is_deterministic() {
        let catalog = builtin_tools();
        let facets = builtin_facets();
        let query = ToolQuery::default().top_rated().limit(5);
        let first = paginate(&catalog, &facets, &query);
        let second = paginate(&catalog, &facets, &query);
        assert_eq!(first, second);
    }
}
