//! Outbound click tracking for monetization analytics.

use crate::config::AnalyticsConfig;
use crate::error::{Result, WorldiaError};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// What the visitor did with a tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickAction {
    #[default]
    Click,
    Visit,
    Share,
    Like,
    Favorite,
}

impl ClickAction {
    /// Estimated revenue of one action.
    pub fn revenue(self) -> f64 {
        match self {
            ClickAction::Click => AnalyticsConfig::REVENUE_PER_CLICK,
            _ => 0.0,
        }
    }
}

/// Body of `POST /api/analytics/click`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub tool_id: String,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub action: ClickAction,
    /// Client-side time; the server clock is used when absent.
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolClicks {
    pub id: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub today: f64,
    pub month: f64,
    pub total: f64,
}

/// Body of `GET /api/analytics/click`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    pub total_clicks: u64,
    pub today_clicks: u64,
    pub top_tools: Vec<ToolClicks>,
    pub revenue: Revenue,
}

#[derive(Default)]
struct Counters {
    total: u64,
    by_day: HashMap<NaiveDate, u64>,
    by_tool: HashMap<String, u64>,
}

/// In-memory click counters. Only `click` actions are counted; every
/// action is logged.
#[derive(Default)]
pub struct ClickTracker {
    counters: Mutex<Counters>,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn track(&self, event: &ClickEvent) -> Result<()> {
        self.track_at(event, Utc::now())
    }

    /// Record `event` as received at `now`.
    pub fn track_at(&self, event: &ClickEvent, now: DateTime<Utc>) -> Result<()> {
        if event.tool_id.trim().is_empty() {
            return Err(WorldiaError::validation("toolId", "toolId is required"));
        }

        let timestamp = event.timestamp.clone().unwrap_or_else(|| now.to_rfc3339());
        info!(
            tool_id = %event.tool_id,
            tool_name = event.tool_name.as_deref().unwrap_or(""),
            category = event.category.as_deref().unwrap_or(""),
            action = ?event.action,
            revenue = event.action.revenue(),
            %timestamp,
            "Tracked tool click"
        );

        if event.action == ClickAction::Click {
            let mut counters = self.lock();
            counters.total += 1;
            *counters.by_day.entry(now.date_naive()).or_default() += 1;
            *counters.by_tool.entry(event.tool_id.clone()).or_default() += 1;
        }
        Ok(())
    }

    pub fn stats(&self, top_n: usize) -> ClickStats {
        self.stats_at(top_n, Utc::now())
    }

    /// Counters as seen at `now`. Ties in the top list are broken by id.
    pub fn stats_at(&self, top_n: usize, now: DateTime<Utc>) -> ClickStats {
        let counters = self.lock();
        let today = now.date_naive();
        let today_clicks = counters.by_day.get(&today).copied().unwrap_or(0);
        let month_clicks: u64 = counters
            .by_day
            .iter()
            .filter(|(day, _)| day.year() == today.year() && day.month() == today.month())
            .map(|(_, clicks)| clicks)
            .sum();

        let mut top_tools: Vec<ToolClicks> = counters
            .by_tool
            .iter()
            .map(|(id, clicks)| ToolClicks {
                id: id.clone(),
                clicks: *clicks,
            })
            .collect();
        top_tools.sort_by(|a, b| b.clicks.cmp(&a.clicks).then_with(|| a.id.cmp(&b.id)));
        top_tools.truncate(top_n);

        let per_click = AnalyticsConfig::REVENUE_PER_CLICK;
        ClickStats {
            total_clicks: counters.total,
            today_clicks,
            top_tools,
            revenue: Revenue {
                today: round_cents(today_clicks as f64 * per_click),
                month: round_cents(month_clicks as f64 * per_click),
                total: round_cents(counters.total as f64 * per_click),
            },
        }
    }
}
