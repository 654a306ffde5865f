//! Metrics Endpoints
//!
//! Dashboard aggregates under `/metrics`, plus the local snapshot cache.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{ApiClient, Result, METRICS_CACHE_KEY, METRICS_CACHE_TTL};
use crate::models::{
    CategoryBreakdown, CompletionTrends, DashboardData, Metrics, MostModifiedTasks,
    ProductivityMetrics, ServiceHealth, TaskStats,
};

pub const DEFAULT_TREND_DAYS: u32 = 30;
pub const DEFAULT_MOST_MODIFIED_LIMIT: u32 = 10;

/// Persisted form of the cached snapshot; `timestamp` is epoch milliseconds.
#[derive(Debug, Serialize, Deserialize)]
struct CachedMetrics {
    data: Metrics,
    timestamp: i64,
}

impl ApiClient {
    pub async fn get_metrics(&self) -> Result<Metrics> {
        self.get("/metrics", Vec::new()).await
    }

    pub async fn get_task_stats(&self) -> Result<TaskStats> {
        self.get("/metrics/stats", Vec::new()).await
    }

    /// Same request as [`get_metrics`](Self::get_metrics).
    pub async fn refresh_metrics(&self) -> Result<Metrics> {
        self.get_metrics().await
    }

    pub async fn get_completion_trends(&self, days: u32) -> Result<CompletionTrends> {
        self.get("/metrics/trends", vec![("days".to_string(), days.to_string())])
            .await
    }

    pub async fn get_most_modified_tasks(&self, limit: u32) -> Result<MostModifiedTasks> {
        self.get("/metrics/most-modified", vec![("limit".to_string(), limit.to_string())])
            .await
    }

    pub async fn get_productivity_metrics(&self) -> Result<ProductivityMetrics> {
        self.get("/metrics/productivity", Vec::new()).await
    }

    pub async fn get_category_breakdown(&self) -> Result<CategoryBreakdown> {
        self.get("/metrics/categories", Vec::new()).await
    }

    pub async fn get_metrics_health(&self) -> Result<ServiceHealth> {
        self.get("/metrics/health", Vec::new()).await
    }

    /// Metrics, stats, 30-day trends and productivity in parallel; any failure fails the whole.
    pub async fn get_dashboard_data(&self) -> Result<DashboardData> {
        let result = futures::try_join!(
            self.get_metrics(),
            self.get_task_stats(),
            self.get_completion_trends(DEFAULT_TREND_DAYS),
            self.get_productivity_metrics(),
        );
        match result {
            Ok((metrics, stats, trends, productivity)) => Ok(DashboardData {
                metrics,
                stats,
                trends,
                productivity,
            }),
            Err(err) => {
                log::error!(target: "api", "failed to fetch dashboard data: {}", err);
                Err(err)
            }
        }
    }

    /// Serve metrics from the local cache while fresh, otherwise fetch and re-cache.
    pub async fn get_metrics_with_cache(&self, force_refresh: bool) -> Result<Metrics> {
        self.metrics_with_cache_at(force_refresh, Utc::now().timestamp_millis())
            .await
    }

    async fn metrics_with_cache_at(&self, force_refresh: bool, now_ms: i64) -> Result<Metrics> {
        if !force_refresh {
            if let Some(cached) = self.cached_metrics(now_ms) {
                log::debug!(target: "api", "metrics served from cache");
                return Ok(cached);
            }
        }

        let metrics = self.get_metrics().await?;
        let entry = CachedMetrics {
            data: metrics.clone(),
            timestamp: now_ms,
        };
        match serde_json::to_string(&entry) {
            Ok(json) => self.storage().set(METRICS_CACHE_KEY, &json),
            Err(err) => log::warn!(target: "api", "could not cache metrics: {}", err),
        }
        Ok(metrics)
    }

    fn cached_metrics(&self, now_ms: i64) -> Option<Metrics> {
        let raw = self.storage().get(METRICS_CACHE_KEY)?;
        let entry: CachedMetrics = serde_json::from_str(&raw).ok()?;
        let age = now_ms.saturating_sub(entry.timestamp);
        (age >= 0 && (age as u128) < METRICS_CACHE_TTL.as_millis()).then_some(entry.data)
    }

    pub fn clear_metrics_cache(&self) {
        self.storage().remove(METRICS_CACHE_KEY);
    }
}
