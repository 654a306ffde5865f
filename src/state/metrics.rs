//! Metrics Store State
//!
//! One aggregate snapshot plus task statistics. Each fetch family keeps its
//! own request status so concurrent fetches do not clobber each other's
//! loading flag.

use chrono::{DateTime, Utc};
use reactive_stores::Store;

use super::RequestStatus;
use crate::models::{Metrics, TaskStats};

/// Local counter adjustments applied after a task mutation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsAdjustment {
    TaskCreated,
    TaskCompleted,
    TaskModified,
    TaskDeleted,
}

/// The three independently tracked fetch families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsFetch {
    Metrics,
    Stats,
    Refresh,
}

impl MetricsFetch {
    pub fn status_mut(self, state: &mut MetricsState) -> &mut RequestStatus {
        match self {
            MetricsFetch::Metrics => &mut state.metrics_status,
            MetricsFetch::Stats => &mut state.stats_status,
            MetricsFetch::Refresh => &mut state.refresh_status,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct MetricsState {
    pub metrics: Option<Metrics>,
    pub stats: Option<TaskStats>,
    /// Set by local adjustments, cleared by the next authoritative fetch
    pub stale: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub metrics_status: RequestStatus,
    pub stats_status: RequestStatus,
    pub refresh_status: RequestStatus,
    /// Most recent failure across all three families
    pub last_error: Option<String>,
}

impl MetricsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_metrics(&mut self, metrics: Metrics, now: DateTime<Utc>) {
        self.metrics = Some(metrics);
        self.stale = false;
        self.last_updated = Some(now);
    }

    pub fn apply_stats(&mut self, stats: TaskStats, now: DateTime<Utc>) {
        self.stats = Some(stats);
        self.last_updated = Some(now);
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.metrics_status.error = None;
        self.stats_status.error = None;
        self.refresh_status.error = None;
    }

    /// Back to the unloaded state. In-flight request flags are kept.
    pub fn reset(&mut self) {
        self.metrics = None;
        self.stats = None;
        self.stale = false;
        self.last_updated = None;
        self.clear_error();
    }

    /// Best-effort counter bump without a server round-trip; no-op until loaded.
    pub fn adjust(&mut self, adjustment: MetricsAdjustment) {
        let Some(metrics) = self.metrics.as_mut() else {
            return;
        };

        match adjustment {
            MetricsAdjustment::TaskCreated => {
                metrics.total_tasks += 1;
                metrics.pending_tasks += 1;
            }
            MetricsAdjustment::TaskCompleted => {
                metrics.completed_tasks += 1;
                metrics.pending_tasks = metrics.pending_tasks.saturating_sub(1);
            }
            MetricsAdjustment::TaskModified => {
                metrics.modified_tasks += 1;
            }
            MetricsAdjustment::TaskDeleted => {
                metrics.total_tasks = metrics.total_tasks.saturating_sub(1);
                metrics.deleted_tasks += 1;
                if metrics.pending_tasks > 0 {
                    metrics.pending_tasks -= 1;
                } else if metrics.completed_tasks > 0 {
                    metrics.completed_tasks -= 1;
                }
            }
        }

        metrics.completion_rate = metrics.compute_completion_rate();
        self.stale = true;
    }

    // ========================
    // Selectors
    // ========================

    pub fn loading(&self) -> bool {
        self.metrics_status.loading || self.stats_status.loading || self.refresh_status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn completion_rate(&self) -> Option<f64> {
        self.metrics.as_ref().map(|m| m.completion_rate)
    }

    pub fn has_data(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.as_ref().is_some_and(|m| m.total_tasks == 0)
    }

    pub fn tasks_summary(&self) -> Option<TasksSummary> {
        self.metrics.as_ref().map(|m| TasksSummary {
            total: m.total_tasks,
            completed: m.completed_tasks,
            pending: m.pending_tasks,
            modified: m.modified_tasks,
            deleted: m.deleted_tasks,
        })
    }

    pub fn completion_status(&self) -> CompletionStatus {
        CompletionStatus::from_rate(self.completion_rate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TasksSummary {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    pub modified: u32,
    pub deleted: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    NoData,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CompletionStatus {
    /// A zero rate counts as no data.
    pub fn from_rate(rate: Option<f64>) -> Self {
        match rate {
            None => CompletionStatus::NoData,
            Some(r) if r <= 0.0 || r.is_nan() => CompletionStatus::NoData,
            Some(r) if r >= 80.0 => CompletionStatus::Excellent,
            Some(r) if r >= 60.0 => CompletionStatus::Good,
            Some(r) if r >= 40.0 => CompletionStatus::Fair,
            Some(_) => CompletionStatus::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompletionStatus::NoData => "no-data",
            CompletionStatus::Excellent => "excellent",
            CompletionStatus::Good => "good",
            CompletionStatus::Fair => "fair",
            CompletionStatus::Poor => "poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CompletionStatus::Excellent => "#4caf50",
            CompletionStatus::Good => "#8bc34a",
            CompletionStatus::Fair => "#ff9800",
            CompletionStatus::Poor => "#f44336",
            CompletionStatus::NoData => "#9e9e9e",
        }
    }
}
