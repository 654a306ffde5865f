//! Frontend Models
//!
//! Data structures matching the task API payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length accepted by the API
pub const TITLE_MAX_LEN: usize = 255;
/// Maximum description length accepted by the API
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Task data structure (matches backend `TaskResponse`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_completed: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub modification_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// Merge the fields present in `changes` into this task
    pub fn apply(&mut self, changes: &TaskUpdate) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(is_completed) = changes.is_completed {
            self.is_completed = is_completed;
        }
    }

    pub fn created_display(&self) -> String {
        format_timestamp(&self.created_at)
    }

    pub fn updated_display(&self) -> String {
        format_timestamp(&self.updated_at)
    }
}

/// Format a server timestamp for display, falling back to the raw value.
///
/// The API emits either RFC 3339 or naive ISO-8601 (no offset) timestamps.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}

/// Fields for creating a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update; absent fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }
}

/// One page of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub total: u32,
    pub page: u32,
    pub size: u32,
}

/// Search filter; `None` fields are not sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSearchParams {
    pub title: Option<String>,
    pub is_completed: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl Default for TaskSearchParams {
    fn default() -> Self {
        Self {
            title: None,
            is_completed: None,
            page: Some(1),
            size: Some(10),
        }
    }
}

impl TaskSearchParams {
    /// Overwrite only the fields that are set in `other`
    pub fn merge(&mut self, other: TaskSearchParams) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.is_completed.is_some() {
            self.is_completed = other.is_completed;
        }
        if other.page.is_some() {
            self.page = other.page;
        }
        if other.size.is_some() {
            self.size = other.size;
        }
    }

    /// Query pairs in the order the search endpoint documents them
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            query.push(("title".to_string(), title.to_string()));
        }
        if let Some(done) = self.is_completed {
            query.push(("is_completed".to_string(), done.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size.filter(|s| *s > 0) {
            query.push(("size".to_string(), size.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub task_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted_count: u32,
    #[serde(default)]
    pub message: String,
}

/// Dashboard metrics snapshot (matches backend `MetricsResponse`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
    pub deleted_tasks: u32,
    pub modified_tasks: u32,
    #[serde(default)]
    pub completion_rate: f64,
}

impl Metrics {
    /// completed / total * 100, or 0 when there are no tasks
    pub fn compute_completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            f64::from(self.completed_tasks) / f64::from(self.total_tasks) * 100.0
        }
    }
}

/// Detailed statistics (matches backend `TaskStatsResponse`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total_created: u32,
    pub total_completed: u32,
    pub total_deleted: u32,
    pub total_modified: u32,
    pub average_modifications: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTrends {
    pub period_days: u32,
    pub tasks_created: u32,
    pub tasks_completed: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedTaskSummary {
    pub id: u32,
    pub title: String,
    pub modification_count: u32,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MostModifiedTasks {
    pub tasks: Vec<ModifiedTaskSummary>,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivityMetrics {
    pub tasks_created_today: u32,
    pub tasks_completed_today: u32,
    pub average_task_lifetime: f64,
    pub most_active_hour: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub categories: std::collections::BTreeMap<String, u32>,
    #[serde(default)]
    pub uncategorized_count: u32,
}

/// Health payload; the service may add fields, so unknown keys are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything the dashboard page needs in one round
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub metrics: Metrics,
    pub stats: TaskStats,
    pub trends: CompletionTrends,
    pub productivity: ProductivityMetrics,
}

#[cfg(test)]
pub(crate) fn make_task(id: u32, title: &str, is_completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        is_completed,
        is_deleted: false,
        modification_count: 0,
        created_at: "2024-01-15T10:30:00".to_string(),
        updated_at: "2024-01-15T10:30:00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_backend_payload() {
        let json = r#"{
            "id": 7,
            "title": "Buy milk",
            "description": null,
            "is_completed": false,
            "is_deleted": false,
            "modification_count": 2,
            "created_at": "2024-01-15T10:30:00",
            "updated_at": "2024-01-15T11:00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.modification_count, 2);
        assert_eq!(task.description, None);
    }

    #[test]
    fn test_completion_rate_zero_total() {
        let metrics = Metrics::default();
        assert_eq!(metrics.compute_completion_rate(), 0.0);

        let metrics = Metrics { total_tasks: 4, completed_tasks: 1, ..Default::default() };
        assert_eq!(metrics.compute_completion_rate(), 25.0);
    }

    #[test]
    fn test_search_params_merge_keeps_unset_fields() {
        let mut params = TaskSearchParams::default();
        params.merge(TaskSearchParams {
            title: Some("milk".into()),
            is_completed: None,
            page: None,
            size: None,
        });
        assert_eq!(params.title.as_deref(), Some("milk"));
        assert_eq!(params.page, Some(1));
        assert_eq!(params.size, Some(10));
    }

    #[test]
    fn test_search_params_query_skips_empty_title() {
        let params = TaskSearchParams {
            title: Some(String::new()),
            is_completed: Some(false),
            page: Some(2),
            size: Some(20),
        };
        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("is_completed".to_string(), "false".to_string()),
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let json = serde_json::to_string(&TaskUpdate::completion(true)).unwrap();
        assert_eq!(json, r#"{"is_completed":true}"#);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00"), "2024-01-15 10:30");
        assert_eq!(format_timestamp("2024-01-15T10:30:00.123456"), "2024-01-15 10:30");
        assert_eq!(format_timestamp("2024-01-15T10:30:00Z"), "2024-01-15 10:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
