//! UI Components
//!
//! Reusable Leptos components.

mod bulk_actions;
mod delete_confirm_button;
mod feedback;
mod insights;
mod metrics_cards;
mod recent_tasks;
mod service_status;
mod task_filters;
mod task_form;
mod task_list;
mod task_stats_panel;

pub use bulk_actions::BulkActions;
pub use delete_confirm_button::DeleteConfirmButton;
pub use feedback::{ErrorBanner, LoadingSpinner, Notice, Snackbar};
pub use insights::Insights;
pub use metrics_cards::MetricsCards;
pub use recent_tasks::RecentTasks;
pub use service_status::ServiceStatus;
pub use task_filters::TaskFilters;
pub use task_form::TaskForm;
pub use task_list::{Pagination, TaskList};
pub use task_stats_panel::TaskStatsPanel;
