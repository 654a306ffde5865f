//! Pages
//!
//! Top-level views switched by the app header.

mod dashboard;
mod tasks;

pub use dashboard::DashboardPage;
pub use tasks::TasksPage;
