//! Application Context
//!
//! Shared API client and stores provided via Leptos Context API.

use leptos::prelude::*;

use crate::actions::Dispatcher;
use crate::api::ApiClient;
use crate::state::CancelToken;
use crate::store::{MetricsStore, TasksStore};

pub type AppDispatcher = Dispatcher<TasksStore, MetricsStore>;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub tasks: TasksStore,
    pub metrics: MetricsStore,
}

impl AppContext {
    pub fn new(api: ApiClient, tasks: TasksStore, metrics: MetricsStore) -> Self {
        Self { api, tasks, metrics }
    }

    /// Dispatcher whose requests stop applying once the calling view is cleaned up.
    ///
    /// Must be called while the view is being built.
    pub fn dispatcher(&self) -> AppDispatcher {
        let cancel = CancelToken::new();
        let on_teardown = cancel.clone();
        on_cleanup(move || on_teardown.cancel());
        Dispatcher::new(self.api.clone(), self.tasks, self.metrics, cancel)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
