//! Async Actions
//!
//! Each action moves its store through `pending -> fulfilled | rejected`:
//! the pending flag is raised, the API is called, and the settlement is
//! reduced into state. Task mutations that succeed also nudge the metrics
//! snapshot. Nothing is retried or deduplicated; settlements apply in
//! arrival order.

mod metrics;
mod tasks;

use std::future::Future;

use crate::api::{ApiClient, Result};
use crate::state::{CancelToken, MetricsAdjustment, MetricsState, StateCell, TasksState};

/// Bundles the API client, both stores and the owning view's cancel token.
#[derive(Clone)]
pub struct Dispatcher<T, M> {
    api: ApiClient,
    tasks: T,
    metrics: M,
    cancel: CancelToken,
}

impl<T, M> Dispatcher<T, M>
where
    T: StateCell<TasksState>,
    M: StateCell<MetricsState>,
{
    pub fn new(api: ApiClient, tasks: T, metrics: M, cancel: CancelToken) -> Self {
        Self { api, tasks, metrics, cancel }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Metrics follow a task mutation only while the owning view is alive.
    fn follow_up(&self, adjustment: MetricsAdjustment) {
        if !self.cancel.is_cancelled() {
            self.adjust_metrics(adjustment);
        }
    }

    /// Run one task-store request and reduce its settlement.
    async fn settle_tasks<R>(
        &self,
        request: impl Future<Output = Result<R>>,
        reduce: impl FnOnce(&mut TasksState, &R),
    ) -> Result<R> {
        self.tasks.apply(TasksState::begin);
        let outcome = request.await;

        if self.cancel.is_cancelled() {
            log::debug!(target: "store", "task request settled after cancel, dropping result");
            self.tasks.apply(TasksState::abandon);
            return outcome;
        }

        match &outcome {
            Ok(value) => self.tasks.apply(|state| reduce(state, value)),
            Err(err) => {
                let message = err.to_string();
                self.tasks.apply(|state| state.fail(message));
            }
        }
        outcome
    }
}
