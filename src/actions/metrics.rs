//! Metrics Actions

use std::future::Future;

use chrono::Utc;

use super::Dispatcher;
use crate::api::Result;
use crate::models::{Metrics, TaskStats};
use crate::state::{MetricsAdjustment, MetricsFetch, MetricsState, StateCell, TasksState};

impl<T, M> Dispatcher<T, M>
where
    T: StateCell<TasksState>,
    M: StateCell<MetricsState>,
{
    async fn settle_metrics<R>(
        &self,
        family: MetricsFetch,
        request: impl Future<Output = Result<R>>,
        reduce: impl FnOnce(&mut MetricsState, &R),
    ) -> Result<R> {
        self.metrics.apply(|state| {
            family.status_mut(state).begin();
            state.last_error = None;
        });
        let outcome = request.await;

        if self.cancel.is_cancelled() {
            self.metrics.apply(|state| family.status_mut(state).abandon());
            return outcome;
        }

        match &outcome {
            Ok(value) => self.metrics.apply(|state| {
                family.status_mut(state).succeed();
                reduce(state, value);
            }),
            Err(err) => {
                let message = err.to_string();
                self.metrics.apply(|state| {
                    family.status_mut(state).fail(message.clone());
                    state.record_error(message);
                });
            }
        }
        outcome
    }

    pub async fn fetch_metrics(&self) -> Result<Metrics> {
        self.settle_metrics(MetricsFetch::Metrics, self.api.get_metrics(), |state, metrics| {
            state.apply_metrics(metrics.clone(), Utc::now())
        })
        .await
    }

    /// Same as [`fetch_metrics`](Self::fetch_metrics) but served from the
    /// five-minute local cache unless `force_refresh`.
    pub async fn fetch_metrics_cached(&self, force_refresh: bool) -> Result<Metrics> {
        self.settle_metrics(
            MetricsFetch::Metrics,
            self.api.get_metrics_with_cache(force_refresh),
            |state, metrics| state.apply_metrics(metrics.clone(), Utc::now()),
        )
        .await
    }

    pub async fn fetch_task_stats(&self) -> Result<TaskStats> {
        self.settle_metrics(MetricsFetch::Stats, self.api.get_task_stats(), |state, stats| {
            state.apply_stats(stats.clone(), Utc::now())
        })
        .await
    }

    pub async fn refresh_metrics(&self) -> Result<Metrics> {
        self.settle_metrics(MetricsFetch::Refresh, self.api.refresh_metrics(), |state, metrics| {
            state.apply_metrics(metrics.clone(), Utc::now())
        })
        .await
    }

    /// The cached snapshot predates the adjustment, so it is dropped; the
    /// next cached fetch goes to the server.
    pub fn adjust_metrics(&self, adjustment: MetricsAdjustment) {
        self.api.clear_metrics_cache();
        self.metrics.apply(|state| state.adjust(adjustment));
    }

    pub fn reset_metrics(&self) {
        self.metrics.apply(MetricsState::reset);
    }

    pub fn clear_metrics_error(&self) {
        self.metrics.apply(MetricsState::clear_error);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use crate::actions::Dispatcher;
    use crate::api::testing::{json_response, mock_client};
    use crate::api::RawResponse;
    use crate::state::{CancelToken, MetricsAdjustment, MetricsState, TasksState};

    fn dispatcher() -> (
        Dispatcher<Rc<RefCell<TasksState>>, Rc<RefCell<MetricsState>>>,
        std::sync::Arc<crate::api::testing::MockTransport>,
    ) {
        let (client, mock, _) = mock_client();
        let dispatcher = Dispatcher::new(
            client,
            Rc::new(RefCell::new(TasksState::new())),
            Rc::new(RefCell::new(MetricsState::new())),
            CancelToken::new(),
        );
        (dispatcher, mock)
    }

    fn metrics_json() -> serde_json::Value {
        json!({
            "total_tasks": 10,
            "completed_tasks": 4,
            "pending_tasks": 6,
            "deleted_tasks": 1,
            "modified_tasks": 3,
            "completion_rate": 40.0
        })
    }

    #[tokio::test]
    async fn test_fetch_metrics_stores_snapshot() {
        let (dispatcher, mock) = dispatcher();
        mock.push(json_response(200, metrics_json()));

        dispatcher.fetch_metrics().await.unwrap();

        let state = dispatcher.metrics.borrow();
        assert_eq!(state.metrics.as_ref().unwrap().total_tasks, 10);
        assert!(state.last_updated.is_some());
        assert!(!state.loading());
        assert_eq!(state.completion_rate(), Some(40.0));
    }

    #[tokio::test]
    async fn test_stats_failure_does_not_touch_metrics_family() {
        let (dispatcher, mock) = dispatcher();
        mock.push(json_response(200, metrics_json()));
        mock.push(RawResponse { status: 500, body: r#"{"detail":"stats unavailable"}"#.into() });

        dispatcher.fetch_metrics().await.unwrap();
        assert!(dispatcher.fetch_task_stats().await.is_err());

        let state = dispatcher.metrics.borrow();
        assert!(state.metrics.is_some());
        assert_eq!(state.metrics_status.error, None);
        assert_eq!(state.stats_status.error.as_deref(), Some("Server error 500: stats unavailable"));
        assert_eq!(state.error(), Some("Server error 500: stats unavailable"));
    }

    #[tokio::test]
    async fn test_refresh_uses_own_status_and_clears_stale() {
        let (dispatcher, mock) = dispatcher();
        mock.push(json_response(200, metrics_json()));
        mock.push(json_response(200, metrics_json()));

        dispatcher.fetch_metrics().await.unwrap();
        dispatcher.adjust_metrics(MetricsAdjustment::TaskCreated);
        assert!(dispatcher.metrics.borrow().stale);

        dispatcher.refresh_metrics().await.unwrap();
        let state = dispatcher.metrics.borrow();
        assert!(!state.stale);
        assert_eq!(state.metrics.as_ref().unwrap().total_tasks, 10);
        assert_eq!(mock.requests()[1].path, "/metrics");
    }

    #[tokio::test]
    async fn test_successful_retry_clears_error() {
        let (dispatcher, mock) = dispatcher();
        mock.push_network_error("offline");
        mock.push(json_response(200, metrics_json()));

        assert!(dispatcher.fetch_metrics().await.is_err());
        assert_eq!(dispatcher.metrics.borrow().error(), Some("Network error: offline"));

        dispatcher.fetch_metrics().await.unwrap();
        let state = dispatcher.metrics.borrow();
        assert!(!state.loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.metrics_status.error, None);
    }

    #[tokio::test]
    async fn test_cached_fetch_after_adjustment_goes_to_server() {
        let (dispatcher, mock) = dispatcher();
        let mut newer = metrics_json();
        newer["total_tasks"] = json!(11);
        newer["pending_tasks"] = json!(7);
        mock.push(json_response(200, metrics_json()));
        mock.push(json_response(200, newer));

        dispatcher.fetch_metrics_cached(false).await.unwrap();
        dispatcher.adjust_metrics(MetricsAdjustment::TaskCreated);
        assert_eq!(dispatcher.metrics.borrow().metrics.as_ref().unwrap().total_tasks, 11);

        dispatcher.fetch_metrics_cached(false).await.unwrap();
        assert_eq!(mock.requests().len(), 2);
        let state = dispatcher.metrics.borrow();
        assert_eq!(state.metrics.as_ref().unwrap().total_tasks, 11);
        assert!(!state.stale);
    }

    #[tokio::test]
    async fn test_reset_and_clear_error() {
        let (dispatcher, mock) = dispatcher();
        mock.push_network_error("offline");

        assert!(dispatcher.fetch_metrics().await.is_err());
        assert!(dispatcher.metrics.borrow().error().is_some());

        dispatcher.clear_metrics_error();
        assert_eq!(dispatcher.metrics.borrow().error(), None);

        dispatcher.reset_metrics();
        assert_eq!(*dispatcher.metrics.borrow(), MetricsState::new());
    }
}
