//! Dashboard Page
//!
//! Metrics overview, activity counters, recent tasks and insights.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    ErrorBanner, Insights, LoadingSpinner, MetricsCards, RecentTasks, TaskStatsPanel,
};
use crate::context::{use_app_context, AppDispatcher};

/// Metrics from cache when fresh, stats from the server.
fn load(dispatcher: &AppDispatcher, force: bool) {
    let dispatcher = dispatcher.clone();
    spawn_local(async move {
        let _ = futures::join!(
            dispatcher.fetch_metrics_cached(force),
            dispatcher.fetch_task_stats(),
        );
    });
}

#[component]
pub fn DashboardPage(#[prop(into)] on_view_tasks: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let metrics = ctx.metrics;
    let dispatcher = ctx.dispatcher();

    log::debug!("dashboard mounted");
    load(&dispatcher, false);

    let refresh = {
        let dispatcher = dispatcher.clone();
        move |_| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let _ = futures::join!(dispatcher.refresh_metrics(), dispatcher.fetch_task_stats());
            });
        }
    };

    let dismiss = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.clear_metrics_error()
    };

    let retry = {
        let dispatcher = dispatcher.clone();
        move |_| load(&dispatcher, true)
    };

    let error = Signal::derive(move || metrics.with(|m| m.error().map(str::to_string)));
    let is_loading = move || metrics.with(|m| m.loading());

    view! {
        <div class="page dashboard-page">
            <div class="page-header">
                <h2>"Dashboard"</h2>
                <button class="refresh-btn" disabled=is_loading on:click=refresh>
                    {move || if is_loading() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <ErrorBanner error=error on_dismiss=dismiss on_retry=Callback::new(retry) />

            <Show
                when=move || metrics.with(|m| m.has_data())
                fallback=move || view! {
                    <Show when=is_loading fallback=|| view! { <p class="empty-state">"No metrics available"</p> }>
                        <LoadingSpinner message="Loading metrics..." />
                    </Show>
                }
            >
                <MetricsCards />
            </Show>

            <div class="dashboard-columns">
                <TaskStatsPanel />
                <RecentTasks dispatcher=dispatcher.clone() on_view_all=on_view_tasks />
            </div>

            <Insights dispatcher=dispatcher.clone() />
        </div>
    }
}
