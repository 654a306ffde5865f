//! Metrics Cards Component
//!
//! Summary counters and completion rate from the metrics store.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::state::{CompletionStatus, MetricsStateStoreFields, TasksSummary};

fn rate_text(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r),
        None => "–".to_string(),
    }
}

#[component]
fn MetricCard(#[prop(into)] label: String, #[prop(into)] value: Signal<String>, #[prop(into)] class: String) -> impl IntoView {
    view! {
        <div class=format!("metric-card {}", class)>
            <span class="metric-value">{move || value.get()}</span>
            <span class="metric-label">{label}</span>
        </div>
    }
}

/// Counter cards plus completion rate bar
#[component]
pub fn MetricsCards() -> impl IntoView {
    let metrics = use_app_context().metrics;

    let summary = move || metrics.with(|m| m.tasks_summary());
    let count = move |pick: fn(&TasksSummary) -> u32| {
        Signal::derive(move || {
            summary().map(|s| pick(&s).to_string()).unwrap_or_else(|| "–".to_string())
        })
    };

    let rate = move || metrics.with(|m| m.completion_rate());
    let status = move || CompletionStatus::from_rate(rate());

    view! {
        <section class="metrics-cards">
            <div class="metrics-grid">
                <MetricCard label="Total" value=count(|s| s.total) class="total" />
                <MetricCard label="Completed" value=count(|s| s.completed) class="completed" />
                <MetricCard label="Pending" value=count(|s| s.pending) class="pending" />
                <MetricCard label="Modified" value=count(|s| s.modified) class="modified" />
                <MetricCard label="Deleted" value=count(|s| s.deleted) class="deleted" />
            </div>
            <div class="completion-rate">
                <div class="completion-header">
                    <span>"Completion rate"</span>
                    <span class=move || format!("completion-status {}", status().label())>
                        {move || rate_text(rate())}
                    </span>
                </div>
                <div class="progress-track">
                    <div
                        class="progress-fill"
                        style:width=move || format!("{:.1}%", rate().unwrap_or(0.0).clamp(0.0, 100.0))
                        style:background-color=move || status().color()
                    ></div>
                </div>
            </div>
            <div class="metrics-footer">
                <Show when=move || metrics.stale().get()>
                    <span class="stale-note" title="Counts adjusted locally since the last fetch">
                        "Estimated"
                    </span>
                </Show>
                {move || metrics.last_updated().get().map(|at| view! {
                    <span class="last-updated">
                        "Updated " {at.format("%H:%M:%S").to_string()}
                    </span>
                })}
            </div>
        </section>
    }
}
