//! Task Stats Panel Component
//!
//! Lifetime counters from `/metrics/stats`.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::state::MetricsStateStoreFields;

#[component]
pub fn TaskStatsPanel() -> impl IntoView {
    let metrics = use_app_context().metrics;

    view! {
        <section class="stats-panel">
            <h3>"Activity"</h3>
            {move || match metrics.stats().get() {
                Some(stats) => view! {
                    <dl class="stats-list">
                        <dt>"Created"</dt><dd>{stats.total_created}</dd>
                        <dt>"Completed"</dt><dd>{stats.total_completed}</dd>
                        <dt>"Deleted"</dt><dd>{stats.total_deleted}</dd>
                        <dt>"Modified"</dt><dd>{stats.total_modified}</dd>
                        <dt>"Avg. edits per task"</dt>
                        <dd>{format!("{:.2}", stats.average_modifications)}</dd>
                    </dl>
                }.into_any(),
                None => view! { <p class="empty-state">"No activity yet"</p> }.into_any(),
            }}
        </section>
    }
}
