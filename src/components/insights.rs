//! Insights Component
//!
//! Trends, productivity, most-modified tasks and categories. This data is
//! only shown on the dashboard so it lives in local signals, not a store.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppDispatcher;
use crate::models::{CategoryBreakdown, DashboardData, MostModifiedTasks};

use super::{ErrorBanner, LoadingSpinner};

const MOST_MODIFIED_SHOWN: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
struct InsightsData {
    dashboard: DashboardData,
    most_modified: Option<MostModifiedTasks>,
    categories: Option<CategoryBreakdown>,
}

fn hours_text(hours: f64) -> String {
    if hours < 1.0 {
        format!("{:.0} min", hours * 60.0)
    } else if hours < 48.0 {
        format!("{:.1} h", hours)
    } else {
        format!("{:.1} days", hours / 24.0)
    }
}

#[component]
pub fn Insights(dispatcher: AppDispatcher) -> impl IntoView {
    let (data, set_data) = signal(None::<InsightsData>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        let api = dispatcher.api().clone();
        let cancel = dispatcher.cancel_token().clone();
        set_loading.set(true);
        spawn_local(async move {
            let (dashboard, most_modified, categories) = futures::join!(
                api.get_dashboard_data(),
                api.get_most_modified_tasks(MOST_MODIFIED_SHOWN),
                api.get_category_breakdown(),
            );
            if cancel.is_cancelled() {
                return;
            }
            set_loading.set(false);
            match dashboard {
                Ok(dashboard) => {
                    set_error.set(None);
                    // The side panels are optional; a failure there hides the panel
                    set_data.set(Some(InsightsData {
                        dashboard,
                        most_modified: most_modified.ok(),
                        categories: categories.ok(),
                    }));
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };
    load();

    view! {
        <section class="insights">
            <h3>"Insights"</h3>
            <ErrorBanner
                error=error
                on_dismiss=move |_| set_error.set(None)
                on_retry=Callback::new(move |_| load())
            />
            <Show when=move || loading.get() && data.with(|d| d.is_none())>
                <LoadingSpinner />
            </Show>
            {move || data.get().map(|d| {
                let trends = d.dashboard.trends;
                let productivity = d.dashboard.productivity;
                view! {
                    <div class="insights-grid">
                        <div class="insight-card">
                            <h4>{format!("Last {} days", trends.period_days)}</h4>
                            <p>{trends.tasks_created} " created, " {trends.tasks_completed} " completed"</p>
                            <p class="insight-rate">{format!("{:.1}% completed", trends.completion_rate)}</p>
                        </div>
                        <div class="insight-card">
                            <h4>"Today"</h4>
                            <p>{productivity.tasks_created_today} " created, " {productivity.tasks_completed_today} " completed"</p>
                            <p>"Average lifetime " {hours_text(productivity.average_task_lifetime)}</p>
                            <p>"Most active at " {productivity.most_active_hour}</p>
                        </div>
                        {d.most_modified.map(|mm| view! {
                            <div class="insight-card">
                                <h4>"Most Modified"</h4>
                                <ol class="most-modified">
                                    {mm.tasks.into_iter().map(|t| {
                                        let class = if t.is_completed { "completed" } else { "" };
                                        view! {
                                            <li class=class>
                                                <span class="task-title">{t.title}</span>
                                                <span class="modified-badge">"✎ " {t.modification_count}</span>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ol>
                            </div>
                        })}
                        {d.categories.filter(|c| !c.categories.is_empty()).map(|c| view! {
                            <div class="insight-card">
                                <h4>"Categories"</h4>
                                <ul class="categories">
                                    {c.categories.into_iter().map(|(name, n)| view! {
                                        <li>{name} ": " {n}</li>
                                    }).collect_view()}
                                    <li class="uncategorized">"Uncategorized: " {c.uncategorized_count}</li>
                                </ul>
                            </div>
                        })}
                    </div>
                }
            })}
        </section>
    }
}
