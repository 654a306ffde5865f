//! Todo Dashboard App
//!
//! Root component: provides the API client and stores, then switches
//! between the dashboard and task pages.

use leptos::prelude::*;

use crate::api::{ApiClient, ApiConfig};
use crate::components::ServiceStatus;
use crate::context::AppContext;
use crate::pages::{DashboardPage, TasksPage};
use crate::store::new_stores;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Tasks,
}

impl Page {
    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Tasks => "Tasks",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_env();
    log::info!("using API at {}", config.base_url);

    let api = ApiClient::new(config);
    let (tasks, metrics) = new_stores();

    // Provide context to all children
    provide_context(AppContext::new(api, tasks, metrics));

    let (page, set_page) = signal(Page::Dashboard);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Todo Dashboard"</h1>
                <nav class="app-nav">
                    {[Page::Dashboard, Page::Tasks].into_iter().map(|target| view! {
                        <button
                            class=move || if page.get() == target { "nav-btn active" } else { "nav-btn" }
                            on:click=move |_| set_page.set(target)
                        >
                            {target.label()}
                        </button>
                    }).collect_view()}
                </nav>
                <ServiceStatus />
            </header>

            <main class="main-content">
                {move || match page.get() {
                    Page::Dashboard => view! {
                        <DashboardPage on_view_tasks=move |_| set_page.set(Page::Tasks) />
                    }.into_any(),
                    Page::Tasks => view! { <TasksPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
