//! Recent Tasks Component
//!
//! Newest tasks, read-only. Fetched into a local signal so the shared task
//! store keeps the Tasks page's list and paging.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppDispatcher;
use crate::models::Task;

const RECENT_TASK_COUNT: u32 = 5;

#[component]
pub fn RecentTasks(dispatcher: AppDispatcher, #[prop(into)] on_view_all: Callback<()>) -> impl IntoView {
    let (recent, set_recent) = signal(Vec::<Task>::new());

    {
        let cancel = dispatcher.cancel_token().clone();
        spawn_local(async move {
            match dispatcher.recent_tasks(RECENT_TASK_COUNT).await {
                Ok(tasks) if !cancel.is_cancelled() => set_recent.set(tasks),
                Ok(_) => {}
                Err(err) => log::warn!("recent tasks unavailable: {}", err),
            }
        });
    }

    view! {
        <section class="recent-tasks">
            <div class="section-header">
                <h3>"Recent Tasks"</h3>
                <button class="link-btn" on:click=move |_| on_view_all.run(())>"View all"</button>
            </div>
            <Show
                when=move || !recent.with(|t| t.is_empty())
                fallback=|| view! { <p class="empty-state">"No tasks yet"</p> }
            >
                <ul class="recent-list">
                    <For
                        each=move || recent.get()
                        key=|task| (task.id, task.is_completed)
                        children=move |task| {
                            let class = if task.is_completed { "recent-item completed" } else { "recent-item" };
                            view! {
                                <li class=class>
                                    <span class="task-title">{task.title.clone()}</span>
                                    <span class="task-date">{task.created_display()}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
