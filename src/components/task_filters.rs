//! Task Filters Component
//!
//! Title search box and completion filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppDispatcher};
use crate::state::TasksStateStoreFields;

/// Completion filter choice, mapped onto `is_completed`
fn parse_status(value: &str) -> Option<bool> {
    match value {
        "completed" => Some(true),
        "pending" => Some(false),
        _ => None,
    }
}

fn status_value(is_completed: Option<bool>) -> &'static str {
    match is_completed {
        Some(true) => "completed",
        Some(false) => "pending",
        None => "all",
    }
}

#[component]
pub fn TaskFilters(dispatcher: AppDispatcher) -> impl IntoView {
    let tasks = use_app_context().tasks;
    let initial = tasks.search_params().get_untracked();

    let (title, set_title) = signal(initial.title.unwrap_or_default());
    let (status, set_status) = signal(initial.is_completed);

    let run = {
        let dispatcher = dispatcher.clone();
        move || {
            let dispatcher = dispatcher.clone();
            let query = title.get_untracked().trim().to_string();
            let query = (!query.is_empty()).then_some(query);
            let is_completed = status.get_untracked();
            spawn_local(async move {
                let _ = dispatcher.apply_filter(query, is_completed).await;
            });
        }
    };

    let search = {
        let run = run.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            run();
        }
    };

    let change_status = {
        let run = run.clone();
        move |ev: web_sys::Event| {
            set_status.set(parse_status(&event_target_value(&ev)));
            run();
        }
    };

    let reset = move |_| {
        set_title.set(String::new());
        set_status.set(None);
        run();
    };

    view! {
        <form class="task-filters" on:submit=search>
            <input
                type="search"
                placeholder="Search by title..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <select prop:value=move || status_value(status.get()) on:change=change_status>
                <option value="all">"All"</option>
                <option value="pending">"Pending"</option>
                <option value="completed">"Completed"</option>
            </select>
            <button type="submit">"Search"</button>
            <button type="button" class="cancel-btn" on:click=reset>"Clear"</button>
        </form>
    }
}
