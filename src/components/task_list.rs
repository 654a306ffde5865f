//! Task List Component
//!
//! Current page of tasks with selection checkboxes, completion toggle,
//! edit and delete. Pagination controls sit below the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppDispatcher};
use crate::models::Task;
use crate::state::TasksStateStoreFields;

use super::{DeleteConfirmButton, Notice};

/// One task row
#[component]
fn TaskRow(
    task: Task,
    dispatcher: AppDispatcher,
    #[prop(into)] on_edit: Callback<Task>,
    #[prop(into)] on_notice: Callback<Notice>,
) -> impl IntoView {
    let tasks = use_app_context().tasks;
    let id = task.id;
    let is_selected = move || tasks.with(|s| s.is_selected(id));

    let select = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.toggle_selection(id)
    };

    let toggle = {
        let dispatcher = dispatcher.clone();
        move |_| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                if let Err(err) = dispatcher.toggle_task(id).await {
                    on_notice.run(Notice::error(err.to_string()));
                }
            });
        }
    };

    let delete = move |_| {
        let dispatcher = dispatcher.clone();
        spawn_local(async move {
            match dispatcher.delete_task(id).await {
                Ok(()) => on_notice.run(Notice::success("Task deleted")),
                Err(err) => on_notice.run(Notice::error(err.to_string())),
            }
        });
    };

    let row_class = if task.is_completed { "task-row completed" } else { "task-row" };
    let toggle_title = if task.is_completed { "Mark as pending" } else { "Mark as completed" };
    let toggle_icon = if task.is_completed { "☑" } else { "☐" };
    let edit_task = task.clone();

    view! {
        <li class=row_class>
            <input
                type="checkbox"
                class="task-select"
                prop:checked=is_selected
                on:change=select
            />
            <button
                class="task-toggle"
                title=toggle_title
                on:click=toggle
            >
                {toggle_icon}
            </button>
            <div class="task-body">
                <span class="task-title">{task.title.clone()}</span>
                {task.description.clone().map(|d| view! { <p class="task-description">{d}</p> })}
                <div class="task-meta">
                    <span>"Created " {task.created_display()}</span>
                    <span>"Updated " {task.updated_display()}</span>
                    {(task.modification_count > 0).then(|| view! {
                        <span class="modified-badge" title="Times modified">
                            "✎ " {task.modification_count}
                        </span>
                    })}
                </div>
            </div>
            <div class="task-actions">
                <button class="edit-btn" on:click=move |_| on_edit.run(edit_task.clone())>"Edit"</button>
                <DeleteConfirmButton button_class="delete-btn" label="Delete" on_confirm=delete />
            </div>
        </li>
    }
}

/// Tasks on the current page
#[component]
pub fn TaskList(
    dispatcher: AppDispatcher,
    #[prop(into)] on_edit: Callback<Task>,
    #[prop(into)] on_notice: Callback<Notice>,
) -> impl IntoView {
    let tasks = use_app_context().tasks;

    view! {
        <Show
            when=move || !tasks.tasks().with(|t| t.is_empty())
            fallback=move || view! {
                <p class="empty-state">
                    {move || if tasks.loading().get() { "" } else { "No tasks found" }}
                </p>
            }
        >
            <ul class="task-list">
                <For
                    each=move || tasks.tasks().get()
                    // Re-render a row when its content changes, not only its id
                    key=|task| (task.id, task.updated_at.clone(), task.is_completed, task.modification_count)
                    children={
                        let dispatcher = dispatcher.clone();
                        move |task| view! {
                            <TaskRow
                                task=task
                                dispatcher=dispatcher.clone()
                                on_edit=on_edit
                                on_notice=on_notice
                            />
                        }
                    }
                />
            </ul>
        </Show>
    }
}

/// Page navigation and page size selector
#[component]
pub fn Pagination(dispatcher: AppDispatcher) -> impl IntoView {
    let tasks = use_app_context().tasks;
    let page = move || tasks.current_page().get();
    let size = move || tasks.page_size().get();
    let page_count = move || tasks.with(|s| s.page_count());

    let go_to = {
        let dispatcher = dispatcher.clone();
        move |target: u32, size: u32| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                // Failure lands in the store's error banner
                let _ = dispatcher.go_to_page(target, size).await;
            });
        }
    };

    let prev = {
        let go_to = go_to.clone();
        move |_| {
            if page() > 1 {
                go_to(page() - 1, size());
            }
        }
    };
    let next = {
        let go_to = go_to.clone();
        move |_| {
            if page() < page_count() {
                go_to(page() + 1, size());
            }
        }
    };
    let resize = move |ev: web_sys::Event| {
        if let Ok(new_size) = event_target_value(&ev).parse::<u32>() {
            go_to(1, new_size);
        }
    };

    view! {
        <div class="pagination">
            <button disabled=move || { page() <= 1 } on:click=prev>"‹ Prev"</button>
            <span class="page-info">
                "Page " {page} " of " {move || page_count().max(1)}
                " (" {move || tasks.total().get()} " tasks)"
            </span>
            <button disabled=move || { page() >= page_count() } on:click=next>"Next ›"</button>
            <select class="page-size" on:change=resize prop:value=move || size().to_string()>
                {[5u32, 10, 20, 50].into_iter().map(|n| view! {
                    <option value=n.to_string()>{n} " / page"</option>
                }).collect_view()}
            </select>
        </div>
    }
}
