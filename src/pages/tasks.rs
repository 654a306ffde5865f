//! Tasks Page
//!
//! Filterable, paginated task list with create/edit form and bulk delete.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    BulkActions, ErrorBanner, LoadingSpinner, Notice, Pagination, Snackbar, TaskFilters, TaskForm,
    TaskList,
};
use crate::context::use_app_context;
use crate::models::Task;
use crate::state::TasksStateStoreFields;

const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
enum FormMode {
    Closed,
    Create,
    Edit(Task),
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let ctx = use_app_context();
    let tasks = ctx.tasks;
    let dispatcher = ctx.dispatcher();

    let (notice, set_notice) = signal(None::<Notice>);
    let (form, set_form) = signal(FormMode::Closed);

    let notify = Callback::new(move |n: Notice| {
        set_notice.set(Some(n.clone()));
        set_timeout(
            move || {
                // Leave a newer notice alone
                if notice.get_untracked().as_ref() == Some(&n) {
                    set_notice.set(None);
                }
            },
            NOTICE_DURATION,
        );
    });

    let reload = {
        let dispatcher = dispatcher.clone();
        move || {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let _ = dispatcher.search_current().await;
            });
        }
    };

    log::debug!("tasks page mounted");
    reload();

    let editing = Signal::derive(move || match form.get() {
        FormMode::Edit(task) => Some(task),
        _ => None,
    });

    let on_saved = Callback::new(move |task: Task| {
        let verb = if matches!(form.get_untracked(), FormMode::Edit(_)) { "updated" } else { "created" };
        notify.run(Notice::success(format!("Task \"{}\" {}", task.title, verb)));
        set_form.set(FormMode::Closed);
    });

    let error = Signal::derive(move || tasks.error().get());
    let dismiss = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.clear_tasks_error()
    };

    view! {
        <div class="page tasks-page">
            <div class="page-header">
                <h2>"Tasks"</h2>
                <button class="primary-btn" on:click=move |_| set_form.set(FormMode::Create)>
                    "+ New Task"
                </button>
            </div>

            <ErrorBanner error=error on_dismiss=dismiss on_retry=Callback::new(move |_| reload()) />

            <Show when=move || form.with(|f| *f != FormMode::Closed)>
                <TaskForm
                    editing=editing
                    on_saved=on_saved
                    on_cancel=move |_| set_form.set(FormMode::Closed)
                />
            </Show>

            <TaskFilters dispatcher=dispatcher.clone() />
            <BulkActions dispatcher=dispatcher.clone() on_notice=notify />

            <Show when=move || tasks.loading().get()>
                <LoadingSpinner message="Loading tasks..." />
            </Show>

            <TaskList
                dispatcher=dispatcher.clone()
                on_edit=move |task: Task| set_form.set(FormMode::Edit(task))
                on_notice=notify
            />
            <Pagination dispatcher=dispatcher.clone() />

            <Snackbar notice=notice set_notice=set_notice />
        </div>
    }
}
