//! Bulk Actions Component
//!
//! Select-all checkbox for the current page and delete of the selection.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, AppDispatcher};
use crate::state::TasksStateStoreFields;

use super::{DeleteConfirmButton, Notice};

#[component]
pub fn BulkActions(dispatcher: AppDispatcher, #[prop(into)] on_notice: Callback<Notice>) -> impl IntoView {
    let tasks = use_app_context().tasks;
    let selected_count = move || tasks.selected_tasks().with(|s| s.len());
    let all_selected = move || tasks.with(|s| s.is_all_selected());
    let partially_selected = move || tasks.with(|s| s.is_partially_selected());

    let toggle_all = {
        let dispatcher = dispatcher.clone();
        move |_| {
            if all_selected() {
                dispatcher.clear_selection();
            } else {
                dispatcher.select_all();
            }
        }
    };

    let clear = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.clear_selection()
    };

    let delete_selected = move |_| {
        let dispatcher = dispatcher.clone();
        spawn_local(async move {
            match dispatcher.bulk_delete_selected().await {
                Ok(response) => on_notice.run(Notice::success(format!(
                    "{} task(s) deleted",
                    response.deleted_count
                ))),
                Err(err) => on_notice.run(Notice::error(err.to_string())),
            }
        });
    };

    let prompt = Signal::derive(move || format!("Delete {} task(s)?", selected_count()));

    view! {
        <div class="bulk-actions">
            <label class="select-all">
                <input
                    type="checkbox"
                    prop:checked=all_selected
                    prop:indeterminate=partially_selected
                    disabled=move || tasks.tasks().with(|t| t.is_empty())
                    on:change=toggle_all
                />
                "Select all"
            </label>
            <Show when=move || { selected_count() > 0 }>
                <span class="selection-count">{selected_count} " selected"</span>
                <button class="cancel-btn" on:click=clear.clone()>"Clear selection"</button>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    label="Delete selected"
                    prompt=prompt
                    disabled=Signal::derive(move || tasks.loading().get())
                    on_confirm=delete_selected.clone()
                />
            </Show>
        </div>
    }
}
