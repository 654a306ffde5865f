//! Task Form Component
//!
//! Create form, or edit form when given an existing task. Field errors are
//! shown inline before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{validate_description, validate_title, ApiError};
use crate::context::use_app_context;
use crate::models::{Task, TaskCreate, TaskUpdate, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};

/// Raw input values of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftErrors {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

fn message(err: ApiError) -> String {
    match err {
        ApiError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> DraftErrors {
        DraftErrors {
            title: validate_title(&self.title).err().map(message),
            description: validate_description(&self.description).err().map(message),
        }
    }

    fn trimmed_description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn to_create(&self) -> TaskCreate {
        TaskCreate {
            title: self.title.trim().to_string(),
            description: self.trimmed_description(),
            is_completed: None,
        }
    }

    /// Only fields that differ from `original` are sent. A cleared
    /// description is sent as an empty string.
    pub fn to_update(&self, original: &Task) -> TaskUpdate {
        let title = self.title.trim();
        let description = self.trimmed_description();
        TaskUpdate {
            title: (title != original.title).then(|| title.to_string()),
            description: (description != original.description)
                .then(|| description.unwrap_or_default()),
            is_completed: None,
        }
    }
}

/// Create or edit form
///
/// # Arguments
/// * `editing` - Task being edited, `None` for create
/// * `on_saved` - Called with the saved task
/// * `on_cancel` - Called when the user closes the form
#[component]
pub fn TaskForm(
    #[prop(into)] editing: Signal<Option<Task>>,
    #[prop(into)] on_saved: Callback<Task>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dispatcher = use_app_context().dispatcher();

    let (draft, set_draft) = signal(TaskDraft::default());
    let (errors, set_errors) = signal(DraftErrors::default());
    let (submit_error, set_submit_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    // Reset fields whenever the edited task changes
    Effect::new(move |_| {
        let next = editing.get().map(|t| TaskDraft::from_task(&t)).unwrap_or_default();
        set_draft.set(next);
        set_errors.set(DraftErrors::default());
        set_submit_error.set(None);
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get();
        let found = current.validate();
        if !found.is_empty() {
            set_errors.set(found);
            return;
        }
        set_errors.set(DraftErrors::default());
        set_saving.set(true);

        let dispatcher = dispatcher.clone();
        let original = editing.get_untracked();
        spawn_local(async move {
            let result = match &original {
                Some(task) => {
                    let changes = current.to_update(task);
                    if changes.is_empty() {
                        Ok(task.clone())
                    } else {
                        dispatcher.update_task(task.id, changes).await
                    }
                }
                None => dispatcher.create_task(current.to_create()).await,
            };
            set_saving.set(false);
            match result {
                Ok(task) => {
                    set_draft.set(TaskDraft::default());
                    on_saved.run(task);
                }
                Err(err) => set_submit_error.set(Some(message(err))),
            }
        });
    };

    let is_edit = move || editing.with(|t| t.is_some());

    view! {
        <form class="task-form" on:submit=submit>
            <h3>{move || if is_edit() { "Edit Task" } else { "New Task" }}</h3>

            <label class="form-field">
                <span>"Title"</span>
                <input
                    type="text"
                    maxlength=TITLE_MAX_LEN.to_string()
                    placeholder="What needs doing?"
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_draft.update(|d| d.title = value);
                    }
                />
                {move || errors.get().title.map(|e| view! { <span class="field-error">{e}</span> })}
            </label>

            <label class="form-field">
                <span>"Description"</span>
                <textarea
                    rows="3"
                    maxlength=DESCRIPTION_MAX_LEN.to_string()
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_draft.update(|d| d.description = value);
                    }
                ></textarea>
                <span class="char-count">
                    {move || draft.with(|d| d.description.chars().count())} " / " {DESCRIPTION_MAX_LEN}
                </span>
                {move || errors.get().description.map(|e| view! { <span class="field-error">{e}</span> })}
            </label>

            {move || submit_error.get().map(|e| view! { <div class="form-error">{e}</div> })}

            <div class="form-actions">
                <button type="submit" class="primary-btn" disabled=move || saving.get()>
                    {move || match (saving.get(), is_edit()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save",
                        (false, false) => "Create",
                    }}
                </button>
                <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
