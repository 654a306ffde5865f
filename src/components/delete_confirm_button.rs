//! Delete Confirm Button Component
//!
//! Reusable inline delete confirmation button with confirm/cancel actions.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows the label initially. When clicked, shows the prompt with ✓/✗ buttons.
///
/// # Arguments
/// * `button_class` - CSS class for the initial delete button
/// * `label` - Text of the initial button
/// * `prompt` - Question shown while confirming
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "×".to_string())] label: String,
    #[prop(into, default = Signal::stored("Delete?".to_string()))] prompt: Signal<String>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class=button_class.clone()
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{move || prompt.get()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
