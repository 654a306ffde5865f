//! Feedback Components
//!
//! Loading spinner, dismissible error banner and transient snackbar.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Success => "snackbar success",
            Severity::Error => "snackbar error",
            Severity::Info => "snackbar info",
        }
    }
}

/// One snackbar message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: Severity::Error }
    }
}

#[component]
pub fn LoadingSpinner(#[prop(into, default = "Loading...".to_string())] message: String) -> impl IntoView {
    view! {
        <div class="loading-spinner">
            <span class="spinner"></span>
            <span class="spinner-text">{message}</span>
        </div>
    }
}

/// Error banner with dismiss and optional retry
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
    #[prop(into, optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        {move || error.get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{message}</span>
                {on_retry.map(|retry| view! {
                    <button class="retry-btn" on:click=move |_| retry.run(())>"Retry"</button>
                })}
                <button class="dismiss-btn" on:click=move |_| on_dismiss.run(())>"×"</button>
            </div>
        })}
    }
}

/// Transient notice; the owner clears the signal to hide it
#[component]
pub fn Snackbar(notice: ReadSignal<Option<Notice>>, set_notice: WriteSignal<Option<Notice>>) -> impl IntoView {
    view! {
        {move || notice.get().map(|n| view! {
            <div class=n.severity.class() on:click=move |_| set_notice.set(None)>
                {n.message}
            </div>
        })}
    }
}
