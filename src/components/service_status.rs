//! Service Status Component
//!
//! Backend reachability dot for the header.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reachability {
    Checking,
    Online,
    Offline,
}

#[component]
pub fn ServiceStatus() -> impl IntoView {
    let api = use_app_context().api;
    let (state, set_state) = signal(Reachability::Checking);

    let check = move || {
        let api = api.clone();
        set_state.set(Reachability::Checking);
        spawn_local(async move {
            let online = api.health_check().await;
            set_state.set(if online { Reachability::Online } else { Reachability::Offline });
        });
    };
    check();

    view! {
        <button
            class=move || match state.get() {
                Reachability::Checking => "service-status checking",
                Reachability::Online => "service-status online",
                Reachability::Offline => "service-status offline",
            }
            title="Click to re-check the API"
            on:click=move |_| check()
        >
            <span class="status-dot"></span>
            {move || match state.get() {
                Reachability::Checking => "Checking...",
                Reachability::Online => "API online",
                Reachability::Offline => "API offline",
            }}
        </button>
    }
}
