//! Toast Host Component
//!
//! Renders queued notifications; each dismisses itself on a timer.

use leptos::prelude::*;

use crate::models::ToastKind;
use crate::store::{store_dismiss_toast, use_admin_store, AdminStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_admin_store();

    view! {
        <div class="toast-host" role="status" aria-live="polite">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Info => "toast info",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
