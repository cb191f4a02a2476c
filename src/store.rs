//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::models::{Category, Toast, ToastKind};

/// Admin screen state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AdminState {
    /// Category forest as last fetched from the API
    pub categories: Vec<Category>,
    /// Visible notifications
    pub toasts: Vec<Toast>,
    /// Category awaiting delete confirmation
    pub pending_delete: Option<Category>,
    /// Tree fetch in flight
    pub loading: bool,
    /// Last issued toast id
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AdminStore = Store<AdminState>;

/// Get the admin store from context
pub fn use_admin_store() -> AdminStore {
    expect_context::<AdminStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast, dismissing it after `duration`
pub fn store_push_toast(store: &AdminStore, kind: ToastKind, message: impl Into<String>, duration: Duration) {
    store.next_toast_id().update(|next| *next += 1);
    let id = store.next_toast_id().get_untracked();
    store.toasts().write().push(Toast { id, kind, message: message.into() });

    let store = *store;
    spawn_local(async move {
        gloo_timers::future::sleep(duration).await;
        store_dismiss_toast(&store, id);
    });
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &AdminStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
