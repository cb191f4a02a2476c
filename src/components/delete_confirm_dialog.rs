//! Delete Confirm Dialog Component
//!
//! Confirmation step for deleting a category, shown by the admin page
//! when the tree forwards a delete request.

use leptos::prelude::*;

use crate::store::{use_admin_store, AdminStateStoreFields};
use crate::models::Category;

/// Modal delete confirmation
///
/// Shows while `pending_delete` holds a category.
///
/// # Arguments
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmDialog(
    #[prop(into)] on_confirm: Callback<Category>,
) -> impl IntoView {
    let store = use_admin_store();

    let cancel = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        store.pending_delete().set(None);
    };

    view! {
        {move || store.pending_delete().get().map(|category| {
            let has_children = category.has_children();
            let title = category.title.clone();
            view! {
                <div class="modal-backdrop" on:click=cancel>
                    <div class="delete-confirm" on:click=|ev| ev.stop_propagation()>
                        <p class="delete-confirm-text">
                            "حذف «" {title} "»؟"
                        </p>
                        <Show when=move || has_children>
                            <p class="delete-confirm-warning">"زیردسته‌های این دسته نیز حذف می‌شوند."</p>
                        </Show>
                        <button
                            class="confirm-btn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                store.pending_delete().set(None);
                                on_confirm.run(category.clone());
                            }
                        >
                            "✓"
                        </button>
                        <button class="cancel-btn" on:click=cancel>
                            "✗"
                        </button>
                    </div>
                </div>
            }
        })}
    }
}
