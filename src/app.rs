//! Keesti Admin App
//!
//! Category management screen: tree, create form, delete confirmation, toasts.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use category_tree::{visible_rows, DropIntent, TreeError, TreeMutations};

use crate::commands::{ApiClient, MutationError};
use crate::components::{CategoryTree, DeleteConfirmDialog, LogPanel, NewCategoryForm, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::icons::IconResolver;
use crate::models::{Category, CategoryId, ToastKind};
use crate::store::{store_push_toast, AdminState, AdminStateStoreFields, AdminStore};

/// Persists tree gestures, then reports and refreshes
///
/// The tree never updates itself after a commit; this reload is what
/// brings the screen back in line with the server.
struct AdminMutations {
    api: ApiClient,
    ctx: AppContext,
    store: AdminStore,
    toast_duration: Duration,
}

impl AdminMutations {
    fn settle(&self, result: Result<(), MutationError>, done: &str) -> Result<(), MutationError> {
        match &result {
            Ok(()) => store_push_toast(&self.store, ToastKind::Info, done, self.toast_duration),
            Err(e) => store_push_toast(&self.store, ToastKind::Error, format!("ذخیره نشد: {}", e), self.toast_duration),
        }
        self.ctx.reload();
        result
    }
}

#[async_trait(?Send)]
impl TreeMutations<CategoryId> for AdminMutations {
    async fn reorder(&self, ordered_ids: Vec<CategoryId>) -> Result<(), MutationError> {
        let result = self.api.reorder_categories(&ordered_ids).await;
        self.settle(result, "ترتیب دسته‌ها ذخیره شد")
    }

    async fn move_node(
        &self,
        id: CategoryId,
        new_parent_id: Option<CategoryId>,
        new_order: Option<u32>,
    ) -> Result<(), MutationError> {
        let result = self.api.move_category(&id, new_parent_id.as_ref(), new_order).await;
        self.settle(result, "دسته جابجا شد")
    }

    fn abandoned(&self, intent: &DropIntent<CategoryId>, error: &TreeError) {
        log::warn!("gave up waiting on {:?}, reloading", intent);
        store_push_toast(&self.store, ToastKind::Error, format!("ذخیره نشد: {}", error), self.toast_duration);
        self.ctx.reload();
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // State
    let store: AdminStore = Store::new(AdminState::default());
    let ctx = AppContext::new();
    let api = ApiClient::new(&config);
    let toast_duration = Duration::from_millis(config.toast_duration_ms);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);
    provide_context(api.clone());
    provide_context(config.clone());

    // Load the tree on mount and after every mutation
    let loader = api.clone();
    Effect::new(move |_| {
        let trigger = ctx.reload_count();
        let api = loader.clone();
        log::debug!("loading category tree, trigger={}", trigger);
        store.loading().set(true);
        spawn_local(async move {
            match api.get_category_tree().await {
                Ok(tree) => {
                    log::debug!("loaded {} root categories", tree.len());
                    store.categories().set(tree);
                }
                Err(e) => {
                    log::error!("loading category tree failed: {}", e);
                    store_push_toast(&store, ToastKind::Error, format!("بارگذاری دسته‌ها ناموفق بود: {}", e), toast_duration);
                }
            }
            store.loading().set(false);
        });
    });

    let mutations: Rc<dyn TreeMutations<CategoryId>> = Rc::new(AdminMutations {
        api: api.clone(),
        ctx,
        store,
        toast_duration,
    });

    let categories = Signal::derive(move || store.categories().get());

    let on_delete = Callback::new(move |category: Category| {
        store.pending_delete().set(Some(category));
    });

    let on_add_subcategory = Callback::new(move |parent_id: CategoryId| {
        ctx.set_adding_under(Some(parent_id));
    });

    let on_edit = Callback::new(move |category: Category| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(&format!("/admin/categories/{}/edit", category.id));
        }
    });

    let confirm_delete = Callback::new(move |category: Category| {
        let api = api.clone();
        spawn_local(async move {
            match api.delete_category(&category.id).await {
                Ok(()) => {
                    log::info!("deleted category {}", category.id);
                    store_push_toast(&store, ToastKind::Info, format!("«{}» حذف شد", category.title), toast_duration);
                }
                Err(e) => {
                    log::error!("delete category {} failed: {}", category.id, e);
                    store_push_toast(&store, ToastKind::Error, e.to_string(), toast_duration);
                }
            }
            ctx.reload();
        });
    });

    let category_count = move || {
        store.categories().with(|cats| visible_rows(cats, &HashSet::new()).len())
    };

    view! {
        <div class="admin-layout" dir="rtl">
            <main class="main-content">
                <h1>"مدیریت دسته‌بندی‌ها"</h1>

                <NewCategoryForm />

                <Show when=move || store.loading().get()>
                    <div class="loading">"در حال بارگذاری..."</div>
                </Show>

                <CategoryTree
                    categories=categories
                    mutations=mutations
                    on_delete=on_delete
                    on_edit=on_edit
                    on_add_subcategory=on_add_subcategory
                    icon_resolver=IconResolver::new(config.icon_base_url.clone())
                    commit_timeout=config.commit_timeout()
                />

                <p class="category-count">{move || format!("{} دسته‌بندی", category_count())}</p>
            </main>

            <DeleteConfirmDialog on_confirm=confirm_delete />
            <ToastHost />
            <LogPanel />
        </div>
    }
}
