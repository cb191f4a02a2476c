//! New Category Form Component
//!
//! Form for creating root categories and subcategories.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::ApiClient;
use crate::context::AppContext;
use crate::models::{slugify, NewCategory, ToastKind};
use crate::store::{store_push_toast, use_admin_store};
use crate::config::AppConfig;

fn input_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    Some(target.dyn_ref::<web_sys::HtmlInputElement>()?.value())
}

/// Form for creating new categories (root or child)
#[component]
pub fn NewCategoryForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let api = expect_context::<ApiClient>();
    let config = expect_context::<AppConfig>();
    let store = use_admin_store();
    let toast_duration = std::time::Duration::from_millis(config.toast_duration_ms);

    let (title, set_title) = signal(String::new());
    // Empty until the user edits it; derived from the title meanwhile
    let (slug_override, set_slug_override) = signal(String::new());
    let slug = move || {
        let manual = slug_override.get();
        if manual.is_empty() { slugify(&title.get()) } else { slugify(&manual) }
    };

    let create_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get().trim().to_string();
        let slug = slug();
        if text.is_empty() || slug.is_empty() { return; }

        let body = NewCategory {
            title: text,
            slug,
            parent_id: ctx.adding_under.get(),
            is_active: true,
        };
        let api = api.clone();
        spawn_local(async move {
            match api.create_category(&body).await {
                Ok(created) => {
                    log::info!("created category {} ({})", created.id, created.slug);
                    set_title.set(String::new());
                    set_slug_override.set(String::new());
                    ctx.set_adding_under(None);
                    store_push_toast(&store, ToastKind::Info, "دسته‌بندی ایجاد شد", toast_duration);
                }
                Err(e) => {
                    log::error!("create category failed: {}", e);
                    store_push_toast(&store, ToastKind::Error, e.to_string(), toast_duration);
                }
            }
            ctx.reload();
        });
    };

    view! {
        <form class="new-category-form" on:submit=create_category>
            <div class="new-category-row">
                <input
                    type="text"
                    placeholder=move || {
                        if let Some(pid) = ctx.adding_under.get() {
                            format!("زیردسته برای #{}...", pid)
                        } else {
                            "دسته‌بندی جدید...".to_string()
                        }
                    }
                    prop:value=move || title.get()
                    on:input=move |ev| {
                        if let Some(value) = input_value(&ev) {
                            set_title.set(value);
                        }
                    }
                />
                <input
                    type="text"
                    class="slug-input"
                    dir="ltr"
                    placeholder=slug
                    prop:value=move || slug_override.get()
                    on:input=move |ev| {
                        if let Some(value) = input_value(&ev) {
                            set_slug_override.set(value);
                        }
                    }
                />
                <button type="submit">"افزودن"</button>
            </div>

            {move || ctx.adding_under.get().map(|pid| view! {
                <button type="button" class="cancel-btn" on:click=move |_| ctx.set_adding_under(None)>
                    "انصراف (#" {pid.to_string()} ")"
                </button>
            })}
        </form>
    }
}
