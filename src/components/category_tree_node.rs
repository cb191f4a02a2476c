//! Category Tree Node Component
//!
//! One category row plus its (recursive) children.

use leptos::prelude::*;

use leptos_dragdrop::{make_on_handle_keydown, make_on_item_mouseenter, make_on_mousedown, make_on_mouseleave};

use crate::components::TreeHandles;
use crate::models::Category;
use crate::tree::{title_initial, INDENT_PX};

/// A single category row with its subtree
#[component]
pub fn CategoryTreeNode(
    category: Category,
    depth: usize,
    handles: TreeHandles,
) -> impl IntoView {
    let dnd = handles.dnd;
    let id = category.id.clone();
    let title = category.title.clone();
    let has_children = category.has_children();
    let is_active = category.is_active;
    let icon = handles.icons.with_value(|icons| icons.resolve(category.icon_url.as_deref()));
    let indent = depth * INDENT_PX;

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_keydown = make_on_handle_keydown(dnd, id.clone(), handles.visible_order);
    let on_mouseenter = make_on_item_mouseenter(dnd, id.clone());
    let on_mouseleave = make_on_mouseleave(dnd);

    // Visual state
    let is_collapsed = {
        let id = id.clone();
        move || handles.collapsed.with(|closed| closed.contains(&id))
    };
    let is_dragging = {
        let id = id.clone();
        move || dnd.dragging_id_read.with(|dragging| dragging.as_ref() == Some(&id))
    };
    let is_drop_target = {
        let id = id.clone();
        move || dnd.over_id_read.with(|over| over.as_ref() == Some(&id))
    };

    let row_class = {
        let is_dragging = is_dragging.clone();
        move || {
            let mut c = String::from("category-row");
            if !is_active { c.push_str(" inactive"); }
            if is_dragging() { c.push_str(" dragging"); }
            if is_drop_target() { c.push_str(" drop-target"); }
            if handles.committing.get() { c.push_str(" reordering"); }
            c
        }
    };

    let toggle = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            if dnd.drag_just_ended_read.get_untracked() { return; }
            let id = id.clone();
            handles.collapsed.update(move |closed| {
                if !closed.remove(&id) {
                    closed.insert(id);
                }
            });
        }
    };

    // Actions are passed through untouched
    let add_button = handles.on_add_subcategory.map(|on_add| {
        let id = id.clone();
        view! {
            <button class="add-child-btn" title="افزودن زیردسته" on:click=move |_| on_add.run(id.clone())>"+"</button>
        }
    });
    let edit_button = handles.on_edit.map(|on_edit| {
        let category = category.clone();
        view! {
            <button class="edit-btn" title="ویرایش" on:click=move |_| on_edit.run(category.clone())>"✎"</button>
        }
    });
    let delete_button = {
        let category = category.clone();
        let on_delete = handles.on_delete;
        view! {
            <button class="delete-btn" title="حذف" on:click=move |_| on_delete.run(category.clone())>"×"</button>
        }
    };

    // Collapse toggle
    let toggle_view = if has_children {
        let is_collapsed = is_collapsed.clone();
        view! {
            <button class="collapse-btn" on:click=toggle>
                {move || if is_collapsed() { "◀" } else { "▼" }}
            </button>
        }.into_any()
    } else {
        view! { <span class="collapse-placeholder">"·"</span> }.into_any()
    };

    // Icon or title initial
    let icon_view = match icon {
        Some(src) => view! { <img class="category-icon" src=src alt="" /> }.into_any(),
        None => view! { <span class="category-icon placeholder">{title_initial(&title)}</span> }.into_any(),
    };

    let children = category.children;

    view! {
        <div class="category-node">
            <div
                class=row_class
                style=format!("margin-inline-start: {}px;", indent)
                on:mouseenter=on_mouseenter
                on:mouseleave=on_mouseleave
            >
                <span
                    class="drag-handle"
                    role="button"
                    tabindex="0"
                    aria-label="جابجایی"
                    aria-grabbed=move || is_dragging().to_string()
                    on:mousedown=on_mousedown
                    on:keydown=on_keydown
                >
                    "⠿"
                </span>

                {toggle_view}
                {icon_view}

                <span class="category-title">{title}</span>

                <span class=if is_active { "badge active" } else { "badge inactive" }>
                    {if is_active { "فعال" } else { "غیرفعال" }}
                </span>

                <div class="category-actions">
                    {add_button}
                    {edit_button}
                    {delete_button}
                </div>
            </div>

            // Children (recursive)
            {move || (has_children && !is_collapsed()).then(|| {
                let children = children.clone();
                view! {
                    <div class="category-children">
                        {children.into_iter().map(|child| view! {
                            <CategoryTreeNode category=child depth=depth + 1 handles=handles />
                        }.into_any()).collect_view()}
                    </div>
                }
            })}
        </div>
    }
}
