//! Drag Overlay Component
//!
//! Floating preview of the dragged category that follows the pointer,
//! independent of the list layout underneath.

use leptos::prelude::*;

use category_tree::find_by_id;

use crate::components::TreeHandles;
use crate::models::Category;
use crate::tree::title_initial;

/// Offset from the pointer so the preview doesn't cover the drop target
const OVERLAY_OFFSET_PX: i32 = 12;

#[component]
pub fn DragOverlay(
    #[prop(into)] categories: Signal<Vec<Category>>,
    handles: TreeHandles,
) -> impl IntoView {
    let dnd = handles.dnd;

    // (icon url, title) of the dragged node, pointer drags only
    let preview = move || {
        if dnd.keyboard_read.get() {
            return None;
        }
        let active = dnd.dragging_id_read.get()?;
        categories.with(|cats| {
            find_by_id(cats, &active).map(|category| {
                let icon = handles.icons.with_value(|icons| icons.resolve(category.icon_url.as_deref()));
                (icon, category.title.clone())
            })
        })
    };

    let style = move || {
        let (x, y) = dnd.pointer_read.get();
        format!(
            "position: fixed; left: {}px; top: {}px; pointer-events: none;",
            x + OVERLAY_OFFSET_PX,
            y + OVERLAY_OFFSET_PX
        )
    };

    view! {
        {move || preview().map(|(icon, title)| {
            let glyph = match icon {
                Some(src) => view! { <img class="category-icon" src=src alt="" /> }.into_any(),
                None => view! { <span class="category-icon placeholder">{title_initial(&title)}</span> }.into_any(),
            };
            view! {
                <div class="drag-overlay" style=style>
                    {glyph}
                    <span class="category-title">{title}</span>
                </div>
            }
        })}
    }
}
