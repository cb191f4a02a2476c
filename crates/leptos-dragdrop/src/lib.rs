//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse and keyboard events.
//! Uses movement threshold to distinguish click from drag.
//! Sensing only: what a drop means is decided by the `on_drag_end` callback.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Bounds for draggable item ids
pub trait DragId: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> DragId for T {}

/// A finished drag: the dragged item and what it was released over
#[derive(Clone, Debug, PartialEq)]
pub struct DragEnd<Id> {
    pub active: Id,
    /// `None` when released outside any item or cancelled with Escape
    pub over: Option<Id>,
}

/// DnD state signals
pub struct DndSignals<Id: DragId> {
    pub dragging_id_read: ReadSignal<Option<Id>>,
    pub dragging_id_write: WriteSignal<Option<Id>>,
    pub over_id_read: ReadSignal<Option<Id>>,
    pub over_id_write: WriteSignal<Option<Id>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<Id>>,
    pub pending_id_write: WriteSignal<Option<Id>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Last pointer position while dragging (drives the overlay)
    pub pointer_read: ReadSignal<(i32, i32)>,
    pub pointer_write: WriteSignal<(i32, i32)>,
    /// Drag started from the keyboard (no pointer overlay)
    pub keyboard_read: ReadSignal<bool>,
    pub keyboard_write: WriteSignal<bool>,
    /// When set, new drags are not started
    pub disabled_read: ReadSignal<bool>,
    pub disabled_write: WriteSignal<bool>,
    pub on_drag_start: Callback<Id>,
    pub on_drag_end: Callback<DragEnd<Id>>,
}

impl<Id: DragId> Clone for DndSignals<Id> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id: DragId> Copy for DndSignals<Id> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals<Id: DragId>(
    on_drag_start: Callback<Id>,
    on_drag_end: Callback<DragEnd<Id>>,
) -> DndSignals<Id> {
    let (dragging_id_read, dragging_id_write) = signal(None::<Id>);
    let (over_id_read, over_id_write) = signal(None::<Id>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<Id>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (pointer_read, pointer_write) = signal((0i32, 0i32));
    let (keyboard_read, keyboard_write) = signal(false);
    let (disabled_read, disabled_write) = signal(false);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        over_id_read,
        over_id_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        pointer_read,
        pointer_write,
        keyboard_read,
        keyboard_write,
        disabled_read,
        disabled_write,
        on_drag_start,
        on_drag_end,
    }
}

fn begin_drag<Id: DragId>(dnd: &DndSignals<Id>, id: Id, via_keyboard: bool) {
    dnd.keyboard_write.set(via_keyboard);
    dnd.over_id_write.set(if via_keyboard { Some(id.clone()) } else { None });
    dnd.dragging_id_write.set(Some(id.clone()));
    dnd.on_drag_start.run(id);
}

/// End drag operation
pub fn end_drag<Id: DragId>(dnd: &DndSignals<Id>) {
    dnd.dragging_id_write.set(None);
    dnd.over_id_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.keyboard_write.set(false);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// End the current drag (if any) and report it
fn finish_drag<Id: DragId>(dnd: &DndSignals<Id>, over: Option<Id>) {
    if let Some(active) = dnd.dragging_id_read.get_untracked() {
        end_drag(dnd);
        dnd.on_drag_end.run(DragEnd { active, over });
    }
}

/// Create mousedown handler for drag handles
/// Records pending drag with start position
pub fn make_on_mousedown<Id: DragId>(dnd: DndSignals<Id>, item_id: Id) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || dnd.disabled_read.get_untracked() {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        // Keep text selection from kicking in while dragging
        ev.prevent_default();
        dnd.pending_id_write.set(Some(item_id.clone()));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove<Id: DragId>(dnd: DndSignals<Id>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.pointer_write.set((ev.client_x(), ev.client_y()));
            return;
        }

        // If we have a pending drag and haven't started dragging yet
        if let Some(pending) = dnd.pending_id_read.get_untracked() {
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();

            // Start dragging if moved beyond threshold
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.pointer_write.set((ev.client_x(), ev.client_y()));
                begin_drag(&dnd, pending, false);
            }
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for items (become the over target)
pub fn make_on_item_mouseenter<Id: DragId>(dnd: DndSignals<Id>, item_id: Id) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            if dnd.keyboard_read.get_untracked() {
                return;
            }
            // Don't highlight dropping on self
            let over = if dragging != item_id { Some(item_id.clone()) } else { None };
            dnd.over_id_write.set(over);
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<Id: DragId>(dnd: DndSignals<Id>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() && !dnd.keyboard_read.get_untracked() {
            dnd.over_id_write.set(None);
        }
    }
}

/// Next over target when stepping `delta` rows through `order` from `current`
/// Clamped to the ends of the list; `None` if `current` is not in `order`
pub fn step_over<Id: PartialEq + Clone>(order: &[Id], current: &Id, delta: isize) -> Option<Id> {
    let at = order.iter().position(|id| id == current)? as isize;
    let last = order.len() as isize - 1;
    let next = (at + delta).clamp(0, last);
    order.get(next as usize).cloned()
}

/// Create keydown handler for drag handles
///
/// Space/Enter grabs, ArrowUp/ArrowDown moves the over target through
/// `visible_order`, Space/Enter drops, Escape cancels.
pub fn make_on_handle_keydown<Id: DragId>(
    dnd: DndSignals<Id>,
    item_id: Id,
    visible_order: Callback<(), Vec<Id>>,
) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static {
    move |ev: web_sys::KeyboardEvent| {
        let dragging = dnd.dragging_id_read.get_untracked();
        let key = ev.key();
        match (dragging, key.as_str()) {
            (None, " " | "Enter") => {
                ev.prevent_default();
                if !dnd.disabled_read.get_untracked() {
                    begin_drag(&dnd, item_id.clone(), true);
                }
            }
            (Some(active), "ArrowDown" | "ArrowUp") if dnd.keyboard_read.get_untracked() => {
                ev.prevent_default();
                let delta = if key == "ArrowDown" { 1 } else { -1 };
                let current = dnd.over_id_read.get_untracked().unwrap_or(active);
                if let Some(next) = step_over(&visible_order.run(()), &current, delta) {
                    dnd.over_id_write.set(Some(next));
                }
            }
            (Some(_), " " | "Enter") if dnd.keyboard_read.get_untracked() => {
                ev.prevent_default();
                finish_drag(&dnd, dnd.over_id_read.get_untracked());
            }
            (Some(_), "Escape") => {
                ev.prevent_default();
                finish_drag(&dnd, None);
            }
            _ => {}
        }
    }
}

/// Bind global mouseup handler for drop detection
/// Also binds the global mousemove and an Escape handler for pointer drags
pub fn bind_global_mouseup<Id: DragId>(dnd: DndSignals<Id>) {
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        // Clear pending state first
        dnd.pending_id_write.set(None);

        // Only pointer drags end here; click events fire naturally otherwise
        if !dnd.keyboard_read.get_untracked() {
            finish_drag(&dnd, dnd.over_id_read.get_untracked());
        }
    });

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && !dnd.keyboard_read.get_untracked() {
            dnd.pending_id_write.set(None);
            finish_drag(&dnd, None);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_mouseup.forget();
    on_keydown.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_over_moves_and_clamps() {
        let order = vec!["a", "b", "c"];
        assert_eq!(step_over(&order, &"a", 1), Some("b"));
        assert_eq!(step_over(&order, &"b", -1), Some("a"));
        assert_eq!(step_over(&order, &"c", 1), Some("c"));
        assert_eq!(step_over(&order, &"a", -1), Some("a"));
    }

    #[test]
    fn test_step_over_unknown_current() {
        let order = vec![1, 2, 3];
        assert_eq!(step_over(&order, &9, 1), None);
        assert_eq!(step_over::<i32>(&[], &1, 1), None);
    }
}
