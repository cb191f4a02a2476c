//! Category Tree Component
//!
//! Displays the category forest with drag-and-drop support.
//! Same-group drops become `reorder`, cross-group drops become `move`;
//! persistence and the follow-up refresh belong to the caller.

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

use category_tree::{DragController, DragOutcome, DragPhase, TreeIndex, TreeMutations};
use leptos_dragdrop::*;

use crate::components::{CategoryTreeNode, DragOverlay};
use crate::icons::IconResolver;
use crate::models::{Category, CategoryId};
use crate::tree::visible_order;

/// Handles shared by every node of one tree
#[derive(Clone, Copy)]
pub struct TreeHandles {
    pub dnd: DndSignals<CategoryId>,
    pub collapsed: RwSignal<HashSet<CategoryId>>,
    /// A reorder/move is outstanding
    pub committing: RwSignal<bool>,
    pub icons: StoredValue<IconResolver>,
    pub visible_order: Callback<(), Vec<CategoryId>>,
    pub on_delete: Callback<Category>,
    pub on_edit: Option<Callback<Category>>,
    pub on_add_subcategory: Option<Callback<CategoryId>>,
}

fn build_controller(commit_timeout: Option<Duration>) -> DragController<CategoryId> {
    match commit_timeout {
        Some(timeout) => DragController::new().with_timeout(
            timeout,
            Box::new(|d: Duration| gloo_timers::future::sleep(d).boxed_local()),
        ),
        None => DragController::new(),
    }
}

/// Category tree with drag handles
///
/// # Arguments
/// * `categories` - pre-nested forest, owned by the caller
/// * `mutations` - `reorder` / `move_node` persistence; the caller refreshes afterwards
/// * `on_delete` - forwarded unchanged, no confirmation here
/// * `on_edit`, `on_add_subcategory` - forwarded unchanged when present
#[component]
pub fn CategoryTree(
    #[prop(into)] categories: Signal<Vec<Category>>,
    mutations: Rc<dyn TreeMutations<CategoryId>>,
    #[prop(into)] on_delete: Callback<Category>,
    #[prop(optional, into)] on_edit: Option<Callback<Category>>,
    #[prop(optional, into)] on_add_subcategory: Option<Callback<CategoryId>>,
    icon_resolver: IconResolver,
    commit_timeout: Option<Duration>,
) -> impl IntoView {
    let collapsed = RwSignal::new(HashSet::<CategoryId>::new());
    let committing = RwSignal::new(false);

    // One arena per snapshot
    let index = Memo::new(move |_| Arc::new(TreeIndex::build(&categories.get())));

    let controller = StoredValue::new_local(Rc::new(build_controller(commit_timeout)));
    let mutations = StoredValue::new_local(mutations);

    let on_drag_start = Callback::new(move |id: CategoryId| {
        controller.with_value(|c| {
            c.drag_start(id);
        });
    });

    let on_drag_end = Callback::new(move |end: DragEnd<CategoryId>| {
        let controller = controller.get_value();
        let mutations = mutations.get_value();
        let snapshot = index.get_untracked();
        spawn_local(async move {
            let outcome = controller.drag_end(&snapshot, end.over, &*mutations).await;
            if let DragOutcome::Failed(_) = outcome {
                // Already logged by the controller; the caller reports and refreshes
                return;
            }
            log::debug!("drag of {} finished: {:?}", end.active, outcome);
        });
    });

    let dnd = create_dnd_signals(on_drag_start, on_drag_end);
    bind_global_mouseup(dnd);

    controller.with_value(|c| {
        c.set_phase_listener(move |phase| {
            let busy = matches!(phase, DragPhase::Committing);
            committing.set(busy);
            dnd.disabled_write.set(busy);
        });
    });

    let visible_order = Callback::new(move |_: ()| {
        categories.with_untracked(|cats| collapsed.with_untracked(|closed| visible_order(cats, closed)))
    });

    let handles = TreeHandles {
        dnd,
        collapsed,
        committing,
        icons: StoredValue::new(icon_resolver),
        visible_order,
        on_delete,
        on_edit,
        on_add_subcategory,
    };

    let tree_class = move || {
        let mut c = String::from("category-tree");
        if dnd.dragging_id_read.get().is_some() { c.push_str(" dragging"); }
        if committing.get() { c.push_str(" reordering"); }
        c
    };

    view! {
        <div class=tree_class aria-busy=move || committing.get().to_string()>
            // Whole forest re-renders per snapshot; a keyed <For> on root ids
            // would miss changes further down
            {move || categories.get().into_iter().map(|category| view! {
                <CategoryTreeNode category=category depth=0 handles=handles />
            }).collect_view()}

            {move || categories.with(Vec::is_empty).then(|| view! {
                <div class="category-tree-empty">"هنوز دسته‌بندی ثبت نشده است"</div>
            })}

            <DragOverlay categories=categories handles=handles />
        </div>
    }
}
