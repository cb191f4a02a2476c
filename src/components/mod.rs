//! UI Components
//!
//! Reusable Leptos components.

mod category_tree;
mod category_tree_node;
mod drag_overlay;
mod new_category_form;
mod delete_confirm_dialog;
mod log_panel;
mod toast_host;

pub use category_tree::{CategoryTree, TreeHandles};
pub use category_tree_node::CategoryTreeNode;
pub use drag_overlay::DragOverlay;
pub use new_category_form::NewCategoryForm;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use log_panel::LogPanel;
pub use toast_host::ToastHost;
