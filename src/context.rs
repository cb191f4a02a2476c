//! Application Context
//!
//! Screen-wide signals shared through Leptos context: the tree reload
//! counter and the parent a new category will be created under.

use leptos::prelude::*;

use crate::models::CategoryId;

#[derive(Clone, Copy)]
pub struct AppContext {
    reloads: RwSignal<u32>,
    /// `None` = create at root
    pub adding_under: ReadSignal<Option<CategoryId>>,
    set_adding_under: WriteSignal<Option<CategoryId>>,
}

impl AppContext {
    pub fn new() -> Self {
        let (adding_under, set_adding_under) = signal(None);
        Self {
            reloads: RwSignal::new(0),
            adding_under,
            set_adding_under,
        }
    }

    /// Tracked read; effects that load the tree subscribe through this
    pub fn reload_count(&self) -> u32 {
        self.reloads.get()
    }

    /// Ask every subscriber to re-fetch the tree
    pub fn reload(&self) {
        self.reloads.update(|n| *n += 1);
    }

    pub fn set_adding_under(&self, parent_id: Option<CategoryId>) {
        self.set_adding_under.set(parent_id);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
