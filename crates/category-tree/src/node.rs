//! Category Node
//!
//! The category model as delivered by the repository (pre-nested),
//! and the minimal node capability the drag engine works against.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Core trait for anything the drag engine can arrange
///
/// Only structure lives here; titles, icons and badges belong to the UI.
pub trait TreeNode: Sized {
    /// Stable identifier, unchanged by reorder/move
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Parent reference, `None` for roots
    fn parent_id(&self) -> Option<&Self::Id>;

    /// Ordered children
    fn children(&self) -> &[Self];
}

/// Opaque category identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Category tree node (matches the REST payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
    /// Depth hint, display only
    #[serde(default)]
    pub level: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: title.to_lowercase(),
            title,
            parent_id: None,
            is_active: true,
            icon_url: None,
            children: Vec::new(),
            level: None,
        }
    }

    /// Attach children, stamping their `parent_id` with this node's id
    pub fn with_children(mut self, children: Vec<Category>) -> Self {
        self.children = children
            .into_iter()
            .map(|mut child| {
                child.parent_id = Some(self.id.clone());
                child
            })
            .collect();
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl TreeNode for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn parent_id(&self) -> Option<&CategoryId> {
        self.parent_id.as_ref()
    }

    fn children(&self) -> &[Category] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rest_payload() {
        let json = r#"[{
            "id": "1",
            "title": "Casting",
            "slug": "casting",
            "parentId": null,
            "iconUrl": "icons/casting.svg",
            "children": [
                {"id": "1a", "title": "Sand", "slug": "sand", "parentId": "1", "isActive": false}
            ]
        }]"#;

        let tree: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_active);
        assert_eq!(tree[0].icon_url.as_deref(), Some("icons/casting.svg"));
        assert_eq!(tree[0].children[0].parent_id, Some(CategoryId::from("1")));
        assert!(!tree[0].children[0].is_active);
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_with_children_sets_parent() {
        let root = Category::new("1", "Root").with_children(vec![Category::new("1a", "A")]);
        assert_eq!(root.children[0].parent_id(), Some(&CategoryId::from("1")));
        assert!(root.has_children());
    }
}
