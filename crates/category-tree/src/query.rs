//! Tree Queries
//!
//! Recursive helpers over the nested forest. These walk the whole tree on
//! every call; `TreeIndex` answers the same questions from a flat snapshot.

use std::collections::HashSet;

use crate::node::TreeNode;

/// Depth-first search for a node by id
pub fn find_by_id<'a, N: TreeNode>(nodes: &'a [N], id: &N::Id) -> Option<&'a N> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// All nodes, at any depth, whose `parent_id` equals `parent_id`
///
/// Returned in depth-first pre-order, which is the existing sibling order.
pub fn collect_siblings<'a, N: TreeNode>(nodes: &'a [N], parent_id: Option<&N::Id>) -> Vec<&'a N> {
    fn walk<'a, N: TreeNode>(nodes: &'a [N], parent_id: Option<&N::Id>, out: &mut Vec<&'a N>) {
        for node in nodes {
            if node.parent_id() == parent_id {
                out.push(node);
            }
            walk(node.children(), parent_id, out);
        }
    }

    let mut result = Vec::new();
    walk(nodes, parent_id, &mut result);
    result
}

/// Render the forest as indented rows using recursive DFS
/// Returns (node, depth) pairs in display order; children of collapsed nodes are skipped
pub fn visible_rows<'a, N: TreeNode>(nodes: &'a [N], collapsed: &HashSet<N::Id>) -> Vec<(&'a N, usize)> {
    fn collect<'a, N: TreeNode>(
        nodes: &'a [N],
        depth: usize,
        collapsed: &HashSet<N::Id>,
        result: &mut Vec<(&'a N, usize)>,
    ) {
        for node in nodes {
            result.push((node, depth));
            if !collapsed.contains(node.id()) {
                collect(node.children(), depth + 1, collapsed, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(nodes, 0, collapsed, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Category, CategoryId};

    fn forest() -> Vec<Category> {
        vec![
            Category::new("1", "Machining").with_children(vec![
                Category::new("1a", "Turning").with_children(vec![
                    Category::new("1a-i", "CNC lathe"),
                    Category::new("1a-ii", "Manual lathe"),
                ]),
                Category::new("1b", "Milling"),
            ]),
            Category::new("2", "Casting"),
        ]
    }

    fn ids<'a>(nodes: impl IntoIterator<Item = &'a Category>) -> Vec<&'a str> {
        nodes.into_iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_find_nested_node() {
        let tree = forest();
        let found = find_by_id(&tree, &CategoryId::from("1a-ii")).unwrap();
        assert_eq!(found.title, "Manual lathe");
        assert_eq!(found.parent_id, Some(CategoryId::from("1a")));
    }

    #[test]
    fn test_find_missing_node() {
        assert!(find_by_id(&forest(), &CategoryId::from("nonexistent")).is_none());
    }

    #[test]
    fn test_collect_siblings_by_parent() {
        let tree = forest();
        assert_eq!(ids(collect_siblings(&tree, None)), vec!["1", "2"]);
        assert_eq!(ids(collect_siblings(&tree, Some(&"1".into()))), vec!["1a", "1b"]);
        assert_eq!(ids(collect_siblings(&tree, Some(&"1a".into()))), vec!["1a-i", "1a-ii"]);
        assert!(collect_siblings(&tree, Some(&"2".into())).is_empty());
    }

    #[test]
    fn test_collect_siblings_follows_parent_id_not_nesting() {
        // A node nested under "2" but claiming parent "1" still belongs to group "1"
        let mut tree = forest();
        let mut stray = Category::new("stray", "Stray");
        stray.parent_id = Some("1".into());
        tree[1].children.push(stray);

        assert_eq!(ids(collect_siblings(&tree, Some(&"1".into()))), vec!["1a", "1b", "stray"]);
    }

    #[test]
    fn test_visible_rows() {
        let tree = forest();
        let rows = visible_rows(&tree, &HashSet::new());
        let shape: Vec<(&str, usize)> = rows.iter().map(|(n, d)| (n.id.as_str(), *d)).collect();
        assert_eq!(
            shape,
            vec![("1", 0), ("1a", 1), ("1a-i", 2), ("1a-ii", 2), ("1b", 1), ("2", 0)]
        );
    }

    #[test]
    fn test_visible_rows_skips_collapsed() {
        let tree = forest();
        let collapsed: HashSet<CategoryId> = [CategoryId::from("1a")].into_iter().collect();
        let rows = visible_rows(&tree, &collapsed);
        assert_eq!(ids(rows.iter().map(|(n, _)| *n)), vec!["1", "1a", "1b", "2"]);
    }
}
