//! Tree Utilities
//!
//! Helper functions for tree rendering.

use std::collections::HashSet;

use category_tree::visible_rows;

use crate::models::{Category, CategoryId};

/// Horizontal indent per depth level
pub const INDENT_PX: usize = 24;

/// Ids of the rows currently on screen, top to bottom
/// Used to step the keyboard drag target through the list
pub fn visible_order(categories: &[Category], collapsed: &HashSet<CategoryId>) -> Vec<CategoryId> {
    visible_rows(categories, collapsed)
        .into_iter()
        .map(|(category, _)| category.id.clone())
        .collect()
}

/// Placeholder glyph for a category without an icon
pub fn title_initial(title: &str) -> String {
    title
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<Category> {
        vec![
            Category::new("1", "Machining").with_children(vec![
                Category::new("1a", "Turning"),
                Category::new("1b", "Milling"),
            ]),
            Category::new("2", "Casting"),
        ]
    }

    #[test]
    fn test_visible_order() {
        let order = visible_order(&forest(), &HashSet::new());
        let order: Vec<&str> = order.iter().map(CategoryId::as_str).collect();
        assert_eq!(order, vec!["1", "1a", "1b", "2"]);
    }

    #[test]
    fn test_visible_order_collapsed() {
        let collapsed: HashSet<CategoryId> = [CategoryId::from("1")].into_iter().collect();
        let order = visible_order(&forest(), &collapsed);
        assert_eq!(order, vec![CategoryId::from("1"), CategoryId::from("2")]);
    }

    #[test]
    fn test_title_initial() {
        assert_eq!(title_initial("milling"), "M");
        assert_eq!(title_initial(" ریخته‌گری"), "ر");
        assert_eq!(title_initial(""), "?");
    }
}
