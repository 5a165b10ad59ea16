//! Category tree construction and traversal
//!
//! Categories are stored flat with a `parent_id` link; the tree shape is
//! derived on demand. Every traversal here carries a visited-set guard so
//! it terminates even if a cycle slipped past the write-time check.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::entities::Category;

/// A category with its children nested, as returned by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub children: Vec<CategoryTreeNode>,
}

/// Build a forest of nested nodes from a flat category list.
///
/// Roots are categories without a parent; siblings keep the input order.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    let mut by_parent: HashMap<Option<i64>, Vec<&Category>> = HashMap::new();
    for category in categories {
        by_parent.entry(category.parent_id).or_default().push(category);
    }

    let mut seen = HashSet::new();
    attach_children(&by_parent, None, &mut seen)
}

fn attach_children(
    by_parent: &HashMap<Option<i64>, Vec<&Category>>,
    parent_id: Option<i64>,
    seen: &mut HashSet<i64>,
) -> Vec<CategoryTreeNode> {
    let Some(children) = by_parent.get(&parent_id) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(children.len());
    for c in children {
        if !seen.insert(c.id) {
            continue;
        }
        nodes.push(CategoryTreeNode {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            slug: c.slug.clone(),
            parent_id: c.parent_id,
            children: attach_children(by_parent, Some(c.id), seen),
        });
    }
    nodes
}

/// Collect `category_id` plus every category reachable through child
/// edges, used to scope product queries to a whole subtree.
pub fn descendant_ids(categories: &[Category], category_id: i64) -> Vec<i64> {
    let mut by_parent: HashMap<i64, Vec<i64>> = HashMap::new();
    for category in categories {
        if let Some(parent_id) = category.parent_id {
            by_parent.entry(parent_id).or_default().push(category.id);
        }
    }

    let mut visited = HashSet::from([category_id]);
    let mut ids = vec![category_id];
    let mut queue = VecDeque::from([category_id]);

    while let Some(current) = queue.pop_front() {
        if let Some(children) = by_parent.get(&current) {
            for &child in children {
                if visited.insert(child) {
                    ids.push(child);
                    queue.push_back(child);
                }
            }
        }
    }

    ids
}

/// Decide whether reparenting `category_id` under `proposed_parent_id`
/// would make the category its own ancestor.
///
/// Walks upward from the proposed parent; any id seen twice (including
/// `category_id` itself) is a cycle. Self-parenting is rejected directly.
pub fn would_create_cycle(
    categories: &[Category],
    category_id: i64,
    proposed_parent_id: i64,
) -> bool {
    let parent_of: HashMap<i64, Option<i64>> =
        categories.iter().map(|c| (c.id, c.parent_id)).collect();

    let mut visited = HashSet::from([category_id]);
    let mut current = Some(proposed_parent_id);

    while let Some(id) = current {
        if !visited.insert(id) {
            return true;
        }
        current = match parent_of.get(&id) {
            Some(parent) => *parent,
            // unknown parent id, the walk cannot continue
            None => None,
        };
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SYSTEM_ACTOR;

    fn category(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        let mut c = Category::new(name, "", parent_id, SYSTEM_ACTOR);
        c.id = id;
        c
    }

    fn sample_forest() -> Vec<Category> {
        vec![
            category(1, "Games", None),
            category(2, "Action Games", Some(1)),
            category(3, "RPG", Some(1)),
            category(4, "Roguelikes", Some(3)),
            category(5, "Hardware", None),
        ]
    }

    #[test]
    fn builds_forest_with_nested_children() {
        let tree = build_category_tree(&sample_forest());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Games");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[1].children[0].name, "Roguelikes");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn siblings_keep_input_order() {
        let tree = build_category_tree(&sample_forest());
        let names: Vec<_> = tree[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Action Games", "RPG"]);
    }

    #[test]
    fn descendants_include_start_and_whole_subtree() {
        let categories = sample_forest();
        let mut ids = descendant_ids(&categories, 1);
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3, 4]);

        assert_eq!(descendant_ids(&categories, 5), [5]);
        assert_eq!(descendant_ids(&categories, 2), [2]);
    }

    #[test]
    fn descendants_have_no_duplicates() {
        let categories = sample_forest();
        let ids = descendant_ids(&categories, 1);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn traversals_terminate_on_a_corrupted_cycle() {
        // 10 <-> 11 should never exist, but the guard must still hold
        let categories = vec![category(10, "A", Some(11)), category(11, "B", Some(10))];

        let mut ids = descendant_ids(&categories, 10);
        ids.sort_unstable();
        assert_eq!(ids, [10, 11]);

        // no root exists, so the forest is empty, but building terminates
        let tree = build_category_tree(&categories);
        assert!(tree.is_empty());
    }

    #[test]
    fn duplicate_ids_appear_once_in_the_tree() {
        let categories = vec![
            category(1, "Games", None),
            category(1, "Games Copy", None),
            category(2, "Action Games", Some(1)),
        ];

        let tree = build_category_tree(&categories);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "Games");
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn reparenting_under_own_descendant_is_a_cycle() {
        let categories = sample_forest();
        // Games under Action Games
        assert!(would_create_cycle(&categories, 1, 2));
        // Games under the deeper Roguelikes
        assert!(would_create_cycle(&categories, 1, 4));
    }

    #[test]
    fn self_parenting_is_a_cycle() {
        assert!(would_create_cycle(&sample_forest(), 3, 3));
    }

    #[test]
    fn reparenting_under_unrelated_category_is_allowed() {
        let categories = sample_forest();
        assert!(!would_create_cycle(&categories, 2, 5));
        assert!(!would_create_cycle(&categories, 4, 1));
    }

    #[test]
    fn unknown_parent_terminates_without_cycle() {
        assert!(!would_create_cycle(&sample_forest(), 2, 99));
    }
}
