//! Expand/collapse state for a rendered thread.
//!
//! Visibility is derived from the expansion set on every change instead of
//! being pushed imperatively onto rendered nodes: a node shows iff every
//! ancestor up to the root is expanded. Each node's own flag is tracked
//! independently, toggling an ancestor leaves descendants' flags alone, so
//! collapsing and re-expanding restores the subtree exactly as it was.

use std::collections::{HashMap, HashSet};

use super::comment::CommentNode;

#[derive(Debug, Default, Clone)]
pub struct ThreadVisibility {
    expanded: HashSet<String>,
}

impl ThreadVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_owned());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
    }

    /// Which of `nodes` should render. Roots are always visible; anything
    /// else needs its parent visible and expanded. A single pass suffices
    /// because the materialized ordering places parents before their
    /// descendants. A node whose parent is missing from the listing (a
    /// soft-deleted ancestor) stays hidden.
    pub fn visible_ids(&self, nodes: &[CommentNode]) -> HashSet<String> {
        let mut shown: HashMap<&str, bool> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let visible = if node.depth == 0 {
                true
            } else {
                match node.parent_id.as_deref() {
                    Some(parent_id) => {
                        self.expanded.contains(parent_id)
                            && shown.get(parent_id).copied().unwrap_or(false)
                    }
                    None => false,
                }
            };

            shown.insert(node.id.as_str(), visible);
        }

        shown
            .into_iter()
            .filter(|(_, visible)| *visible)
            .map(|(id, _)| id.to_owned())
            .collect()
    }
}

/// True when at least one listed comment replies directly to `id`.
pub fn has_replies(nodes: &[CommentNode], id: &str) -> bool {
    nodes.iter().any(|n| n.parent_id.as_deref() == Some(id))
}

#[cfg(test)]
mod test {
    use super::*;

    fn node(id: &str, parent_id: Option<&str>, depth: usize) -> CommentNode {
        let now = chrono::Utc::now().naive_utc();
        CommentNode {
            id: id.into(),
            author_id: "user-1".into(),
            author_username: "alice".into(),
            parent_id: parent_id.map(str::to_owned),
            path: String::new(),
            value: 0.0,
            operation: "add".into(),
            result: 0.0,
            parent_result: None,
            depth,
            full_path: id.into(),
            is_comment_owner: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn chain() -> Vec<CommentNode> {
        vec![
            node("a", None, 0),
            node("b", Some("a"), 1),
            node("c", Some("b"), 2),
        ]
    }

    #[test]
    fn roots_are_always_visible() {
        let nodes = vec![node("a", None, 0), node("b", None, 0)];
        let visible = ThreadVisibility::new().visible_ids(&nodes);

        assert!(visible.contains("a"));
        assert!(visible.contains("b"));
    }

    #[test]
    fn visibility_requires_every_ancestor_expanded() {
        let nodes = chain();
        let mut state = ThreadVisibility::new();

        let visible = state.visible_ids(&nodes);
        assert_eq!(visible.len(), 1);
        assert!(visible.contains("a"));

        state.expand("a");
        let visible = state.visible_ids(&nodes);
        assert!(visible.contains("b"));
        assert!(!visible.contains("c"));

        // expanding only the inner node does nothing while the outer one
        // is collapsed
        state.collapse("a");
        state.expand("b");
        let visible = state.visible_ids(&nodes);
        assert_eq!(visible.len(), 1);
        assert!(visible.contains("a"));
    }

    #[test]
    fn collapsing_an_ancestor_preserves_descendant_flags() {
        let nodes = chain();
        let mut state = ThreadVisibility::new();

        state.expand("a");
        state.expand("b");
        assert_eq!(state.visible_ids(&nodes).len(), 3);

        state.toggle("a");
        let visible = state.visible_ids(&nodes);
        assert_eq!(visible.len(), 1);
        // b's own flag survived the ancestor toggle
        assert!(state.is_expanded("b"));

        state.toggle("a");
        assert_eq!(state.visible_ids(&nodes).len(), 3);
    }

    #[test]
    fn orphaned_nodes_stay_hidden() {
        // parent was soft-deleted and is absent from the listing
        let nodes = vec![node("b", Some("ghost"), 1)];
        let mut state = ThreadVisibility::new();
        state.expand("ghost");

        assert!(state.visible_ids(&nodes).is_empty());
    }

    #[test]
    fn has_replies_checks_direct_children_only() {
        let nodes = chain();

        assert!(has_replies(&nodes, "a"));
        assert!(has_replies(&nodes, "b"));
        assert!(!has_replies(&nodes, "c"));
        assert!(!has_replies(&nodes, "nope"));
    }
}
