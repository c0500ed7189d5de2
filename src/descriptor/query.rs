//! Read-only traversal and lookup for tree consumers.

use std::collections::VecDeque;

use super::node::Descriptor;
use crate::value::Value;

impl Descriptor {
    /// Pre-order depth-first traversal, starting with `self`.
    pub fn walk_depth_first(&self) -> Vec<&Descriptor> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            result.push(current);
            // Reverse so the first child is visited first.
            for child in current.children().iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Breadth-first traversal, starting with `self`.
    pub fn walk_breadth_first(&self) -> Vec<&Descriptor> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(self);
        while let Some(current) = queue.pop_front() {
            result.push(current);
            queue.extend(current.children());
        }
        result
    }

    /// Number of nodes in this subtree, `self` included.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Descriptor::node_count).sum::<usize>()
    }

    /// First node in pre-order with the given tag and name text.
    ///
    /// The name is compared by text, so symbol and string names both match.
    pub fn find(&self, tag: &str, name: &str) -> Option<&Descriptor> {
        self.walk_depth_first()
            .into_iter()
            .find(|desc| desc.tag() == tag && desc.name().and_then(Value::as_str) == Some(name))
    }

    /// All nodes in pre-order matching an arbitrary predicate.
    pub fn find_all(&self, predicate: impl Fn(&Descriptor) -> bool) -> Vec<&Descriptor> {
        self.walk_depth_first()
            .into_iter()
            .filter(|desc| predicate(desc))
            .collect()
    }

    /// First direct child with the given tag and name text.
    pub fn child(&self, tag: &str, name: &str) -> Option<&Descriptor> {
        self.children()
            .iter()
            .find(|desc| desc.tag() == tag && desc.name().and_then(Value::as_str) == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///          gui
    ///        /     \
    ///   menu_bar   tool_bar(main)
    ///    /    \
    /// menu(file) menu(edit)
    ///    |
    /// action(open)
    /// ```
    fn build_tree() -> Descriptor {
        Descriptor::build("gui", (), |g| {
            g.node_with("menu_bar", (), |mb| {
                mb.node_with("menu", "file", |m| {
                    m.node("action", "open");
                });
                mb.node("menu", "edit");
            });
            g.node("tool_bar", "main");
        })
    }

    fn tags<'a>(nodes: &[&'a Descriptor]) -> Vec<&'a str> {
        nodes.iter().map(|d| d.tag().as_str()).collect()
    }

    #[test]
    fn walk_depth_first() {
        let tree = build_tree();
        assert_eq!(
            tags(&tree.walk_depth_first()),
            vec!["gui", "menu_bar", "menu", "action", "menu", "tool_bar"]
        );
    }

    #[test]
    fn walk_breadth_first() {
        let tree = build_tree();
        assert_eq!(
            tags(&tree.walk_breadth_first()),
            vec!["gui", "menu_bar", "tool_bar", "menu", "menu", "action"]
        );
    }

    #[test]
    fn node_count_covers_subtree() {
        let tree = build_tree();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.children()[0].node_count(), 4);
    }

    #[test]
    fn find_by_tag_and_name() {
        let tree = build_tree();
        let edit = tree.find("menu", "edit").unwrap();
        assert!(edit.children().is_empty());
        assert!(tree.find("menu", "view").is_none());
        assert!(tree.find("action", "open").is_some());
    }

    #[test]
    fn find_all_with_predicate() {
        let tree = build_tree();
        let named = tree.find_all(|d| d.name().is_some());
        assert_eq!(named.len(), 4);
    }

    #[test]
    fn child_only_looks_at_direct_children() {
        let tree = build_tree();
        assert!(tree.child("tool_bar", "main").is_some());
        assert!(tree.child("menu", "file").is_none());
    }
}
