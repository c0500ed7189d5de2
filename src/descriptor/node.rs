//! The descriptor node: tag, properties, ordered children, merge points.

use tracing::{trace, warn};

use super::merge_point::{MergePoint, MergePointError, MergePointList};
use crate::properties::Properties;
use crate::symbol::Symbol;
use crate::value::Value;

/// A node of a descriptor tree.
///
/// Each node exclusively owns its children, so a tree is a plain rose tree.
/// `Clone` is a deep copy: the clone shares nothing mutable with the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    tag: Symbol,
    properties: Properties,
    children: Vec<Descriptor>,
    merge_points: Option<MergePointList>,
}

impl Descriptor {
    /// Create a childless descriptor.
    pub fn new(tag: impl Into<Symbol>, properties: Properties) -> Self {
        Self {
            tag: tag.into(),
            properties,
            children: Vec::new(),
            merge_points: None,
        }
    }

    pub fn tag(&self) -> &Symbol {
        &self.tag
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn children(&self) -> &[Descriptor] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Descriptor> {
        &mut self.children
    }

    /// Shorthand for `properties().get(key)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The reserved `name` property.
    pub fn name(&self) -> Option<&Value> {
        self.properties.name()
    }

    /// Merge points registered on this node, if any were ever added.
    pub fn merge_points(&self) -> Option<&MergePointList> {
        self.merge_points.as_ref()
    }

    /// Append a child, ignoring merge points.
    pub fn add_child(&mut self, child: Descriptor) {
        self.children.push(child);
    }

    /// Add a child at the first merge point, or append it when there is none.
    ///
    /// A position past the end of the children list appends.
    pub fn merge_child(&mut self, child: Descriptor) {
        let Some(list) = self.merge_points.as_mut() else {
            self.children.push(child);
            return;
        };
        let Some(position) = list.first().map(MergePoint::position) else {
            self.children.push(child);
            return;
        };
        list.step()
            .expect("stepping a merge point list with a first point cannot fail");

        if position > self.children.len() {
            warn!(
                tag = %self.tag,
                position,
                len = self.children.len(),
                "merge point past end of children, appending"
            );
            self.children.push(child);
        } else {
            trace!(tag = %self.tag, position, child = %child.tag, "inserting at merge point");
            self.children.insert(position, child);
        }
    }

    /// Register a merge point at `position`.
    ///
    /// `count` limits how many children the point accepts; a negative count
    /// means unlimited and zero is an error. The point does not move children
    /// that are already present.
    pub fn add_merge_point(
        &mut self,
        position: usize,
        count: i64,
    ) -> Result<&MergePoint, MergePointError> {
        let point = MergePoint::new(position, count)?;
        Ok(self.push_merge_point(point))
    }

    /// Register an already-built merge point.
    pub fn push_merge_point(&mut self, point: MergePoint) -> &MergePoint {
        let list = self.merge_points.get_or_insert_with(MergePointList::new);
        list.add(point);
        list.iter()
            .next_back()
            .expect("list holds the point just added")
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::props;

    fn tags(desc: &Descriptor) -> Vec<&str> {
        desc.children().iter().map(|c| c.tag().as_str()).collect()
    }

    fn parent_with_children(count: usize) -> Descriptor {
        let mut parent = Descriptor::new("parent", Properties::new());
        for i in 0..count {
            parent.add_child(Descriptor::new(format!("child{i}"), Properties::new()));
        }
        parent
    }

    #[test]
    fn add_child_appends() {
        let mut parent = Descriptor::new("parent", Properties::new());
        parent.add_child(Descriptor::new("child", Properties::new()));
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].tag(), "child");
    }

    #[test]
    fn merge_child_without_merge_points_appends() {
        let mut parent = parent_with_children(5);
        parent.merge_child(Descriptor::new("extra", Properties::new()));
        assert_eq!(parent.children().len(), 6);
        assert_eq!(parent.children()[5].tag(), "extra");
    }

    #[test]
    fn merge_child_uses_merge_point() {
        let mut parent = Descriptor::new("parent", Properties::new());
        parent.add_merge_point(3, -1).unwrap();
        for i in 0..5 {
            parent.add_child(Descriptor::new(format!("child{i}"), Properties::new()));
        }
        parent.merge_child(Descriptor::new("extra", Properties::new()));
        assert_eq!(parent.children().len(), 6);
        assert_eq!(parent.children()[3].tag(), "extra");
    }

    #[test]
    fn capped_merge_point_falls_back_to_append() {
        let mut parent = Descriptor::new("parent", Properties::new());
        parent.add_merge_point(3, 2).unwrap();
        for i in 0..5 {
            parent.add_child(Descriptor::new(format!("child{i}"), Properties::new()));
        }
        for i in 0..3 {
            parent.merge_child(Descriptor::new(format!("extra{i}"), Properties::new()));
        }
        assert_eq!(parent.children().len(), 8);
        assert_eq!(parent.children()[3].tag(), "extra0");
        assert_eq!(parent.children()[4].tag(), "extra1");
        assert_eq!(parent.children()[7].tag(), "extra2");
        assert!(parent.merge_points().unwrap().is_empty());
    }

    #[test]
    fn out_of_order_merge_points_misplace_later_children() {
        let mut parent = parent_with_children(6);
        parent.add_merge_point(5, 1).unwrap();
        parent.add_merge_point(1, -1).unwrap();
        parent.merge_child(Descriptor::new("a", Properties::new()));
        parent.merge_child(Descriptor::new("b", Properties::new()));
        // `b` belongs after child0 but the first insertion pushed its point to 2.
        assert_eq!(
            tags(&parent),
            vec!["child0", "child1", "b", "child2", "child3", "child4", "a", "child5"]
        );
        let list = parent.merge_points().unwrap();
        assert_eq!(list.iter().map(MergePoint::position).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn consecutive_merge_points() {
        let mut parent = parent_with_children(2);
        parent.push_merge_point(MergePoint::limited(1, NonZeroUsize::MIN));
        parent.push_merge_point(MergePoint::unlimited(2));
        parent.merge_child(Descriptor::new("a", Properties::new()));
        parent.merge_child(Descriptor::new("b", Properties::new()));
        parent.merge_child(Descriptor::new("c", Properties::new()));
        assert_eq!(tags(&parent), vec!["child0", "a", "child1", "b", "c"]);
    }

    #[test]
    fn zero_count_merge_point_rejected() {
        let mut parent = parent_with_children(1);
        assert_eq!(
            parent.add_merge_point(0, 0),
            Err(MergePointError::Invalid { position: 0 })
        );
        assert!(parent.merge_points().is_none());
    }

    #[test]
    fn merge_point_past_end_appends() {
        let mut parent = parent_with_children(1);
        parent.add_merge_point(10, -1).unwrap();
        parent.merge_child(Descriptor::new("late", Properties::new()));
        assert_eq!(tags(&parent), vec!["child0", "late"]);
    }

    #[test]
    fn accessors() {
        let desc = Descriptor::new("action", props! { name: Symbol::from("open"), text: "Open" });
        assert_eq!(desc.tag(), "action");
        assert_eq!(desc.name(), Some(&Value::Symbol("open".into())));
        assert_eq!(desc.get("text").and_then(Value::as_str), Some("Open"));
        assert!(desc.children().is_empty());
    }

    #[test]
    fn clone_is_deep() {
        let mut original = parent_with_children(1);
        original.add_merge_point(0, 1).unwrap();
        let copy = original.clone();
        original.merge_child(Descriptor::new("extra", Properties::new()));
        original.properties_mut().insert("dirty", true);
        assert_eq!(copy.children().len(), 1);
        assert_eq!(copy.merge_points().unwrap().len(), 1);
        assert!(copy.get("dirty").is_none());
    }
}
