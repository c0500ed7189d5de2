//! Destructive structural merge of descriptor trees.
//!
//! Two nodes match when their tags are equal and their `name` properties are
//! equal (two missing names are equal). Matching nodes unify their children:
//! each child of the source is merged into the first target child that
//! accepts it, and otherwise a copy is added to the target through its merge
//! points. A target node tagged `group` additionally accepts any source node
//! whose `group` property equals the target's name, again counting two
//! missing values as equal.
//!
//! The source tree is only read. Everything that ends up in the target is a
//! copy, so one source can be merged into several targets.

use tracing::{debug, trace};

use super::node::Descriptor;
use crate::properties::{GROUP_KEY, GROUP_TAG, NAME_KEY};
use crate::symbol::Symbol;

// ---------------------------------------------------------------------------
// MergeConfig
// ---------------------------------------------------------------------------

/// The reserved tag and keys the merge engine looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Tag of nodes that accept group attachments.
    pub group_tag: Symbol,
    /// Property compared (together with the tag) to match nodes.
    pub name_key: Symbol,
    /// Property naming the group a source node attaches to.
    pub group_key: Symbol,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            group_tag: Symbol::from(GROUP_TAG),
            name_key: Symbol::from(NAME_KEY),
            group_key: Symbol::from(GROUP_KEY),
        }
    }
}

impl MergeConfig {
    /// Create the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group tag (builder).
    pub fn with_group_tag(mut self, tag: impl Into<Symbol>) -> Self {
        self.group_tag = tag.into();
        self
    }

    /// Set the name key (builder).
    pub fn with_name_key(mut self, key: impl Into<Symbol>) -> Self {
        self.name_key = key.into();
        self
    }

    /// Set the group key (builder).
    pub fn with_group_key(mut self, key: impl Into<Symbol>) -> Self {
        self.group_key = key.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

impl Descriptor {
    /// Merge `other` into `self` with the default reserved names.
    ///
    /// Returns whether the trees matched. On `false`, `self` is unchanged.
    pub fn merge(&mut self, other: &Descriptor) -> bool {
        self.merge_with(other, &MergeConfig::default())
    }

    /// Merge `other` into `self` using `config` for the reserved names.
    pub fn merge_with(&mut self, other: &Descriptor, config: &MergeConfig) -> bool {
        if self.matches(other, config) {
            trace!(tag = %self.tag(), "descriptors match, merging children");
            for incoming in other.children() {
                let absorbed = self
                    .children_mut()
                    .iter_mut()
                    .any(|child| child.merge_with(incoming, config));
                if !absorbed {
                    trace!(parent = %self.tag(), child = %incoming.tag(), "no match, adding copy");
                    self.merge_child(incoming.clone());
                }
            }
            true
        } else if self.accepts_group_member(other, config) {
            trace!(group = %self.tag(), member = %other.tag(), "attaching to group");
            self.merge_child(other.clone());
            true
        } else {
            false
        }
    }

    /// Merge each tree of `others` in order, returning how many matched.
    pub fn merge_all<'o>(&mut self, others: impl IntoIterator<Item = &'o Descriptor>) -> usize {
        self.merge_all_with(others, &MergeConfig::default())
    }

    /// [`merge_all`](Self::merge_all) using `config` for the reserved names.
    pub fn merge_all_with<'o>(
        &mut self,
        others: impl IntoIterator<Item = &'o Descriptor>,
        config: &MergeConfig,
    ) -> usize {
        let mut merged = 0;
        let mut skipped = 0;
        for other in others {
            if self.merge_with(other, config) {
                merged += 1;
            } else {
                skipped += 1;
            }
        }
        debug!(tag = %self.tag(), merged, skipped, "merged descriptor trees");
        merged
    }

    /// Consuming merge: `Ok` with the merged tree, or `Err` with `self` untouched.
    pub fn merged(mut self, other: &Descriptor) -> Result<Descriptor, Descriptor> {
        if self.merge(other) {
            Ok(self)
        } else {
            Err(self)
        }
    }

    fn matches(&self, other: &Descriptor, config: &MergeConfig) -> bool {
        self.tag() == other.tag()
            && self.get(config.name_key.as_str()) == other.get(config.name_key.as_str())
    }

    fn accepts_group_member(&self, other: &Descriptor, config: &MergeConfig) -> bool {
        // Absent equals absent: an unnamed group takes members without a group key.
        *self.tag() == config.group_tag
            && self.get(config.name_key.as_str()) == other.get(config.group_key.as_str())
    }
}
