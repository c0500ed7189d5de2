//! Property maps: `Symbol -> Value`, iterated in key order.

use std::collections::btree_map::{self, BTreeMap};

use crate::symbol::Symbol;
use crate::value::Value;

/// Reserved key: the identity used to match nodes while merging.
pub const NAME_KEY: &str = "name";

/// Reserved key: the name of the group a node wants to be attached to.
pub const GROUP_KEY: &str = "group";

/// Reserved tag of nodes that accept group attachments.
pub const GROUP_TAG: &str = "group";

/// The property map of a descriptor.
///
/// Keys iterate in sorted order so that printing is deterministic regardless
/// of insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: BTreeMap<Symbol, Value>,
}

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map holding only `name`.
    pub fn named(name: impl Into<Value>) -> Self {
        let mut props = Self::new();
        props.insert(NAME_KEY, name);
        props
    }

    /// Insert a property, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<Symbol>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Insert a property (builder).
    pub fn with(mut self, key: impl Into<Symbol>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Symbol, Value> {
        self.entries.iter()
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, Symbol, Value> {
        self.entries.keys()
    }

    /// The reserved `name` property.
    pub fn name(&self) -> Option<&Value> {
        self.get(NAME_KEY)
    }

    /// The reserved `group` property.
    pub fn group(&self) -> Option<&Value> {
        self.get(GROUP_KEY)
    }
}

impl Extend<(Symbol, Value)> for Properties {
    fn extend<I: IntoIterator<Item = (Symbol, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K: Into<Symbol>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

impl IntoIterator for Properties {
    type Item = (Symbol, Value);
    type IntoIter = btree_map::IntoIter<Symbol, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a Symbol, &'a Value);
    type IntoIter = btree_map::Iter<'a, Symbol, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build a [`Properties`] map from `key: value` pairs.
///
/// Values go through [`Value::from`](crate::Value), so plain strings become
/// [`Value::Str`](crate::Value::Str); wrap identifiers in
/// [`Symbol`](crate::Symbol) to get symbolic values.
///
/// ```
/// use graft::{props, Symbol};
///
/// let props = props! { name: Symbol::from("open"), text: "&Open...", priority: 3 };
/// assert_eq!(props.len(), 3);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Properties::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {{
        let mut props = $crate::Properties::new();
        $(
            props.insert(stringify!($key), $value);
        )+
        props
    }};
}
