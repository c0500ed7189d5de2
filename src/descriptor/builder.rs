//! Tree construction DSL.
//!
//! A [`Builder`] is bound to one node. Each call creates a child of that node;
//! nested calls receive a fresh builder bound to the new child. Arguments are
//! turned into a property map with [`IntoProperties`]:
//!
//! | argument             | properties                      |
//! |----------------------|---------------------------------|
//! | `()`                 | `{}`                            |
//! | a [`Properties`] map | the map itself                  |
//! | a single name        | `{name: <name>}`                |
//! | `(name, map)`        | the map with `name` set         |
//!
//! Names given as `&str`, `String` or [`Symbol`] become symbol values.
//!
//! ```
//! use graft::{props, Descriptor};
//!
//! let gui = Descriptor::build("gui", (), |g| {
//!     g.node_with("menu_bar", (), |mb| {
//!         mb.node_with("menu", "file", |m| {
//!             m.node("action", "open");
//!             m.merge_point();
//!             m.node("action", ("quit", props! { text: "&Quit" }));
//!         });
//!     });
//! });
//!
//! assert_eq!(
//!     gui.to_string(),
//!     r#"(gui {} (menu_bar {} (menu {name: file} (action {name: open}) (action {name: quit, text: "&Quit"}))))"#
//! );
//! ```

use std::num::NonZeroUsize;

use super::merge_point::MergePoint;
use super::node::Descriptor;
use crate::properties::{Properties, NAME_KEY};
use crate::symbol::Symbol;
use crate::value::Value;

/// Conversion of DSL arguments into a property map.
pub trait IntoProperties {
    fn into_properties(self) -> Properties;
}

impl IntoProperties for () {
    fn into_properties(self) -> Properties {
        Properties::new()
    }
}

impl IntoProperties for Properties {
    fn into_properties(self) -> Properties {
        self
    }
}

/// Values accepted as a node name.
pub trait IntoName {
    fn into_name(self) -> Value;
}

impl IntoName for &str {
    fn into_name(self) -> Value {
        Value::Symbol(Symbol::from(self))
    }
}

impl IntoName for String {
    fn into_name(self) -> Value {
        Value::Symbol(Symbol::from(self))
    }
}

impl IntoName for Symbol {
    fn into_name(self) -> Value {
        Value::Symbol(self)
    }
}

impl IntoName for Value {
    fn into_name(self) -> Value {
        self
    }
}

impl IntoName for i64 {
    fn into_name(self) -> Value {
        Value::Int(self)
    }
}

macro_rules! name_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoProperties for $ty {
                fn into_properties(self) -> Properties {
                    Properties::named(self.into_name())
                }
            }

            impl IntoProperties for ($ty, Properties) {
                fn into_properties(self) -> Properties {
                    let (name, mut props) = self;
                    props.insert(NAME_KEY, name.into_name());
                    props
                }
            }
        )*
    };
}

name_args!(&str, String, Symbol, Value, i64);

/// A construction scope bound to one descriptor.
pub struct Builder<'a> {
    desc: &'a mut Descriptor,
}

impl<'a> Builder<'a> {
    /// Bind a builder to `desc`.
    pub fn new(desc: &'a mut Descriptor) -> Self {
        Self { desc }
    }

    /// Add a leaf child.
    pub fn node(&mut self, tag: impl Into<Symbol>, args: impl IntoProperties) -> &mut Self {
        self.desc
            .add_child(Descriptor::new(tag, args.into_properties()));
        self
    }

    /// Add a child and populate it through `block`.
    ///
    /// The child is appended after `block` returns, so merge points registered
    /// inside the block count only the child's own children.
    pub fn node_with<F>(&mut self, tag: impl Into<Symbol>, args: impl IntoProperties, block: F) -> &mut Self
    where
        F: FnOnce(&mut Builder<'_>),
    {
        let mut child = Descriptor::new(tag, args.into_properties());
        block(&mut Builder::new(&mut child));
        self.desc.add_child(child);
        self
    }

    /// Register an unlimited merge point after the children added so far.
    pub fn merge_point(&mut self) -> &mut Self {
        let position = self.desc.children().len();
        self.desc.push_merge_point(MergePoint::unlimited(position));
        self
    }

    /// Register a merge point accepting at most `count` children.
    pub fn merge_point_capped(&mut self, count: NonZeroUsize) -> &mut Self {
        let position = self.desc.children().len();
        self.desc.push_merge_point(MergePoint::limited(position, count));
        self
    }

    /// The node this builder is bound to.
    pub fn descriptor(&self) -> &Descriptor {
        self.desc
    }
}

impl Descriptor {
    /// Build a tree: create the root and run `block` with a builder bound to it.
    pub fn build<F>(tag: impl Into<Symbol>, args: impl IntoProperties, block: F) -> Self
    where
        F: FnOnce(&mut Builder<'_>),
    {
        let mut root = Descriptor::new(tag, args.into_properties());
        block(&mut Builder::new(&mut root));
        root
    }

    /// Build a childless root.
    pub fn leaf(tag: impl Into<Symbol>, args: impl IntoProperties) -> Self {
        Descriptor::new(tag, args.into_properties())
    }
}
