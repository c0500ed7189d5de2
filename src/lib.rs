//! # graft
//!
//! Declarative descriptor trees that merge structurally.
//!
//! A descriptor is a labeled rose tree: every node has a tag, a property map,
//! and ordered children. Trees are written with a small builder DSL (or the
//! `descriptor!` macro), and independently authored fragments, such as a base
//! menu and a plugin's additions to it, are merged into one tree by matching
//! nodes on tag and `name`. Merge points let the author of a tree decide where
//! unmatched fragments are inserted.
//!
//! ```
//! use graft::Descriptor;
//!
//! let mut base = Descriptor::build("gui", (), |g| {
//!     g.node_with("menu", "file", |m| {
//!         m.node("action", "open");
//!         m.merge_point();
//!         m.node("action", "quit");
//!     });
//! });
//! let plugin = Descriptor::build("gui", (), |g| {
//!     g.node_with("menu", "file", |m| {
//!         m.node("action", "export");
//!     });
//! });
//!
//! assert!(base.merge(&plugin));
//! assert_eq!(
//!     base.to_string(),
//!     "(gui {} (menu {name: file} (action {name: open}) (action {name: export}) (action {name: quit})))"
//! );
//! ```
//!
//! ## Core Systems
//!
//! - **[`descriptor`]** — Nodes, merge points, builder DSL, merge engine, traversal
//! - **[`sexp`]** — Canonical text form: printer, logos tokenizer, parser
//! - **[`properties`]** / **[`value`]** / **[`symbol`]** — Node payload types
//! - **[`factory`]** — Constructor callables carried as property values

// Payload
pub mod symbol;
pub mod value;
pub mod properties;
pub mod factory;

// Trees
pub mod descriptor;

// Text form
pub mod sexp;

pub use descriptor::{
    Budget, Builder, Descriptor, IntoName, IntoProperties, MergeConfig, MergePoint,
    MergePointError, MergePointList,
};
pub use factory::Factory;
pub use properties::{Properties, GROUP_KEY, GROUP_TAG, NAME_KEY};
pub use sexp::ParseError;
pub use symbol::Symbol;
pub use value::{Handle, Value};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use graft_macros::descriptor;
