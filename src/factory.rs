//! Factory: a constructor callable that descriptors can carry as a property.
//!
//! The descriptor core never invokes factories; they are payload for whatever
//! interprets the tree (for example a widget builder that reads a `factory`
//! property instead of mapping the tag to a default type).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::symbol::Symbol;
use crate::value::{Handle, Value};

type Constructor = dyn Fn(&[Value]) -> Box<dyn Any> + Send + Sync;

/// A wrapped constructor with an optional component name.
///
/// When set, the component names what the factory produces, so consumers can
/// treat a factory and a plain type tag uniformly.
///
/// ```
/// use graft::{Factory, Value};
///
/// let factory = Factory::new(|args| Box::new(args.len()) as Box<dyn std::any::Any>)
///     .with_component("counter");
/// let made = factory.create(&[Value::Int(1), Value::Int(2)]);
/// assert_eq!(made.downcast_ref::<usize>(), Some(&2));
/// ```
#[derive(Clone)]
pub struct Factory {
    component: Option<Symbol>,
    constructor: Arc<Constructor>,
}

impl Factory {
    /// Wrap a constructor.
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn(&[Value]) -> Box<dyn Any> + Send + Sync + 'static,
    {
        Self {
            component: None,
            constructor: Arc::new(constructor),
        }
    }

    /// Name the component this factory produces (builder).
    pub fn with_component(mut self, component: impl Into<Symbol>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn component(&self) -> Option<&Symbol> {
        self.component.as_ref()
    }

    /// Invoke the wrapped constructor.
    pub fn create(&self, args: &[Value]) -> Box<dyn Any> {
        (self.constructor)(args)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

/// Factories are stored as handles labelled with their component name.
impl From<Factory> for Value {
    fn from(factory: Factory) -> Self {
        let label = factory
            .component
            .clone()
            .unwrap_or_else(|| Symbol::from("factory"));
        Value::Handle(Handle::new(label, factory))
    }
}
