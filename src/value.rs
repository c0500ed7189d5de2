//! Property values: the payload a descriptor carries for its consumer.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::properties::Properties;
use crate::symbol::Symbol;

/// A property value.
///
/// Values are opaque to the merge engine except for equality, which is used
/// to compare the reserved `name` and `group` properties. Equality is
/// reflexive for floats too: `NaN == NaN`, and `0.0 == -0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(Symbol),
    List(Vec<Value>),
    Map(Properties),
    /// Opaque shared payload, e.g. a [`Factory`](crate::factory::Factory).
    Handle(Handle),
}

impl Value {
    /// Whether this value is [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view: integers are widened to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Textual view: both strings and symbols expose their text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Properties> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            Value::Handle(handle) => Some(handle),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // NaN equals NaN so a NaN-named node still matches its own copy.
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<&Symbol> for Value {
    fn from(s: &Symbol) -> Self {
        Value::Symbol(s.clone())
    }
}

impl From<Properties> for Value {
    fn from(map: Properties) -> Self {
        Value::Map(map)
    }
}

impl From<Handle> for Value {
    fn from(handle: Handle) -> Self {
        Value::Handle(handle)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// An opaque, shared payload stored in a property.
///
/// Handles compare by identity: two handles are equal only when they point at
/// the same allocation. Cloning a descriptor clones the handle, not the payload.
#[derive(Clone)]
pub struct Handle {
    label: Symbol,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Handle {
    /// Wrap `payload`, labelled for display purposes.
    pub fn new<T: Any + Send + Sync>(label: impl Into<Symbol>, payload: T) -> Self {
        Self {
            label: label.into(),
            payload: Arc::new(payload),
        }
    }

    /// The display label (rendered as `#<label>`).
    pub fn label(&self) -> &Symbol {
        &self.label
    }

    /// Typed access to the payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Whether both handles share the same payload.
    pub fn same_as(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(#<{}>)", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("Open"), Value::Str("Open".into()));
        assert_eq!(Value::from(Symbol::from("open")), Value::Symbol("open".into()));
        assert_eq!(Value::from(vec![1, 2]), Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(Value::from(None::<i64>), Value::Nil);
    }

    #[test]
    fn string_and_symbol_are_distinct() {
        assert_ne!(Value::from("file"), Value::from(Symbol::from("file")));
        assert_eq!(Value::from("file").as_str(), Some("file"));
        assert_eq!(Value::from(Symbol::from("file")).as_str(), Some("file"));
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_int(), None);
        assert!(Value::Nil.is_nil());
    }

    #[test]
    fn float_equality_is_reflexive() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Float(f64::NAN), Value::Float(1.0));
        assert_ne!(Value::Float(1.0), Value::Int(1));
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = Handle::new("icon", String::from("open.png"));
        let b = Handle::new("icon", String::from("open.png"));
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn handle_downcast() {
        let handle = Handle::new("size", (640u32, 480u32));
        assert_eq!(handle.downcast_ref::<(u32, u32)>(), Some(&(640, 480)));
        assert!(handle.downcast_ref::<String>().is_none());
        assert_eq!(handle.label(), "size");
    }
}
