//! Canonical printer: `(tag {key: value, ...} child ...)`.
//!
//! Keys come out sorted, so two structurally equal trees always print the same
//! text. Merge points are bookkeeping and are never printed.

use std::fmt::{self, Write};

use crate::descriptor::Descriptor;
use crate::properties::Properties;
use crate::symbol::Symbol;
use crate::value::Value;

impl Descriptor {
    /// The canonical text of this tree. Same as `to_string()`.
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        write_symbol(f, self.tag())?;
        f.write_char(' ')?;
        write_map(f, self.properties())?;
        for child in self.children() {
            write!(f, " {child}")?;
        }
        f.write_char(')')
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps a fractional part or exponent: `2.0`, `1e20`.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write_symbol(f, s),
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Map(map) => write_map(f, map),
            Value::Handle(handle) => write!(f, "#<{}>", handle.label()),
        }
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_map(f, self)
    }
}

fn write_symbol(f: &mut fmt::Formatter<'_>, symbol: &Symbol) -> fmt::Result {
    if symbol.is_bare() {
        f.write_str(symbol.as_str())
    } else {
        write!(f, ":{:?}", symbol.as_str())
    }
}

fn write_map(f: &mut fmt::Formatter<'_>, map: &Properties) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_symbol(f, key)?;
        write!(f, ": {value}")?;
    }
    f.write_char('}')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::props;
    use crate::value::Handle;

    #[test]
    fn simple() {
        let desc = Descriptor::new("hello", props! { foo: 42 });
        assert_eq!(desc.to_canonical_string(), "(hello {foo: 42})");
    }

    #[test]
    fn hierarchical() {
        let mut parent = Descriptor::new("parent", props! { foo: 42 });
        parent.add_child(Descriptor::new("child", Properties::new()));
        assert_eq!(parent.to_string(), "(parent {foo: 42} (child {}))");
    }

    #[test]
    fn keys_are_sorted() {
        let desc = Descriptor::new("action", props! { text: "Open", name: Symbol::from("open"), checkable: true });
        assert_eq!(
            desc.to_string(),
            r#"(action {checkable: true, name: open, text: "Open"})"#
        );
    }

    #[test]
    fn scalar_values() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(Value::from("say \"hi\"\n").to_string(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn non_bare_symbols_are_quoted() {
        assert_eq!(Value::from(Symbol::from("Recent Files")).to_string(), r#":"Recent Files""#);
        assert_eq!(Value::from(Symbol::from("true")).to_string(), r#":"true""#);
        let desc = Descriptor::new("my tag", Properties::new());
        assert_eq!(desc.to_string(), r#"(:"my tag" {})"#);
    }

    #[test]
    fn nested_values() {
        let value = Value::from(props! { size: vec![640, 480], title: "Main" });
        assert_eq!(value.to_string(), r#"{size: [640, 480], title: "Main"}"#);
        assert_eq!(Value::List(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn handles_show_label() {
        let value = Value::from(Handle::new("Button", ()));
        assert_eq!(value.to_string(), "#<Button>");
    }

    #[test]
    fn merge_points_are_not_printed() {
        let desc = Descriptor::build("menu", "file", |m| {
            m.node("action", "open");
            m.merge_point();
        });
        assert_eq!(desc.to_string(), "(menu {name: file} (action {name: open}))");
    }
}
