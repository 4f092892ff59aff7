use indexmap::IndexMap;
use std::fmt;

/// A literal value, as found in default values and directive arguments.
///
/// Equality is structural: two values written differently in the source (quoting style, object
/// field order) compare equal when they denote the same value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Enum(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The GraphQL name of the kind of literal, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Enum(e) => f.write_str(e),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_equality_ignores_field_order() {
        let a = Value::Object(IndexMap::from([
            ("lang".to_owned(), Value::String("en".to_owned())),
            ("fallback".to_owned(), Value::Boolean(true)),
        ]));
        let b = Value::Object(IndexMap::from([
            ("fallback".to_owned(), Value::Boolean(true)),
            ("lang".to_owned(), Value::String("en".to_owned())),
        ]));

        assert_eq!(a, b);
        assert_ne!(a, Value::Object(IndexMap::new()));
    }

    #[test]
    fn display() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Enum("RED".to_owned()),
            Value::String("en".to_owned()),
            Value::Null,
        ]);

        assert_eq!(value.to_string(), r#"[1, RED, "en", null]"#);
    }
}
