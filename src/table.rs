//! Ordered table values and Lua-table emission.
//!
//! The rhythm engine consumes one structured table per track. The value
//! model is a closed set of tagged kinds; anything outside it (in
//! practice: non-finite numbers) is an explicit serialization error,
//! never a silent stringification.

use indexmap::IndexMap;

use crate::{Error, Result};

/// A serializable table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A finite number.
    Number(f64),
    /// A boolean.
    Boolean(bool),
    /// A text string.
    Text(String),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// A mapping with insertion-ordered keys.
    Mapping(IndexMap<String, Value>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

/// Render a value as a Lua(u) module: `return <value>`.
///
/// Mapping keys that are valid Lua identifiers render bare; all others
/// render as `["key"]`. Nested mappings indent by two spaces per level.
///
/// # Errors
/// Returns [`Error::UnsupportedValue`] for non-finite numbers.
///
/// # Example
/// ```
/// use backbeat::table::{to_lua, Value};
///
/// let value = Value::Sequence(vec![Value::Number(1.0), Value::Text("A4".into())]);
/// assert_eq!(to_lua(&value).unwrap(), "return {1, \"A4\"}\n");
/// ```
pub fn to_lua(value: &Value) -> Result<String> {
    let mut out = String::from("return ");
    write_value(value, 0, &mut out)?;
    out.push('\n');
    Ok(out)
}

fn write_value(value: &Value, depth: usize, out: &mut String) -> Result<()> {
    match value {
        Value::Number(n) => {
            if !n.is_finite() {
                return Err(Error::UnsupportedValue {
                    reason: format!("non-finite number {n}"),
                });
            }
            if n.fract() == 0.0 && n.abs() < 1e15 {
                out.push_str(&format!("{}", *n as i64));
            } else {
                out.push_str(&format!("{n}"));
            }
        }
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Text(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
        Value::Sequence(items) => {
            out.push('{');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(item, depth, out)?;
            }
            out.push('}');
        }
        Value::Mapping(map) => {
            let indent = "  ".repeat(depth + 1);
            out.push_str("{\n");
            for (key, item) in map {
                out.push_str(&indent);
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    out.push_str(&format!("[\"{key}\"]"));
                }
                out.push_str(" = ");
                write_value(item, depth + 1, out)?;
                out.push_str(",\n");
            }
            out.push_str(&"  ".repeat(depth));
            out.push('}');
        }
    }
    Ok(())
}

/// A Lua identifier: letters, digits, underscores, not starting with a
/// digit.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, Value)>) -> Value {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(to_lua(&Value::Number(2.5)).unwrap(), "return 2.5\n");
        assert_eq!(to_lua(&Value::Number(3.0)).unwrap(), "return 3\n");
        assert_eq!(to_lua(&Value::Boolean(true)).unwrap(), "return true\n");
        assert_eq!(to_lua(&"hi".into()).unwrap(), "return \"hi\"\n");
    }

    #[test]
    fn renders_mapping_in_insertion_order() {
        let value = mapping(vec![
            ("tempo", Value::Number(120.0)),
            ("beats", Value::Sequence(vec![Value::Number(0.5)])),
        ]);
        let lua = to_lua(&value).unwrap();
        assert_eq!(lua, "return {\n  tempo = 120,\n  beats = {0.5},\n}\n");
    }

    #[test]
    fn quotes_non_identifier_keys() {
        let value = mapping(vec![("first-beat", Value::Number(1.0))]);
        let lua = to_lua(&value).unwrap();
        assert!(lua.contains("[\"first-beat\"] = 1"));

        let value = mapping(vec![("9lives", Value::Boolean(false))]);
        assert!(to_lua(&value).unwrap().contains("[\"9lives\"]"));
    }

    #[test]
    fn escapes_strings() {
        let lua = to_lua(&Value::Text("say \"hi\"\\".into())).unwrap();
        assert_eq!(lua, "return \"say \\\"hi\\\"\\\\\"\n");
    }

    #[test]
    fn nested_mappings_indent() {
        let inner = mapping(vec![("x", Value::Number(1.0))]);
        let value = mapping(vec![("inner", inner)]);
        let lua = to_lua(&value).unwrap();
        assert_eq!(lua, "return {\n  inner = {\n    x = 1,\n  },\n}\n");
    }

    #[test]
    fn non_finite_numbers_rejected() {
        assert!(to_lua(&Value::Number(f64::NAN)).is_err());
        assert!(to_lua(&Value::Number(f64::INFINITY)).is_err());
        let seq = Value::Sequence(vec![Value::Number(1.0), Value::Number(f64::NEG_INFINITY)]);
        assert!(to_lua(&seq).is_err());
    }

    #[test]
    fn empty_containers_render() {
        assert_eq!(to_lua(&Value::Sequence(vec![])).unwrap(), "return {}\n");
        let empty = Value::Mapping(IndexMap::new());
        assert_eq!(to_lua(&empty).unwrap(), "return {\n}\n");
    }
}
