//! Human-readable and raw string forms of output values.
//!
//! Human formatting is driven by the declared type so that a list reads as
//! `tolist([...])` and a map as `tomap({...})`, while tuples and objects use
//! bare brackets. When the declared type doesn't fit the value's shape (or is
//! `dynamic`), the shape wins.

use serde_json::{Map, Value};

use crate::error::RawValueError;
use crate::value::ValueType;

static DYNAMIC: ValueType = ValueType::Dynamic;

/// Formats `value` for display, indenting nested lines relative to `indent`.
pub fn format_value(value: &Value, ty: &ValueType, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format_string(s, indent),
        Value::Array(items) => match ty {
            ValueType::List(elem) => sequence(items.iter().map(|v| (v, &**elem)), indent, "tolist("),
            ValueType::Set(elem) => sequence(items.iter().map(|v| (v, &**elem)), indent, "toset("),
            ValueType::Tuple(types) => sequence(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (v, types.get(i).unwrap_or(&DYNAMIC))),
                indent,
                "",
            ),
            _ => sequence(items.iter().map(|v| (v, &DYNAMIC)), indent, ""),
        },
        Value::Object(map) => match ty {
            ValueType::Map(elem) => mapping(map, |_| &**elem, quote, indent, "tomap("),
            ValueType::Object(attrs) => mapping(
                map,
                |key| attrs.get(key).unwrap_or(&DYNAMIC),
                attribute_name,
                indent,
                "",
            ),
            _ => mapping(map, |_| &DYNAMIC, attribute_name, indent, ""),
        },
    }
}

/// Converts a primitive value to the bare string printed by `-raw`.
pub fn raw_string(value: &Value, ty: &ValueType) -> Result<String, RawValueError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(RawValueError::Null),
        Value::Array(_) => Err(RawValueError::Unsupported(match ty {
            ValueType::List(_) | ValueType::Set(_) | ValueType::Tuple(_) => ty.friendly_name(),
            _ => "tuple".to_string(),
        })),
        Value::Object(_) => Err(RawValueError::Unsupported(match ty {
            ValueType::Map(_) | ValueType::Object(_) => ty.friendly_name(),
            _ => "object".to_string(),
        })),
    }
}

fn suffix_for(prefix: &str) -> &'static str {
    if prefix.is_empty() {
        ""
    } else {
        ")"
    }
}

fn sequence<'a>(
    elements: impl ExactSizeIterator<Item = (&'a Value, &'a ValueType)>,
    indent: usize,
    prefix: &str,
) -> String {
    let suffix = suffix_for(prefix);
    if elements.len() == 0 {
        return format!("{prefix}[]{suffix}");
    }
    let pad = " ".repeat(indent + 2);
    let mut out = format!("{prefix}[\n");
    for (value, ty) in elements {
        out.push_str(&pad);
        out.push_str(&format_value(value, ty, indent + 2));
        out.push_str(",\n");
    }
    out.push_str(&" ".repeat(indent));
    out.push(']');
    out.push_str(suffix);
    out
}

fn mapping<'a>(
    map: &'a Map<String, Value>,
    type_of: impl Fn(&str) -> &'a ValueType,
    key_text: fn(&str) -> String,
    indent: usize,
    prefix: &str,
) -> String {
    let suffix = suffix_for(prefix);
    if map.is_empty() {
        return format!("{prefix}{{}}{suffix}");
    }
    let pad = " ".repeat(indent + 2);
    let mut out = format!("{prefix}{{\n");
    // serde_json's default map is ordered by key.
    for (key, value) in map {
        out.push_str(&pad);
        out.push_str(&key_text(key));
        out.push_str(" = ");
        out.push_str(&format_value(value, type_of(key), indent + 2));
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push('}');
    out.push_str(suffix);
    out
}

fn format_string(s: &str, indent: usize) -> String {
    match s.strip_suffix('\n') {
        Some(body) if !body.is_empty() => heredoc(body, indent),
        _ => quote(s),
    }
}

fn heredoc(body: &str, indent: usize) -> String {
    let mut delimiter = String::from("EOT");
    while body.lines().any(|line| line.trim() == delimiter) {
        delimiter.push('_');
    }
    if indent == 0 {
        return format!("<<{delimiter}\n{body}\n{delimiter}");
    }
    let pad = " ".repeat(indent + 2);
    let mut out = format!("<<-{delimiter}\n");
    for line in body.split('\n') {
        if !line.is_empty() {
            out.push_str(&pad);
        }
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&" ".repeat(indent));
    out.push_str(&delimiter);
    out
}

fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

fn attribute_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
