//! Typed output values as recorded in a state document.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeParseError;

/// Output values keyed by name, iterated in name order.
pub type Outputs = BTreeMap<String, OutputValue>;

/// One root-module output value.
///
/// Field order matches the JSON rendering: `sensitive`, `type`, `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    /// Whether the value was declared sensitive.
    #[serde(default)]
    pub sensitive: bool,
    /// The declared type of the value.
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// The value itself.
    pub value: Value,
}

impl OutputValue {
    /// Creates a non-sensitive output value.
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            sensitive: false,
            value_type,
            value,
        }
    }

    /// Marks the value as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// A declared value type.
///
/// In a state document a primitive type is written as its name (`"string"`)
/// and a structural type as a two-element array, e.g. `["list", "string"]`,
/// `["tuple", ["string", "number"]]`, `["object", {"id": "string"}]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ValueType {
    /// A Unicode string.
    String,
    /// An arbitrary-precision number.
    Number,
    /// `true` or `false`.
    Bool,
    /// Any type; formatting follows the value's own shape.
    #[default]
    Dynamic,
    /// An ordered sequence of one element type.
    List(Box<ValueType>),
    /// An unordered collection of unique elements of one type.
    Set(Box<ValueType>),
    /// String-keyed elements of one type.
    Map(Box<ValueType>),
    /// A fixed-length sequence with a type per position.
    Tuple(Vec<ValueType>),
    /// A fixed set of named attributes with a type each.
    Object(BTreeMap<String, ValueType>),
}

impl ValueType {
    /// A short human description, e.g. `"list of string"`.
    pub fn friendly_name(&self) -> String {
        match self {
            ValueType::String => "string".to_string(),
            ValueType::Number => "number".to_string(),
            ValueType::Bool => "bool".to_string(),
            ValueType::Dynamic => "dynamic".to_string(),
            ValueType::List(elem) => format!("list of {}", elem.friendly_name()),
            ValueType::Set(elem) => format!("set of {}", elem.friendly_name()),
            ValueType::Map(elem) => format!("map of {}", elem.friendly_name()),
            ValueType::Tuple(_) => "tuple".to_string(),
            ValueType::Object(_) => "object".to_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly_name())
    }
}

impl TryFrom<Value> for ValueType {
    type Error = TypeParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ValueType::try_from(&value)
    }
}

impl TryFrom<&Value> for ValueType {
    type Error = TypeParseError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => match name.as_str() {
                "string" => Ok(ValueType::String),
                "number" => Ok(ValueType::Number),
                "bool" => Ok(ValueType::Bool),
                "dynamic" => Ok(ValueType::Dynamic),
                other => Err(TypeParseError(format!("unknown primitive type {other:?}"))),
            },
            // Objects may carry a third element listing optional attributes.
            Value::Array(parts) if parts.len() == 2 || parts.len() == 3 => {
                let kind = parts[0]
                    .as_str()
                    .ok_or_else(|| TypeParseError(format!("type kind must be a string: {value}")))?;
                let arg = &parts[1];
                match (kind, parts.len()) {
                    ("list", 2) => Ok(ValueType::List(Box::new(arg.try_into()?))),
                    ("set", 2) => Ok(ValueType::Set(Box::new(arg.try_into()?))),
                    ("map", 2) => Ok(ValueType::Map(Box::new(arg.try_into()?))),
                    ("tuple", 2) => {
                        let elems = arg.as_array().ok_or_else(|| {
                            TypeParseError(format!("tuple element types must be an array: {arg}"))
                        })?;
                        elems
                            .iter()
                            .map(ValueType::try_from)
                            .collect::<Result<_, _>>()
                            .map(ValueType::Tuple)
                    }
                    ("object", _) => {
                        let attrs = arg.as_object().ok_or_else(|| {
                            TypeParseError(format!("object attribute types must be an object: {arg}"))
                        })?;
                        attrs
                            .iter()
                            .map(|(name, ty)| ValueType::try_from(ty).map(|ty| (name.clone(), ty)))
                            .collect::<Result<_, _>>()
                            .map(ValueType::Object)
                    }
                    _ => Err(TypeParseError(format!("unknown type kind {kind:?}"))),
                }
            }
            other => Err(TypeParseError(other.to_string())),
        }
    }
}

impl From<ValueType> for Value {
    fn from(ty: ValueType) -> Self {
        match ty {
            ValueType::String => Value::from("string"),
            ValueType::Number => Value::from("number"),
            ValueType::Bool => Value::from("bool"),
            ValueType::Dynamic => Value::from("dynamic"),
            ValueType::List(elem) => Value::Array(vec!["list".into(), (*elem).into()]),
            ValueType::Set(elem) => Value::Array(vec!["set".into(), (*elem).into()]),
            ValueType::Map(elem) => Value::Array(vec!["map".into(), (*elem).into()]),
            ValueType::Tuple(elems) => Value::Array(vec![
                "tuple".into(),
                Value::Array(elems.into_iter().map(Value::from).collect()),
            ]),
            ValueType::Object(attrs) => Value::Array(vec![
                "object".into(),
                Value::Object(
                    attrs
                        .into_iter()
                        .map(|(name, ty)| (name, Value::from(ty)))
                        .collect(),
                ),
            ]),
        }
    }
}
