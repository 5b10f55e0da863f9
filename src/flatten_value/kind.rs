use {
    serde::Serialize,
    serde_json::{Map, Value},
};

/// Structural category of a [`Value`]. Every value belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Map,
    Sequence,
    Scalar,
}

pub fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Object(_) => ValueKind::Map,
        Value::Array(_) => ValueKind::Sequence,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueKind::Scalar,
    }
}

/// A [`Value`] split by its [`ValueKind`], owning the payload of that variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Map(Map<String, Value>),
    Sequence(Vec<Value>),
    Scalar(Scalar),
}

impl Classified {
    pub fn kind(&self) -> ValueKind {
        match self {
            Classified::Map(_) => ValueKind::Map,
            Classified::Sequence(_) => ValueKind::Sequence,
            Classified::Scalar(_) => ValueKind::Scalar,
        }
    }
}

pub fn classify(value: Value) -> Classified {
    match value {
        Value::Object(map) => Classified::Map(map),
        Value::Array(values) => Classified::Sequence(values),
        scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => Classified::Scalar(Scalar(scalar)),
    }
}

/// Leaf value: never a map, never a sequence.
///
/// Only [`classify`] hands these out, so holding one proves the wrapped value is not a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(Value);

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl Scalar {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn type_name(&self) -> &'static str {
        match &self.0 {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) | Value::Object(_) => "container",
        }
    }
}

impl From<Scalar> for Value {
    fn from(Scalar(value): Scalar) -> Self {
        value
    }
}
