use {
    indexmap::IndexMap,
    serde::{Serialize, ser::SerializeSeq},
    serde_json::Value,
    tap::Pipe,
};

pub use self::kind::{Classified, Scalar, ValueKind, classify, kind_of};

/// Value stored under a [`FlatMap`] key or inside a [`FlatSequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Scalar(Scalar),
    Sequence(FlatSequence),
}

impl FlatValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FlatValue::Scalar(scalar) => Some(scalar),
            FlatValue::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&FlatSequence> {
        match self {
            FlatValue::Sequence(sequence) => Some(sequence),
            FlatValue::Scalar(_) => None,
        }
    }
}

/// Single-level map. Keys keep the position of their first insertion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatMap(IndexMap<String, FlatValue>);

impl FlatMap {
    /// Stores `value` under `key`, replacing any earlier value for the same key in place.
    pub fn overwrite(&mut self, key: String, value: FlatValue) -> Option<FlatValue> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FlatValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &FlatValue> {
        self.0.values()
    }

    pub fn into_values(self) -> impl Iterator<Item = FlatValue> {
        self.0.into_values()
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<FlatValue> {
        self.0.shift_remove(key)
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, FlatValue);
    type IntoIter = indexmap::map::IntoIter<String, FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Single-level sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatSequence(Vec<FlatValue>);

impl FlatSequence {
    pub fn push(&mut self, value: FlatValue) {
        self.0.push(value)
    }

    pub fn get(&self, idx: usize) -> Option<&FlatValue> {
        self.0.get(idx)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatValue> {
        self.0.iter()
    }
}

impl Extend<FlatValue> for FlatSequence {
    fn extend<I: IntoIterator<Item = FlatValue>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl FromIterator<FlatValue> for FlatSequence {
    fn from_iter<I: IntoIterator<Item = FlatValue>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().pipe(FlatSequence)
    }
}

impl IntoIterator for FlatSequence {
    type Item = FlatValue;
    type IntoIter = std::vec::IntoIter<FlatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of [`flatten::flatten`], shaped like its top-level input.
#[derive(Debug, Clone, PartialEq)]
pub enum Flat {
    Map(FlatMap),
    Sequence(FlatSequence),
}

impl Flat {
    pub fn kind(&self) -> ValueKind {
        match self {
            Flat::Map(_) => ValueKind::Map,
            Flat::Sequence(_) => ValueKind::Sequence,
        }
    }

    pub fn as_map(&self) -> Option<&FlatMap> {
        match self {
            Flat::Map(map) => Some(map),
            Flat::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&FlatSequence> {
        match self {
            Flat::Sequence(sequence) => Some(sequence),
            Flat::Map(_) => None,
        }
    }

    pub fn into_map(self) -> Result<FlatMap, Self> {
        match self {
            Flat::Map(map) => Ok(map),
            other => Err(other),
        }
    }

    pub fn into_sequence(self) -> Result<FlatSequence, Self> {
        match self {
            Flat::Sequence(sequence) => Ok(sequence),
            other => Err(other),
        }
    }
}

impl Serialize for FlatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FlatValue::Scalar(scalar) => scalar.serialize(serializer),
            FlatValue::Sequence(sequence) => sequence.serialize(serializer),
        }
    }
}

impl Serialize for FlatMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl Serialize for FlatSequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_seq(Some(self.0.len())).and_then(|mut seq| {
            self.0
                .iter()
                .try_for_each(|value| seq.serialize_element(value))
                .and_then(|()| seq.end())
        })
    }
}

impl Serialize for Flat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Flat::Map(map) => map.serialize(serializer),
            Flat::Sequence(sequence) => sequence.serialize(serializer),
        }
    }
}

impl From<FlatValue> for Value {
    fn from(value: FlatValue) -> Self {
        match value {
            FlatValue::Scalar(scalar) => scalar.into(),
            FlatValue::Sequence(sequence) => sequence.into(),
        }
    }
}

impl From<FlatSequence> for Value {
    fn from(FlatSequence(values): FlatSequence) -> Self {
        values.into_iter().map(Value::from).collect::<Vec<_>>().pipe(Value::Array)
    }
}

impl From<FlatMap> for Value {
    fn from(FlatMap(map): FlatMap) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect::<serde_json::Map<_, _>>()
            .pipe(Value::Object)
    }
}

impl From<Flat> for Value {
    fn from(flat: Flat) -> Self {
        match flat {
            Flat::Map(map) => map.into(),
            Flat::Sequence(sequence) => sequence.into(),
        }
    }
}

pub mod flatten;
pub mod kind;
