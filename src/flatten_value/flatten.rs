use {
    super::{Classified, Flat, FlatMap, FlatSequence, FlatValue, classify, kind_of},
    serde_json::{Map, Value},
    tap::Pipe,
    tracing::instrument,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported input: expected a map or a sequence at the top level, found {kind} `{value}`")]
    UnsupportedInput { kind: &'static str, value: Value },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Collapses `value` into a single level.
///
/// Maps nested in maps give up their own key and lift their entries to the top, a later entry replacing an
/// earlier one with the same key. Sequences nested in sequences are spliced in order. A sequence under a map key
/// stays under that key, flattened. A map inside a sequence contributes its flattened values, in key order.
///
/// Fails only when `value` itself is a scalar (`null` included).
#[instrument(skip_all, fields(kind = ?kind_of(&value)))]
pub fn flatten(value: Value) -> Result<Flat> {
    match classify(value) {
        Classified::Map(map) => flatten_map(map).pipe(Flat::Map).pipe(Ok),
        Classified::Sequence(values) => flatten_sequence(values).pipe(Flat::Sequence).pipe(Ok),
        Classified::Scalar(scalar) => {
            tracing::debug!(?scalar, "rejecting top level scalar");
            Err(self::Error::UnsupportedInput {
                kind: scalar.type_name(),
                value: scalar.into_inner(),
            })
        }
    }
}

pub fn flatten_map(map: Map<String, Value>) -> FlatMap {
    map.into_iter().fold(FlatMap::default(), |mut out, (key, value)| {
        match classify(value) {
            Classified::Map(nested) => flatten_map(nested).into_iter().for_each(|(key, value)| {
                if out.overwrite(key, value).is_some() {
                    tracing::trace!("nested entry replaced an earlier value");
                }
            }),
            Classified::Sequence(values) => {
                out.overwrite(key, flatten_sequence(values).pipe(FlatValue::Sequence));
            }
            Classified::Scalar(scalar) => {
                out.overwrite(key, FlatValue::Scalar(scalar));
            }
        }
        out
    })
}

pub fn flatten_sequence(values: Vec<Value>) -> FlatSequence {
    values.into_iter().fold(FlatSequence::default(), |mut out, value| {
        match classify(value) {
            Classified::Sequence(nested) => out.extend(flatten_sequence(nested)),
            // a sequence-valued property lands here as one nested element
            Classified::Map(map) => out.extend(flatten_map(map).into_values()),
            Classified::Scalar(scalar) => out.push(FlatValue::Scalar(scalar)),
        }
        out
    })
}

#[extension_traits::extension(pub trait ValueFlattenExt)]
impl Value {
    fn flattened(self) -> Result<Flat> {
        flatten(self)
    }
}
