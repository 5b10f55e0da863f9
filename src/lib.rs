pub mod collapsed_csv;
pub mod flatten_value;

pub use flatten_value::{
    Flat, FlatMap, FlatSequence, FlatValue,
    flatten::{Error, ValueFlattenExt, flatten},
};

/// Serializes the wrapped value in its collapsed, single level form.
#[derive(Debug)]
pub struct Collapsed<T>(pub T);

#[derive(Debug)]
pub struct CollapsedRef<'a, T>(pub &'a T);

impl<T> Collapsed<T> {
    pub fn as_ref(&self) -> CollapsedRef<'_, T> {
        CollapsedRef(&self.0)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

mod serde;

#[cfg(test)]
mod test;
