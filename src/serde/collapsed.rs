use {
    crate::{Collapsed, CollapsedRef, flatten_value::flatten::flatten},
    serde::Serialize,
    tracing::instrument,
};

impl<T> Serialize for Collapsed<T>
where
    T: Serialize,
{
    #[instrument(skip_all)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_ref().serialize(serializer)
    }
}

impl<T> Serialize for CollapsedRef<'_, T>
where
    T: Serialize,
{
    #[instrument(skip_all, fields(ty = std::any::type_name::<T>()))]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_json::to_value(self.0)
            .map_err(serde::ser::Error::custom)
            .and_then(|value| flatten(value).map_err(serde::ser::Error::custom))
            .and_then(|flat| flat.serialize(serializer))
    }
}
