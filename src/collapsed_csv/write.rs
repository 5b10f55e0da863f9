use {
    crate::flatten_value::{Flat, FlatMap, FlatValue, flatten::flatten},
    itertools::Itertools,
    serde::Serialize,
    serde_json::Value,
    std::{fmt::Debug, io::Write, marker::PhantomData},
    tap::Pipe,
};

pub struct CollapsedCsvWriter<W: Write, T: Serialize + Debug> {
    writer: csv::Writer<W>,
    headers: Option<Vec<String>>,
    count: usize,
    _marker: PhantomData<T>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not convert into inner error:\n{0}")]
    IntoInner(Box<str>),
    #[error("Could not serialize the struct to value")]
    SerializingToValue(#[source] serde_json::Error),
    #[error("Record #{idx} could not be collapsed")]
    Collapsing {
        idx: usize,
        #[source]
        source: crate::flatten_value::flatten::Error,
    },
    #[error("Record #{idx} collapsed into a sequence, expected a map")]
    NotARecord { idx: usize },
    #[error("Could not render sequence cell '{key}'")]
    RenderingSequence {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Flushing the underlying writer")]
    Flushing(#[source] std::io::Error),
    #[error("Could not write headers")]
    WritingHeaders(#[source] csv::Error),
    #[error("Writing record #{idx}")]
    WritingRecord {
        idx: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Record #{idx} has keys missing from the headers line: {}", .extra_keys.iter().join(", "))]
    ExtraKeysComparedToHeaders { idx: usize, extra_keys: Vec<String> },
}

type Result<T> = std::result::Result<T, self::Error>;

#[extension_traits::extension(pub trait CsvWriterEnableCollapseExt)]
impl<W: Write> csv::Writer<W> {
    fn enable_collapse<T: Serialize + Debug>(self) -> CollapsedCsvWriter<W, T> {
        CollapsedCsvWriter::new(self)
    }
}

/// Text of a single cell. `null` is an empty cell, sequences are compact json arrays.
fn render_cell(key: &str, value: FlatValue) -> Result<String> {
    match value {
        FlatValue::Scalar(scalar) => match scalar.into_inner() {
            Value::Null => String::new().pipe(Ok),
            Value::String(v) => Ok(v),
            other => other.to_string().pipe(Ok),
        },
        FlatValue::Sequence(sequence) => serde_json::to_string(&sequence).map_err(|source| self::Error::RenderingSequence {
            key: key.to_string(),
            source,
        }),
    }
}

impl<W, T> CollapsedCsvWriter<W, T>
where
    W: Write,
    T: Serialize + Debug,
{
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| self::Error::IntoInner(format!("{e:#?}").pipe(Box::from)))
    }

    pub fn new(writer: csv::Writer<W>) -> Self {
        Self {
            writer,
            count: 0usize,
            headers: None,
            _marker: PhantomData,
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn collapse(&self, item: &T) -> Result<FlatMap> {
        let idx = self.count;
        serde_json::to_value(item)
            .map_err(self::Error::SerializingToValue)
            .and_then(|value| flatten(value).map_err(|source| self::Error::Collapsing { idx, source }))
            .and_then(|flat| match flat {
                Flat::Map(map) => Ok(map),
                Flat::Sequence(_) => Err(self::Error::NotARecord { idx }),
            })
    }

    pub fn serialize(&mut self, item: &T) -> Result<()> {
        self.collapse(item).and_then(|mut record| -> Result<_> {
            let idx = self.count;
            if self.headers.is_none() {
                let headers = record.keys().cloned().collect::<Vec<_>>();
                self.writer
                    .write_record(&headers)
                    .map_err(self::Error::WritingHeaders)?;
                self.headers = Some(headers);
            }
            let row = self
                .headers
                .iter()
                .flatten()
                .map(|header| {
                    record
                        .remove(header)
                        .map(|value| render_cell(header, value))
                        .unwrap_or_else(|| Ok(String::new()))
                })
                .collect::<Result<Vec<_>>>()?;
            (match record.is_empty() {
                true => Ok(row),
                false => Err(self::Error::ExtraKeysComparedToHeaders {
                    idx,
                    extra_keys: record.keys().cloned().collect(),
                }),
            })
            .and_then(|row| {
                self.writer
                    .write_record(&row)
                    .map_err(|source| self::Error::WritingRecord { idx, source })
            })
            .map(|()| self.count += 1)
        })
    }
}

/// Writes every item as one collapsed csv row, headers taken from the first item.
pub fn write_collapsed_csv<'a, W, T>(writer: &mut W, items: impl IntoIterator<Item = &'a T>) -> Result<usize>
where
    W: Write,
    T: Serialize + Debug + 'a,
{
    CollapsedCsvWriter::<_, T>::new(csv::WriterBuilder::new().from_writer(writer)).pipe(|mut w| {
        items
            .into_iter()
            .try_for_each(|item| w.serialize(item))
            .and_then(|()| w.flush().map_err(self::Error::Flushing))
            .map(|()| w.count)
    })
}
