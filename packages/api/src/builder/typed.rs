//! Terminal methods mapping each match onto a `Deserialize` type

use std::iter::FusedIterator;
use std::marker::PhantomData;

use futures::{Stream, StreamExt};
use jsonreader_core::{ExtractedValue, JsonReaderError, SpanReader, StageState};
use serde::de::DeserializeOwned;

use super::core::SelectBuilder;

/// Typed view over a [`SpanReader`]
///
/// A value that does not fit `T` yields a `Deserialization` error for that
/// item only; reading continues with the next match.
#[derive(Debug)]
pub struct TypedReader<S, E, T> {
    inner: SpanReader<S, E>,
    _target: PhantomData<fn() -> T>,
}

impl<S, E, T> TypedReader<S, E, T> {
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    #[must_use]
    pub fn state(&self) -> StageState {
        self.inner.state()
    }

    /// Underlying byte reader
    #[must_use]
    pub fn into_inner(self) -> SpanReader<S, E> {
        self.inner
    }
}

impl<S, B, E, T> Iterator for TypedReader<S, E, T>
where
    S: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
    T: DeserializeOwned,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next_value()
            .map(|value| value.and_then(|value| decode(&value)))
    }
}

impl<S, B, E, T> FusedIterator for TypedReader<S, E, T>
where
    S: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
    T: DeserializeOwned,
{
}

fn decode<T, E>(value: &ExtractedValue) -> Result<T, E>
where
    T: DeserializeOwned,
    E: From<JsonReaderError>,
{
    value.deserialize::<T>().map_err(|error| {
        log::debug!("match at offset {} does not fit the target type", value.offset());
        E::from(error)
    })
}

impl SelectBuilder {
    /// Read matches from a blocking source and deserialize each into `T`
    ///
    /// # Examples
    /// ```
    /// use jsonreader::{JsonReader, JsonReaderError};
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize, PartialEq)]
    /// struct Doc {
    ///     name: String,
    /// }
    ///
    /// let body = br#"{"rows":[{"doc":{"name":"a"}},{"doc":{"name":"b"}}]}"#;
    /// let docs: Vec<Doc> = JsonReader::select("$.rows[*].doc")?
    ///     .deserialize(body.chunks(5).map(Ok::<_, JsonReaderError>))?
    ///     .collect::<Result<_, _>>()?;
    /// assert_eq!(docs[1], Doc { name: "b".into() });
    /// # Ok::<(), JsonReaderError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if the configured limits are invalid.
    pub fn deserialize<T, I, B, E>(
        self,
        chunks: I,
    ) -> Result<TypedReader<I::IntoIter, E, T>, JsonReaderError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: From<JsonReaderError>,
    {
        Ok(TypedReader {
            inner: self.read_chunks(chunks)?,
            _target: PhantomData,
        })
    }

    /// Read matches from an async stream and deserialize each into `T`
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if the configured limits are invalid.
    pub fn deserialize_stream<T, S, B, E>(
        self,
        stream: S,
    ) -> Result<impl Stream<Item = Result<T, E>>, JsonReaderError>
    where
        T: DeserializeOwned,
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: From<JsonReaderError>,
    {
        Ok(self
            .read_stream(stream)?
            .map(|value| value.and_then(|value| decode(&value))))
    }
}
