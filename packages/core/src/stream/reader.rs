//! Pull-based reader over a synchronous chunk source

use std::iter::FusedIterator;
use std::marker::PhantomData;

use bytes::Bytes;

use super::core::{Progress, StageCore};
use super::state::StageState;
use crate::config::ReaderConfig;
use crate::error::{JsonReaderError, JsonReaderResult};
use crate::extractor::ExtractedValue;
use crate::selector::Selector;
use crate::telemetry::{BufferStats, ReaderStats};

/// Extracts selected values from an iterator of byte chunks
///
/// Each call to [`SpanReader::next_value`] pulls upstream chunks only until
/// one value is complete, so at most one chunk is requested per
/// insufficient-data event. Upstream errors are returned unchanged; reader
/// errors are converted through `E: From<JsonReaderError>`.
///
/// # Examples
///
/// ```
/// use jsonreader_core::{JsonReaderError, ReaderConfig, Selector, SpanReader};
///
/// let chunks = vec![Ok::<_, JsonReaderError>(&br#"{"rows":[{"id"#[..]), Ok(&b":1},{\"id\":2}]}"[..])];
/// let selector = Selector::parse("$.rows[*].id")?;
/// let reader = SpanReader::new(chunks.into_iter(), selector, ReaderConfig::default())?;
///
/// let ids: Vec<_> = reader.collect::<Result<_, _>>()?;
/// assert_eq!(ids, [&b"1"[..], &b"2"[..]]);
/// # Ok::<(), JsonReaderError>(())
/// ```
#[derive(Debug)]
pub struct SpanReader<S, E> {
    core: StageCore,
    source: Option<S>,
    _error: PhantomData<fn() -> E>,
}

impl<S, B, E> SpanReader<S, E>
where
    S: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
    /// Create a reader over `source`
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if `config` fails validation.
    pub fn new(source: S, selector: Selector, config: ReaderConfig) -> JsonReaderResult<Self> {
        Ok(Self {
            core: StageCore::new(selector, config)?,
            source: Some(source),
            _error: PhantomData,
        })
    }

    /// Pull the next matched value
    ///
    /// Returns `None` once the document completes, after any failure, and
    /// after cancellation.
    pub fn next_value(&mut self) -> Option<Result<ExtractedValue, E>> {
        if self.core.state().is_terminal() {
            return None;
        }

        loop {
            match self.core.advance() {
                Ok(Progress::Emit(value)) => return Some(Ok(value)),
                Ok(Progress::Completed) => {
                    self.source = None;
                    return None;
                }
                Ok(Progress::NeedInput) => {
                    let Some(source) = self.source.as_mut() else {
                        self.core.finish();
                        continue;
                    };
                    match source.next() {
                        Some(Ok(chunk)) => self.core.feed(chunk.as_ref()),
                        Some(Err(error)) => {
                            self.core.fail(&"upstream source failed");
                            self.source = None;
                            return Some(Err(error));
                        }
                        None => {
                            self.source = None;
                            self.core.finish();
                        }
                    }
                }
                Err(error) => {
                    self.core.fail(&error);
                    self.source = None;
                    return Some(Err(E::from(error)));
                }
            }
        }
    }
}

impl<S, E> SpanReader<S, E> {
    /// Stop reading: drops the upstream and all buffered input
    pub fn cancel(&mut self) {
        self.core.cancel();
        self.source = None;
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> StageState {
        self.core.state()
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> ReaderStats {
        self.core.stats()
    }

    #[must_use]
    pub fn buffer_stats(&self) -> BufferStats {
        self.core.buffer_stats()
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.core.selector()
    }
}

impl<S, B, E> Iterator for SpanReader<S, E>
where
    S: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
    type Item = Result<Bytes, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value()
            .map(|result| result.map(ExtractedValue::into_bytes))
    }
}

impl<S, B, E> FusedIterator for SpanReader<S, E>
where
    S: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
}
