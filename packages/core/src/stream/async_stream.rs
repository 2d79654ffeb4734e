//! Async reader over a `futures::Stream` of byte chunks

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;

use super::core::{Progress, StageCore};
use super::state::StageState;
use crate::config::ReaderConfig;
use crate::error::{JsonReaderError, JsonReaderResult};
use crate::extractor::ExtractedValue;
use crate::selector::Selector;
use crate::telemetry::{BufferStats, ReaderStats};

pin_project! {
    /// Extracts selected values from a stream of byte chunks
    ///
    /// Polls the upstream once per insufficient-data event and only while a
    /// value is being demanded. Same error and termination rules as
    /// [`SpanReader`](super::SpanReader).
    #[derive(Debug)]
    #[must_use = "streams do nothing unless polled"]
    pub struct SpanStream<S, E> {
        #[pin]
        source: Option<S>,
        core: StageCore,
        _error: PhantomData<fn() -> E>,
    }
}

impl<S, B, E> SpanStream<S, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
    /// Create a stream over `source`
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if `config` fails validation.
    pub fn new(source: S, selector: Selector, config: ReaderConfig) -> JsonReaderResult<Self> {
        Ok(Self {
            source: Some(source),
            core: StageCore::new(selector, config)?,
            _error: PhantomData,
        })
    }
}

impl<S, E> SpanStream<S, E> {
    /// Stop reading: drops the upstream and all buffered input
    pub fn cancel(self: Pin<&mut Self>) {
        let mut this = self.project();
        this.core.cancel();
        this.source.set(None);
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
}

impl<S, B, E> Stream for SpanStream<S, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
    type Item = Result<ExtractedValue, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if this.core.state().is_terminal() {
            return Poll::Ready(None);
        }

        loop {
            match this.core.advance() {
                Ok(Progress::Emit(value)) => return Poll::Ready(Some(Ok(value))),
                Ok(Progress::Completed) => {
                    this.source.set(None);
                    return Poll::Ready(None);
                }
                Ok(Progress::NeedInput) => {
                    let Some(source) = this.source.as_mut().as_pin_mut() else {
                        this.core.finish();
                        continue;
                    };
                    match source.poll_next(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(Some(Ok(chunk))) => this.core.feed(chunk.as_ref()),
                        Poll::Ready(Some(Err(error))) => {
                            this.core.fail(&"upstream source failed");
                            this.source.set(None);
                            return Poll::Ready(Some(Err(error)));
                        }
                        Poll::Ready(None) => {
                            this.source.set(None);
                            this.core.finish();
                        }
                    }
                }
                Err(error) => {
                    this.core.fail(&error);
                    this.source.set(None);
                    return Poll::Ready(Some(Err(E::from(error))));
                }
            }
        }
    }
}

impl<S, B, E> FusedStream for SpanStream<S, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: From<JsonReaderError>,
{
    fn is_terminated(&self) -> bool {
        self.core.state().is_terminal()
    }
}
