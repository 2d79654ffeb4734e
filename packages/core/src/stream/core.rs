//! Sans-IO reader stage
//!
//! Owns the buffer, tokenizer, navigator and extractor and drives them one
//! token at a time. It never touches the upstream source; the sync and async
//! adapters feed it chunks whenever it reports [`Progress::NeedInput`].

use std::fmt::Display;

use super::state::StageState;
use crate::buffer::ChunkBuffer;
use crate::config::{ReaderConfig, Validator};
use crate::error::{JsonReaderError, JsonReaderResult};
use crate::extractor::{ExtractedValue, Extractor};
use crate::navigator::{MatchState, Navigator};
use crate::selector::Selector;
use crate::telemetry::{BufferStats, ReaderStats};
use crate::tokenizer::{Step, Tokenizer};

/// Outcome of advancing the stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A matched value is ready for downstream
    Emit(ExtractedValue),
    /// Buffered input is exhausted; feed one more chunk or call `finish`
    NeedInput,
    /// No further values: the root value closed, or the stage already
    /// reached a terminal state (see [`StageCore::state`])
    Completed,
}

/// Extraction pipeline without an upstream
#[derive(Debug)]
pub struct StageCore {
    buffer: ChunkBuffer,
    tokenizer: Tokenizer,
    navigator: Navigator,
    extractor: Extractor,
    config: ReaderConfig,
    stats: ReaderStats,
    state: StageState,
    input_ended: bool,
}

impl StageCore {
    /// Create a stage for `selector`
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if `config` fails validation.
    pub fn new(selector: Selector, config: ReaderConfig) -> JsonReaderResult<Self> {
        config.validate()?;
        log::debug!("reader stage created for selector {selector}");

        Ok(Self {
            buffer: ChunkBuffer::with_capacity(config.initial_buffer_capacity),
            tokenizer: Tokenizer::new(),
            navigator: Navigator::new(selector, config.max_depth),
            extractor: Extractor::new(),
            config,
            stats: ReaderStats::default(),
            state: StageState::AwaitingDemand,
            input_ended: false,
        })
    }

    /// Append one upstream chunk
    ///
    /// Ignored once the stage is terminal.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.state.is_terminal() {
            return;
        }
        debug_assert!(!self.input_ended, "chunk fed after end of input");
        self.stats.chunks_received += 1;
        self.stats.bytes_received += chunk.len() as u64;
        self.buffer.append(chunk);
        self.transition(StageState::Emitting);
    }

    /// Mark the end of upstream input
    pub fn finish(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.input_ended = true;
        self.transition(StageState::Emitting);
    }

    /// Run the pipeline until a value is ready, more input is needed, or the document ends
    ///
    /// # Errors
    /// Structural, truncation and limit errors. The caller must treat any
    /// error as terminal and call [`StageCore::fail`].
    pub fn advance(&mut self) -> JsonReaderResult<Progress> {
        if self.state.is_terminal() {
            return Ok(Progress::Completed);
        }
        if self.state == StageState::AwaitingDemand {
            self.transition(StageState::Emitting);
        }

        loop {
            if let Some(value) = self.extractor.pop() {
                self.stats.values_emitted += 1;
                self.transition(StageState::AwaitingDemand);
                return Ok(Progress::Emit(value));
            }

            self.tokenizer
                .set_key_decoding(!self.navigator.is_suspended());
            match self.tokenizer.next_token(&mut self.buffer, self.input_ended)? {
                Step::Token(token) => {
                    self.stats.tokens_processed += 1;
                    if let Some(span) = self.navigator.on_token(token)? {
                        self.extractor.capture(&self.buffer, span)?;
                    }
                    debug_assert_eq!(self.tokenizer.depth(), self.navigator.depth());
                    self.stats.max_depth = self.navigator.deepest();
                    self.release_consumed()?;
                }
                Step::NeedMoreData => {
                    self.release_consumed()?;
                    self.transition(StageState::AwaitingInput);
                    return Ok(Progress::NeedInput);
                }
                Step::EndOfDocument => {
                    self.complete();
                    return Ok(Progress::Completed);
                }
            }
        }
    }

    /// Record a fatal error and drop buffered state
    pub fn fail(&mut self, error: &dyn Display) {
        if self.state.is_terminal() {
            return;
        }
        tracing::warn!(
            target: "jsonreader::stage",
            offset = self.buffer.cursor(),
            values_emitted = self.stats.values_emitted,
            "reader failed: {error}"
        );
        self.discard();
        self.transition(StageState::Failed);
    }

    /// Stop producing values and drop buffered state
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        tracing::debug!(
            target: "jsonreader::stage",
            values_emitted = self.stats.values_emitted,
            "reader cancelled"
        );
        self.discard();
        self.transition(StageState::Cancelled);
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> StageState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    #[must_use]
    pub fn buffer_stats(&self) -> BufferStats {
        self.buffer.stats()
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        self.navigator.selector()
    }

    fn complete(&mut self) {
        tracing::debug!(
            target: "jsonreader::stage",
            values_emitted = self.stats.values_emitted,
            bytes_received = self.stats.bytes_received,
            peak_retained = self.stats.peak_retained,
            "document complete"
        );
        self.discard();
        self.transition(StageState::Completed);
    }

    /// Release every byte no unfinished token or open match still needs
    ///
    /// An unfinished value is only kept when it could be emitted. A key is
    /// kept while the navigator still needs its name.
    fn release_consumed(&mut self) -> JsonReaderResult<()> {
        let pending = self.tokenizer.pending_start().filter(|_| {
            if self.tokenizer.pending_is_key() {
                !self.navigator.is_suspended()
            } else {
                self.navigator.match_state() == MatchState::Full
            }
        });
        let keep_from = [pending, self.navigator.candidate_start()]
        .into_iter()
        .flatten()
        .fold(self.buffer.cursor(), usize::min);
        self.buffer.mark_consumed(keep_from);

        let retained = self.buffer.retained_behind_cursor();
        self.stats.peak_retained = self.stats.peak_retained.max(retained);
        if retained > self.config.max_buffer_size {
            return Err(JsonReaderError::buffer_limit(
                retained,
                self.config.max_buffer_size,
            ));
        }
        Ok(())
    }

    fn discard(&mut self) {
        self.buffer.clear();
        self.extractor.clear();
    }

    fn transition(&mut self, next: StageState) {
        if self.state == next || self.state.is_terminal() {
            return;
        }
        tracing::trace!(
            target: "jsonreader::stage",
            from = %self.state,
            to = %next,
            "stage transition"
        );
        self.state = next;
    }
}
