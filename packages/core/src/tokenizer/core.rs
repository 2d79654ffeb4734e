//! Core tokenizer state machine

use super::scalars::ScalarState;
use super::types::{Container, Escape, Expect, LexState, Step, Token};
use crate::buffer::{ChunkBuffer, Span};
use crate::error::{JsonReaderError, JsonReaderResult};

/// Incremental JSON tokenizer
///
/// Consumes bytes from a [`ChunkBuffer`] and produces structural tokens. All
/// progress lives in `state` and the container stack, so the buffer may run
/// dry at any byte and the next call resumes where this one stopped.
#[derive(Debug)]
pub struct Tokenizer {
    pub(super) state: LexState,
    containers: Vec<Container>,
    /// Whether completed keys are decoded into `FieldName`
    pub(super) decode_keys: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LexState::Outside(Expect::Value),
            containers: Vec::new(),
            decode_keys: true,
        }
    }

    /// Emit `SkippedKey` instead of decoding keys while `enabled` is false
    ///
    /// Bytes of a skipped key need not stay buffered.
    #[inline]
    pub fn set_key_decoding(&mut self, enabled: bool) {
        self.decode_keys = enabled;
    }

    /// Produce the next token from buffered input
    ///
    /// With `eof == false`, running out of bytes yields [`Step::NeedMoreData`].
    /// With `eof == true` the buffered bytes are all there is, and an
    /// incomplete document becomes an error.
    pub fn next_token(&mut self, buf: &mut ChunkBuffer, eof: bool) -> JsonReaderResult<Step> {
        loop {
            let Some(byte) = buf.peek() else {
                return if eof {
                    self.end_of_input(buf.cursor())
                } else {
                    Ok(Step::NeedMoreData)
                };
            };
            let at = buf.cursor();

            let token = match self.state {
                LexState::Outside(expect) => {
                    if is_whitespace(byte) {
                        buf.advance(1);
                        continue;
                    }
                    self.begin_token(buf, expect, byte, at)?
                }
                LexState::InString { start, key, escape } => {
                    self.scan_string(buf, start, key, escape)?
                }
                LexState::InNumberOrLiteral { start, scalar } => {
                    self.scan_scalar(buf, start, scalar)?
                }
                LexState::AfterValue => {
                    if is_whitespace(byte) {
                        buf.advance(1);
                        continue;
                    }
                    self.after_value(buf, byte, at)?
                }
            };

            if let Some(token) = token {
                return Ok(Step::Token(token));
            }
        }
    }

    /// Start offset of a token whose bytes are not complete yet
    ///
    /// Bytes from this offset on must stay buffered.
    #[inline]
    #[must_use]
    pub fn pending_start(&self) -> Option<usize> {
        match self.state {
            LexState::InString { start, .. } | LexState::InNumberOrLiteral { start, .. } => {
                Some(start)
            }
            _ => None,
        }
    }

    /// Whether the unfinished token is an object key
    #[inline]
    #[must_use]
    pub fn pending_is_key(&self) -> bool {
        matches!(self.state, LexState::InString { key: true, .. })
    }

    /// Number of open containers
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> LexState {
        self.state
    }

    fn begin_token(
        &mut self,
        buf: &mut ChunkBuffer,
        expect: Expect,
        byte: u8,
        at: usize,
    ) -> JsonReaderResult<Option<Token>> {
        let token = match byte {
            b'{' if expect.accepts_value() => {
                self.containers.push(Container::Object);
                self.state = LexState::Outside(Expect::KeyOrObjectClose);
                Some(Token::ObjectOpen { at })
            }
            b'[' if expect.accepts_value() => {
                self.containers.push(Container::Array);
                self.state = LexState::Outside(Expect::ValueOrArrayClose);
                Some(Token::ArrayOpen { at })
            }
            b'}' if expect == Expect::KeyOrObjectClose => {
                self.close(Container::Object);
                Some(Token::ObjectClose { at })
            }
            b']' if expect == Expect::ValueOrArrayClose => {
                self.close(Container::Array);
                Some(Token::ArrayClose { at })
            }
            b'"' if expect.accepts_value() || expect.accepts_key() => {
                self.state = LexState::InString {
                    start: at,
                    key: expect.accepts_key(),
                    escape: Escape::None,
                };
                None
            }
            b':' if expect == Expect::Colon => {
                self.state = LexState::Outside(Expect::Value);
                None
            }
            _ => match ScalarState::begin(byte).filter(|_| expect.accepts_value()) {
                // The first byte is fed by scan_scalar, so don't advance here
                Some(scalar) => {
                    self.state = LexState::InNumberOrLiteral { start: at, scalar };
                    return Ok(None);
                }
                None => {
                    return Err(JsonReaderError::unexpected_byte(at, byte, expect.describe()));
                }
            },
        };
        buf.advance(1);
        Ok(token)
    }

    fn after_value(
        &mut self,
        buf: &mut ChunkBuffer,
        byte: u8,
        at: usize,
    ) -> JsonReaderResult<Option<Token>> {
        let Some(&top) = self.containers.last() else {
            return Err(JsonReaderError::unexpected_byte(
                at,
                byte,
                "end of input after the root value",
            ));
        };

        let token = match (top, byte) {
            (Container::Object, b',') => {
                self.state = LexState::Outside(Expect::Key);
                None
            }
            (Container::Array, b',') => {
                self.state = LexState::Outside(Expect::Value);
                None
            }
            (Container::Object, b'}') => {
                self.close(Container::Object);
                Some(Token::ObjectClose { at })
            }
            (Container::Array, b']') => {
                self.close(Container::Array);
                Some(Token::ArrayClose { at })
            }
            (Container::Object, _) => {
                return Err(JsonReaderError::unexpected_byte(at, byte, "',' or '}'"));
            }
            (Container::Array, _) => {
                return Err(JsonReaderError::unexpected_byte(at, byte, "',' or ']'"));
            }
        };
        buf.advance(1);
        Ok(token)
    }

    fn scan_scalar(
        &mut self,
        buf: &mut ChunkBuffer,
        start: usize,
        mut scalar: ScalarState,
    ) -> JsonReaderResult<Option<Token>> {
        loop {
            let at = buf.cursor();
            let Some(byte) = buf.peek() else {
                self.state = LexState::InNumberOrLiteral { start, scalar };
                return Ok(None);
            };

            if is_delimiter(byte) {
                if !scalar.is_complete() {
                    return Err(JsonReaderError::unexpected_byte(at, byte, scalar.describe()));
                }
                // Delimiter stays unread for after_value
                self.state = LexState::AfterValue;
                return Ok(Some(Token::Scalar(Span::new(start, at))));
            }

            scalar = scalar
                .feed(byte)
                .ok_or_else(|| JsonReaderError::unexpected_byte(at, byte, scalar.describe()))?;
            buf.advance(1);
        }
    }

    fn close(&mut self, expected: Container) {
        let popped = self.containers.pop();
        debug_assert_eq!(popped, Some(expected));
        self.state = LexState::AfterValue;
    }

    fn end_of_input(&mut self, at: usize) -> JsonReaderResult<Step> {
        match self.state {
            LexState::InNumberOrLiteral { start, scalar } if self.containers.is_empty() => {
                if !scalar.is_complete() {
                    return Err(JsonReaderError::structural(
                        at,
                        format!("input ended inside {}", scalar.describe()),
                    ));
                }
                self.state = LexState::AfterValue;
                Ok(Step::Token(Token::Scalar(Span::new(start, at))))
            }
            _ if !self.containers.is_empty() => {
                Err(JsonReaderError::truncated(at, self.containers.len()))
            }
            LexState::InString { .. } => Err(JsonReaderError::structural(
                at,
                "input ended inside a string",
            )),
            LexState::AfterValue => Ok(Step::EndOfDocument),
            _ => Err(JsonReaderError::truncated(at, 0)),
        }
    }
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_delimiter(byte: u8) -> bool {
    is_whitespace(byte) || matches!(byte, b',' | b'}' | b']')
}
