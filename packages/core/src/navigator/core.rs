//! Path tracking and match detection

use super::frame::{MatchState, PathFrame};
use crate::buffer::Span;
use crate::error::{JsonReaderError, JsonReaderResult};
use crate::selector::Selector;
use crate::tokenizer::Token;

/// Opening offset and depth of the value currently being captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    start: usize,
    /// Frame count before the value's own frame was pushed
    depth: usize,
}

/// Tracks the structural position and reports matched spans
///
/// The frame stack mirrors the open containers. The current position is
/// compared against the selector only when a value starts, and never inside a
/// value that is already being captured or inside a subtree that cannot match.
#[derive(Debug)]
pub struct Navigator {
    selector: Selector,
    frames: Vec<PathFrame>,
    candidate: Option<Candidate>,
    /// Frame count at which the skipped subtree ends
    skip_until: Option<usize>,
    max_depth: usize,
    deepest: usize,
}

impl Navigator {
    #[must_use]
    pub fn new(selector: Selector, max_depth: usize) -> Self {
        Self {
            selector,
            frames: Vec::new(),
            candidate: None,
            skip_until: None,
            max_depth,
            deepest: 0,
        }
    }

    /// Apply one token, returning the span of a value that just completed a match
    pub fn on_token(&mut self, token: Token) -> JsonReaderResult<Option<Span>> {
        match token {
            Token::ObjectOpen { at } => self.open(at, PathFrame::object()),
            Token::ArrayOpen { at } => self.open(at, PathFrame::array()),
            Token::ObjectClose { at } | Token::ArrayClose { at } => Ok(self.close(at)),
            Token::FieldName(name) => {
                if !self.is_suspended() {
                    if let Some(PathFrame::Object { field }) = self.frames.last_mut() {
                        *field = Some(name);
                    }
                }
                Ok(None)
            }
            Token::SkippedKey => {
                debug_assert!(self.is_suspended(), "key skipped outside a suspended subtree");
                Ok(None)
            }
            Token::Scalar(span) => {
                self.bump_index();
                Ok((self.match_state() == MatchState::Full).then_some(span))
            }
        }
    }

    /// Match state of a value starting at the current position
    #[must_use]
    pub fn match_state(&self) -> MatchState {
        if self.is_suspended() || self.frames.len() > self.selector.len() {
            return MatchState::NoMatch;
        }

        let segments = self.selector.segments();
        let prefix_matches = self
            .frames
            .iter()
            .zip(segments)
            .all(|(frame, segment)| frame.satisfies(segment));

        match (prefix_matches, self.frames.len() == segments.len()) {
            (false, _) => MatchState::NoMatch,
            (true, true) => MatchState::Full,
            (true, false) => MatchState::Partial,
        }
    }

    /// Start offset of the value being captured, if any
    #[inline]
    #[must_use]
    pub fn candidate_start(&self) -> Option<usize> {
        self.candidate.map(|candidate| candidate.start)
    }

    /// Current nesting depth
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest nesting seen so far
    #[inline]
    #[must_use]
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    #[must_use]
    pub fn frames(&self) -> &[PathFrame] {
        &self.frames
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    fn open(&mut self, at: usize, frame: PathFrame) -> JsonReaderResult<Option<Span>> {
        self.bump_index();
        if self.frames.len() >= self.max_depth {
            return Err(JsonReaderError::depth_limit(
                self.frames.len() + 1,
                self.max_depth,
            ));
        }

        if !self.is_suspended() {
            match self.match_state() {
                MatchState::Full => {
                    tracing::trace!(
                        target: "jsonreader::navigator",
                        start = at,
                        depth = self.frames.len(),
                        "capturing value"
                    );
                    self.candidate = Some(Candidate {
                        start: at,
                        depth: self.frames.len(),
                    });
                }
                MatchState::NoMatch => self.skip_until = Some(self.frames.len()),
                MatchState::Partial => {}
            }
        }

        self.frames.push(frame);
        self.deepest = self.deepest.max(self.frames.len());
        Ok(None)
    }

    fn close(&mut self, at: usize) -> Option<Span> {
        let popped = self.frames.pop();
        debug_assert!(popped.is_some(), "close without open frame");
        let depth = self.frames.len();

        if self.skip_until == Some(depth) {
            self.skip_until = None;
        }

        match self.candidate {
            Some(candidate) if candidate.depth == depth => {
                self.candidate = None;
                Some(Span::new(candidate.start, at + 1))
            }
            _ => None,
        }
    }

    #[inline]
    fn bump_index(&mut self) {
        if let Some(PathFrame::Array { index }) = self.frames.last_mut() {
            *index = Some(index.map_or(0, |i| i + 1));
        }
    }

    /// Inside a captured value or a subtree that cannot match
    ///
    /// Keys read while suspended are never looked at.
    #[inline]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.candidate.is_some() || self.skip_until.is_some()
    }
}
