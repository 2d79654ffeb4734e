//! Selector parser
//!
//! Single pass over the expression characters, dispatching on `.` and `[` to
//! the dot and bracket segment parsers.

use super::ast::{Segment, Selector, is_name_char, is_name_first};
use super::strings::parse_quoted_name;
use crate::error::{JsonReaderError, JsonReaderResult};

/// Parser for selector expressions
pub struct SelectorParser<'a> {
    pub(super) input: &'a str,
    pub(super) chars: Vec<char>,
    pub(super) position: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create new selector parser
    #[inline]
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Parse the complete expression into a selector
    ///
    /// # Errors
    ///
    /// Returns `JsonReaderError::InvalidSelector` on the first unsupported or
    /// malformed construct.
    pub fn parse(mut self) -> JsonReaderResult<Selector> {
        match self.peek() {
            Some('$') => self.position += 1,
            Some(_) => return Err(self.error("selector must start with '$'")),
            None => return Err(self.error("empty selector")),
        }

        let mut segments = Vec::new();
        while let Some(c) = self.peek() {
            let segment = match c {
                '.' => self.parse_dot()?,
                '[' => self.parse_bracket()?,
                _ => return Err(self.error("expected '.' or '[' before segment")),
            };
            segments.push(segment);
        }

        Ok(Selector::new(segments))
    }

    /// Parse `.name`
    fn parse_dot(&mut self) -> JsonReaderResult<Segment> {
        self.position += 1;
        match self.peek() {
            Some('.') => Err(self.error("recursive descent '..' is not supported")),
            Some('*') => Err(self.error(
                "member wildcard '.*' is not supported, use '[*]' for array elements",
            )),
            Some(c) if is_name_first(c) => {
                let start = self.position;
                while self.peek().is_some_and(is_name_char) {
                    self.position += 1;
                }
                Ok(Segment::Field(self.chars[start..self.position].iter().collect()))
            }
            Some(_) => Err(self.error("invalid character in property name")),
            None => Err(self.error("expected property name after '.'")),
        }
    }

    /// Parse `[*]`, `['name']` or `["name"]`
    fn parse_bracket(&mut self) -> JsonReaderResult<Segment> {
        self.position += 1;
        let segment = match self.peek() {
            Some('*') => {
                self.position += 1;
                Segment::AnyIndex
            }
            Some(quote @ ('\'' | '"')) => {
                let (name, next) = parse_quoted_name(self, quote)?;
                self.position = next;
                Segment::Field(name)
            }
            Some('?') => return Err(self.error("filter expressions are not supported")),
            Some(c) if c.is_ascii_digit() || c == '-' || c == ':' => {
                return Err(self.error(
                    "index and slice selectors are not supported, use '[*]'",
                ));
            }
            Some(_) => return Err(self.error("expected '*' or a quoted name after '['")),
            None => return Err(self.error("unclosed '['")),
        };

        match self.peek() {
            Some(']') => {
                self.position += 1;
                Ok(segment)
            }
            Some(',') => Err(self.error("union selectors are not supported")),
            _ => Err(self.error("expected ']'")),
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub(super) fn error_at(&self, reason: &str, position: usize) -> JsonReaderError {
        JsonReaderError::invalid_selector(self.input, reason, position)
    }

    fn error(&self, reason: &str) -> JsonReaderError {
        self.error_at(reason, self.position)
    }
}
