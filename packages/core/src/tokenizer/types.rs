//! Tokenizer types and data structures

use crate::buffer::Span;

use super::scalars::ScalarState;

/// Structural token handed to the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{` opened a value at `at`
    ObjectOpen { at: usize },
    /// `}` at `at` closed the innermost object
    ObjectClose { at: usize },
    /// `[` opened a value at `at`
    ArrayOpen { at: usize },
    /// `]` at `at` closed the innermost array
    ArrayClose { at: usize },
    /// Decoded object key; applies to the value that follows
    FieldName(String),
    /// Object key inside a subtree whose keys are not needed
    SkippedKey,
    /// Complete string, number or literal value
    Scalar(Span),
}

/// Result of asking the tokenizer for the next token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Token(Token),
    /// Buffered bytes end inside or before the next token
    NeedMoreData,
    /// The root value is complete and the input is exhausted
    EndOfDocument,
}

/// What the grammar allows next when between tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Document start, after `:` or after `,` in an array
    Value,
    /// Right after `[`
    ValueOrArrayClose,
    /// After `,` in an object
    Key,
    /// Right after `{`
    KeyOrObjectClose,
    /// After an object key
    Colon,
}

impl Expect {
    pub(super) fn describe(self) -> &'static str {
        match self {
            Self::Value => "a value",
            Self::ValueOrArrayClose => "a value or ']'",
            Self::Key => "an object key",
            Self::KeyOrObjectClose => "an object key or '}'",
            Self::Colon => "':'",
        }
    }

    #[inline]
    pub(super) fn accepts_value(self) -> bool {
        matches!(self, Self::Value | Self::ValueOrArrayClose)
    }

    #[inline]
    pub(super) fn accepts_key(self) -> bool {
        matches!(self, Self::Key | Self::KeyOrObjectClose)
    }
}

/// Escape progress inside a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    /// Previous byte was an unescaped `\`
    Backslash,
    /// Inside `\uXXXX` with this many hex digits left
    Unicode(u8),
}

/// Lexical state between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// Between tokens
    Outside(Expect),
    /// Inside a string that started at `start`
    InString { start: usize, key: bool, escape: Escape },
    /// Inside a number or literal that started at `start`
    InNumberOrLiteral { start: usize, scalar: ScalarState },
    /// A value just ended; expecting `,`, a close, or end of document
    AfterValue,
}

/// Open container kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Object,
    Array,
}
