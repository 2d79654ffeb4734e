//! Selector AST definitions

use std::fmt;
use std::str::FromStr;

use super::parser::SelectorParser;
use crate::error::{JsonReaderError, JsonReaderResult};

/// One step of a selector path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member access (`.name` or `['name']`)
    Field(String),
    /// Any element of an array (`[*]`)
    AnyIndex,
}

impl Segment {
    /// Create a field segment
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

/// Immutable field/wildcard path identifying the values to extract
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector {
    segments: Vec<Segment>,
}

impl Selector {
    /// Build a selector from segments
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Selector matching the whole document (`$`)
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse selector text such as `$.rows[*].doc`
    ///
    /// # Errors
    ///
    /// Returns `JsonReaderError::InvalidSelector` when the text is not in the
    /// supported grammar.
    pub fn parse(expression: &str) -> JsonReaderResult<Self> {
        SelectorParser::new(expression).parse()
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, which is also the depth of every matched value
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the root selector `$`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for Selector {
    type Err = JsonReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::AnyIndex => f.write_str("[*]")?,
                Segment::Field(name) if is_shorthand_name(name) => write!(f, ".{name}")?,
                Segment::Field(name) => {
                    f.write_str("['")?;
                    for c in name.chars() {
                        match c {
                            '\'' => f.write_str("\\'")?,
                            '\\' => f.write_str("\\\\")?,
                            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
                            c => write!(f, "{c}")?,
                        }
                    }
                    f.write_str("']")?;
                }
            }
        }
        Ok(())
    }
}

/// Whether a field name can be written as `.name`
pub(crate) fn is_shorthand_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_first(first) => chars.all(is_name_char),
        _ => false,
    }
}

#[inline]
pub(crate) fn is_name_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

#[inline]
pub(crate) fn is_name_char(c: char) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod ast_tests {
    use super::*;

    #[test]
    fn test_display_shorthand_and_bracket_forms() {
        let selector = Selector::new(vec![
            Segment::field("rows"),
            Segment::AnyIndex,
            Segment::field("doc"),
        ]);
        assert_eq!(selector.to_string(), "$.rows[*].doc");

        let odd = Selector::new(vec![Segment::field("a b"), Segment::field("it's")]);
        assert_eq!(odd.to_string(), r"$['a b']['it\'s']");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for text in ["$", "$.a", "$[*][*]", "$['9lives'].x", r"$['q\'uote']"] {
            let selector = Selector::parse(text).expect("selector should parse");
            let reparsed = Selector::parse(&selector.to_string()).expect("display should parse");
            assert_eq!(selector, reparsed, "round trip of {text}");
        }
    }

    #[test]
    fn test_root_selector() {
        assert!(Selector::root().is_empty());
        assert_eq!(Selector::root().to_string(), "$");
    }
}
