//! Quoted member names with escape sequence handling
//!
//! Handles `'name'` / `"name"` inside brackets, including JSON escapes,
//! `\uXXXX` and UTF-16 surrogate pairs.

use super::parser::SelectorParser;
use crate::error::JsonReaderResult;

/// Parse a quoted name starting at the opening quote
///
/// Returns the decoded name and the position just past the closing quote.
pub(super) fn parse_quoted_name(
    parser: &SelectorParser<'_>,
    quote: char,
) -> JsonReaderResult<(String, usize)> {
    let chars = &parser.chars;
    let start = parser.position;
    let mut i = start + 1; // Skip opening quote
    let mut name = String::new();

    while i < chars.len() {
        match chars[i] {
            c if c == quote => return Ok((name, i + 1)),
            '\\' => {
                i += 1;
                match chars.get(i) {
                    Some('"') => name.push('"'),
                    Some('\'') => name.push('\''),
                    Some('\\') => name.push('\\'),
                    Some('/') => name.push('/'),
                    Some('b') => name.push('\u{0008}'),
                    Some('f') => name.push('\u{000C}'),
                    Some('n') => name.push('\n'),
                    Some('r') => name.push('\r'),
                    Some('t') => name.push('\t'),
                    Some('u') => {
                        let (c, last) = parse_unicode_escape(parser, i)?;
                        name.push(c);
                        i = last;
                    }
                    Some(_) => return Err(parser.error_at("invalid escape sequence", i)),
                    None => break,
                }
            }
            c if u32::from(c) < 0x20 => {
                return Err(parser.error_at("control character in quoted name", i));
            }
            c => name.push(c),
        }
        i += 1;
    }

    Err(parser.error_at("unterminated quoted name", start))
}

/// Decode `\uXXXX` (and a following low surrogate) with `i` at the `u`
///
/// Returns the character and the index of the last consumed hex digit.
fn parse_unicode_escape(parser: &SelectorParser<'_>, i: usize) -> JsonReaderResult<(char, usize)> {
    let high = read_hex4(parser, i + 1)?;

    if (0xDC00..=0xDFFF).contains(&high) {
        return Err(parser.error_at("low surrogate without preceding high surrogate", i));
    }

    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high)
            .map(|c| (c, i + 4))
            .ok_or_else(|| parser.error_at("invalid unicode code point", i));
    }

    // High surrogate: a `\uXXXX` low surrogate must follow
    let chars = &parser.chars;
    if chars.get(i + 5) != Some(&'\\') || chars.get(i + 6) != Some(&'u') {
        return Err(parser.error_at(
            "high surrogate not followed by low surrogate escape sequence",
            i,
        ));
    }
    let low = read_hex4(parser, i + 7)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(parser.error_at(
            "high surrogate not followed by valid low surrogate",
            i,
        ));
    }

    let scalar = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(scalar)
        .map(|c| (c, i + 10))
        .ok_or_else(|| parser.error_at("invalid surrogate pair result", i))
}

fn read_hex4(parser: &SelectorParser<'_>, from: usize) -> JsonReaderResult<u32> {
    let digits = parser
        .chars
        .get(from..from + 4)
        .ok_or_else(|| parser.error_at("incomplete unicode escape sequence", from))?;

    digits.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16)
            .map(|d| (acc << 4) | d)
            .ok_or_else(|| parser.error_at("invalid unicode escape sequence", from))
    })
}

#[cfg(test)]
mod string_tests {
    use crate::selector::{Segment, Selector};

    fn single_field(text: &str) -> String {
        let selector = Selector::parse(text).expect("selector should parse");
        match selector.segments() {
            [Segment::Field(name)] => name.clone(),
            other => panic!("expected one field, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(single_field(r#"$['a\'b']"#), "a'b");
        assert_eq!(single_field(r#"$["a\"b"]"#), "a\"b");
        assert_eq!(single_field(r"$['tab\there']"), "tab\there");
        assert_eq!(single_field(r"$['back\\slash']"), "back\\slash");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(single_field(r"$['\u006eame']"), "name");
        assert_eq!(single_field(r"$['\ud83d\ude00']"), "\u{1F600}");
    }

    #[test]
    fn test_bad_escapes() {
        for text in [
            r"$['\x']",
            r"$['\u12']",
            r"$['\u12zz']",
            r"$['\ude00']",
            r"$['\ud83d']",
            r"$['\ud83dA']",
            r"$['open",
        ] {
            assert!(Selector::parse(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn test_other_quote_is_literal() {
        assert_eq!(single_field(r#"$['say "hi"']"#), "say \"hi\"");
    }
}
