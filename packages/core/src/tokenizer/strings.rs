//! String scanning with escape validation
//!
//! Plain runs are skipped with `memchr2` on `"` and `\`. Escapes are checked
//! byte by byte so a chunk boundary can fall anywhere inside one.

use memchr::{memchr, memchr2};

use super::core::Tokenizer;
use super::types::{Escape, Expect, LexState, Token};
use crate::buffer::{ChunkBuffer, Span};
use crate::error::{JsonReaderError, JsonReaderResult};

impl Tokenizer {
    /// Continue a string token
    ///
    /// Returns `Ok(None)` when the buffered input ends inside the string. The
    /// escape progress is saved in the lexical state for the next call.
    pub(super) fn scan_string(
        &mut self,
        buf: &mut ChunkBuffer,
        start: usize,
        key: bool,
        mut escape: Escape,
    ) -> JsonReaderResult<Option<Token>> {
        loop {
            let at = buf.cursor();
            let unread = buf.unread();
            if unread.is_empty() {
                self.state = LexState::InString { start, key, escape };
                return Ok(None);
            }

            match escape {
                Escape::None => match memchr2(b'"', b'\\', unread) {
                    Some(pos) => {
                        check_control_bytes(&unread[..pos], at)?;
                        let terminator = unread[pos];
                        buf.advance(pos + 1);
                        if terminator == b'"' {
                            return self.finish_string(buf, Span::new(start, buf.cursor()), key);
                        }
                        escape = Escape::Backslash;
                    }
                    None => {
                        check_control_bytes(unread, at)?;
                        let len = unread.len();
                        buf.advance(len);
                    }
                },
                Escape::Backslash => {
                    escape = match unread[0] {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Escape::None,
                        b'u' => Escape::Unicode(4),
                        other => {
                            return Err(JsonReaderError::unexpected_byte(
                                at,
                                other,
                                "an escape character",
                            ));
                        }
                    };
                    buf.advance(1);
                }
                Escape::Unicode(remaining) => {
                    let byte = unread[0];
                    if !byte.is_ascii_hexdigit() {
                        return Err(JsonReaderError::unexpected_byte(at, byte, "a hex digit"));
                    }
                    buf.advance(1);
                    escape = if remaining == 1 {
                        Escape::None
                    } else {
                        Escape::Unicode(remaining - 1)
                    };
                }
            }
        }
    }

    fn finish_string(
        &mut self,
        buf: &ChunkBuffer,
        span: Span,
        key: bool,
    ) -> JsonReaderResult<Option<Token>> {
        if !key {
            self.state = LexState::AfterValue;
            return Ok(Some(Token::Scalar(span)));
        }
        self.state = LexState::Outside(Expect::Colon);
        if !self.decode_keys {
            return Ok(Some(Token::SkippedKey));
        }

        let raw = buf
            .slice(span)
            .ok_or_else(|| JsonReaderError::structural(span.start, "object key was released"))?;
        let name = decode_key(raw, span.start)?;
        Ok(Some(Token::FieldName(name)))
    }
}

/// Decode a complete quoted key, including its quotes
///
/// Escapes were validated while scanning. A `\u` escape that is not part of
/// a surrogate pair decodes to U+FFFD rather than failing the document.
fn decode_key(raw: &[u8], offset: usize) -> JsonReaderResult<String> {
    let mut rest = &raw[1..raw.len() - 1];
    let mut at = offset + 1;
    let mut name = String::with_capacity(rest.len());
    let mut units: Vec<u16> = Vec::new();

    while !rest.is_empty() {
        let run = memchr(b'\\', rest).unwrap_or(rest.len());
        if run > 0 {
            flush_utf16(&mut units, &mut name);
            let text = std::str::from_utf8(&rest[..run]).map_err(|e| {
                JsonReaderError::structural(at + e.valid_up_to(), "object key is not valid UTF-8")
            })?;
            name.push_str(text);
            rest = &rest[run..];
            at += run;
            continue;
        }

        let escape_len = match rest.get(1) {
            Some(b'u') => {
                let unit = rest
                    .get(2..6)
                    .and_then(parse_hex4)
                    .ok_or_else(|| JsonReaderError::structural(at, "incomplete unicode escape"))?;
                units.push(unit);
                6
            }
            Some(&byte) => {
                flush_utf16(&mut units, &mut name);
                name.push(match byte {
                    b'b' => '\u{8}',
                    b'f' => '\u{c}',
                    b'n' => '\n',
                    b'r' => '\r',
                    b't' => '\t',
                    other => char::from(other),
                });
                2
            }
            None => return Err(JsonReaderError::structural(at, "dangling escape in key")),
        };
        rest = &rest[escape_len..];
        at += escape_len;
    }

    flush_utf16(&mut units, &mut name);
    Ok(name)
}

fn parse_hex4(digits: &[u8]) -> Option<u16> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|hex| u16::from_str_radix(hex, 16).ok())
}

/// Append pending UTF-16 code units, replacing unpaired surrogates
fn flush_utf16(units: &mut Vec<u16>, name: &mut String) {
    if units.is_empty() {
        return;
    }
    name.extend(
        char::decode_utf16(units.drain(..)).map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

#[inline]
fn check_control_bytes(run: &[u8], offset: usize) -> JsonReaderResult<()> {
    match run.iter().position(|&b| b < 0x20) {
        Some(index) => Err(JsonReaderError::unexpected_byte(
            offset + index,
            run[index],
            "an escaped control character",
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod string_tests {
    use super::*;
    use crate::tokenizer::Step;

    #[test]
    fn test_decode_plain_key() {
        assert_eq!(decode_key(br#""rows""#, 0).expect("plain key"), "rows");
    }

    #[test]
    fn test_decode_escaped_key() {
        let name = decode_key(br#""a\"b\u00e9""#, 0).expect("escaped key");
        assert_eq!(name, "a\"b\u{e9}");
    }

    #[test]
    fn test_decode_unicode_escapes() {
        let cases: [(&[u8], &str, &str); 5] = [
            (br#""\ud83d\ude00""#, "\u{1f600}", "surrogate pair"),
            (br#""\udead""#, "\u{fffd}", "lone trailing surrogate"),
            (br#""a\ud800b""#, "a\u{fffd}b", "lone leading surrogate between text"),
            (br#""\ud800\ud800""#, "\u{fffd}\u{fffd}", "two leading surrogates"),
            (br#""\/\b\t\u0041""#, "/\u{8}\tA", "short escapes"),
        ];
        for (raw, expected, description) in cases {
            assert_eq!(decode_key(raw, 0).expect(description), expected, "{description}");
        }
    }

    #[test]
    fn test_skipped_key_is_not_decoded() {
        let mut tokenizer = Tokenizer::new();
        let mut buf = ChunkBuffer::new();
        buf.append(br#"{"\udead": 1}"#);

        assert!(matches!(
            tokenizer.next_token(&mut buf, true),
            Ok(Step::Token(Token::ObjectOpen { at: 0 }))
        ));
        tokenizer.set_key_decoding(false);
        assert_eq!(
            tokenizer.next_token(&mut buf, true),
            Ok(Step::Token(Token::SkippedKey))
        );
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_key(b"\"ab\xff\"", 10).expect_err("invalid utf-8");
        assert_eq!(err.offset(), Some(13));
    }

    #[test]
    fn test_control_byte_reported_at_absolute_offset() {
        let err = check_control_bytes(b"ab\ncd", 100).expect_err("newline in string");
        assert_eq!(err.offset(), Some(102));
    }
}
