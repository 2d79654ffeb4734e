//! Number and literal recognition
//!
//! Numbers and literals have no closing byte; they end at the next delimiter.
//! These machines only validate the bytes seen so far and report whether the
//! token could legally end here.

/// JSON number grammar position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    Start,
    Minus,
    /// A lone leading `0`
    Zero,
    Integer,
    Dot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl NumberState {
    #[inline]
    fn feed(self, byte: u8) -> Option<Self> {
        use NumberState::*;
        match (self, byte) {
            (Start, b'-') => Some(Minus),
            (Start | Minus, b'0') => Some(Zero),
            (Start | Minus | Integer, b'0'..=b'9') => Some(Integer),
            (Zero | Integer, b'.') => Some(Dot),
            (Dot | Fraction, b'0'..=b'9') => Some(Fraction),
            (Zero | Integer | Fraction, b'e' | b'E') => Some(Exponent),
            (Exponent, b'+' | b'-') => Some(ExponentSign),
            (Exponent | ExponentSign | ExponentDigits, b'0'..=b'9') => Some(ExponentDigits),
            _ => None,
        }
    }

    #[inline]
    fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Zero | Self::Integer | Self::Fraction | Self::ExponentDigits
        )
    }
}

/// Progress through a number or one of `true`, `false`, `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarState {
    Number(NumberState),
    Literal { text: &'static [u8], matched: usize },
}

impl ScalarState {
    /// State for a scalar whose first byte is `first`, before that byte is fed
    pub(super) fn begin(first: u8) -> Option<Self> {
        let text: &'static [u8] = match first {
            b'-' | b'0'..=b'9' => return Some(Self::Number(NumberState::Start)),
            b't' => b"true",
            b'f' => b"false",
            b'n' => b"null",
            _ => return None,
        };
        Some(Self::Literal { text, matched: 0 })
    }

    /// Advance over one byte, `None` if the byte cannot continue the token
    #[inline]
    pub(super) fn feed(self, byte: u8) -> Option<Self> {
        match self {
            Self::Number(state) => state.feed(byte).map(Self::Number),
            Self::Literal { text, matched } => (text.get(matched) == Some(&byte))
                .then_some(Self::Literal {
                    text,
                    matched: matched + 1,
                }),
        }
    }

    /// Whether the token may end before the next byte
    #[inline]
    pub(super) fn is_complete(self) -> bool {
        match self {
            Self::Number(state) => state.is_complete(),
            Self::Literal { text, matched } => matched == text.len(),
        }
    }

    pub(super) fn describe(self) -> &'static str {
        match self {
            Self::Number(_) => "a valid number",
            Self::Literal { text, .. } => match text {
                b"true" => "literal 'true'",
                b"false" => "literal 'false'",
                _ => "literal 'null'",
            },
        }
    }
}

#[cfg(test)]
mod scalar_tests {
    use super::*;

    fn accepts(text: &[u8]) -> bool {
        let Some(mut state) = ScalarState::begin(text[0]) else {
            return false;
        };
        for &byte in text {
            match state.feed(byte) {
                Some(next) => state = next,
                None => return false,
            }
        }
        state.is_complete()
    }

    #[test]
    fn test_valid_numbers() {
        for text in ["0", "-0", "7", "42", "-13", "0.5", "3.25", "1e9", "1E+2", "-2.5e-3", "0e0"] {
            assert!(accepts(text.as_bytes()), "{text} should be accepted");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for text in ["-", "01", "1.", ".5", "1e", "1e+", "--1", "+1", "1.2.3", "0x1"] {
            assert!(!accepts(text.as_bytes()), "{text} should be rejected");
        }
    }

    #[test]
    fn test_literals() {
        assert!(accepts(b"true"));
        assert!(accepts(b"false"));
        assert!(accepts(b"null"));
        assert!(!accepts(b"tru"));
        assert!(!accepts(b"nul1"));
        assert!(!accepts(b"truee"));
        assert!(!accepts(b"False"));
    }
}
