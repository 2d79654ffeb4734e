//! Incremental JSON tokenizer
//!
//! Turns the byte stream held in a [`ChunkBuffer`](crate::buffer::ChunkBuffer)
//! into structural tokens while validating the JSON grammar. A token may be
//! split across any number of chunks; the tokenizer keeps just enough state to
//! resume mid-string, mid-escape or mid-number.

mod core;
mod scalars;
mod strings;
mod types;

pub use self::core::Tokenizer;
pub use scalars::{NumberState, ScalarState};
pub use types::{Container, Escape, Expect, LexState, Step, Token};
