//! Path selectors
//!
//! A selector is the fixed field/wildcard path that names the sub-documents to
//! extract, written as a small subset of JSONPath:
//!
//! ```text
//! $                 the whole document
//! $.rows[*].doc     for every element of "rows", its "doc" field
//! $['odd key'][*]   bracket-quoted field names
//! ```
//!
//! Recursive descent, filters, indices, slices and unions are not part of the
//! grammar and are rejected at parse time.

mod ast;
mod parser;
mod strings;

pub use ast::{Segment, Selector};
pub use parser::SelectorParser;
