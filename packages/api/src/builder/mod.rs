//! Select builder API modules
//!
//! Fluent configuration of a selector read, followed by one terminal method
//! that binds the builder to a chunk source.

pub mod core;
pub mod read;
pub mod typed;

pub use self::core::SelectBuilder;
pub use typed::TypedReader;
