//! Path matcher
//!
//! Keeps a stack of [`PathFrame`]s mirroring the open JSON containers and
//! compares it against the selector each time a value starts.

mod core;
mod frame;

pub use self::core::Navigator;
pub use frame::{MatchState, PathFrame};
