//! Navigator stack frames and match states

use crate::selector::Segment;

/// One entry of the open-container path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFrame {
    /// Inside an object; `field` is the key of the current member
    Object { field: Option<String> },
    /// Inside an array; `index` is the ordinal of the current element
    Array { index: Option<usize> },
}

impl PathFrame {
    #[inline]
    pub(super) fn object() -> Self {
        Self::Object { field: None }
    }

    #[inline]
    pub(super) fn array() -> Self {
        Self::Array { index: None }
    }

    /// Whether this frame's current member satisfies `segment`
    #[inline]
    pub(super) fn satisfies(&self, segment: &Segment) -> bool {
        match (self, segment) {
            (Self::Object { field: Some(field) }, Segment::Field(name)) => field == name,
            (Self::Array { .. }, Segment::AnyIndex) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for PathFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object { field: Some(field) } => write!(f, ".{field}"),
            Self::Object { field: None } => write!(f, "{{}}"),
            Self::Array { index: Some(index) } => write!(f, "[{index}]"),
            Self::Array { index: None } => write!(f, "[]"),
        }
    }
}

/// Relation between the value at the current position and the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No descendant of this value can match
    NoMatch,
    /// A prefix of the selector matches; descendants may match
    Partial,
    /// This value is an extraction target
    Full,
}
