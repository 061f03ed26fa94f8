//! Error type shared by all fallible entry points.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TopoError {
    /// The operation cannot process this kind of geometry.
    InvalidGeometryKind {
        expected: &'static str,
        found: &'static str,
    },
    /// No 2D basis can be built from the input.
    DegenerateGeometry { reason: String },
    /// The overlay ring walk revisited an edge and had to be closed by force.
    RingLinkage,
    /// A DE-9IM pattern or matrix string has an unsupported character.
    InvalidPattern { pattern: String },
}

impl TopoError {
    pub(crate) fn kind(expected: &'static str, found: &'static str) -> Self {
        Self::InvalidGeometryKind { expected, found }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for TopoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometryKind { expected, found } => {
                write!(f, "invalid geometry kind: expected {expected}, found {found}")
            }
            Self::DegenerateGeometry { reason } => write!(f, "degenerate geometry: {reason}"),
            Self::RingLinkage => write!(f, "malformed ring linkage during overlay"),
            Self::InvalidPattern { pattern } => write!(f, "invalid DE-9IM pattern: {pattern:?}"),
        }
    }
}

impl std::error::Error for TopoError {}
