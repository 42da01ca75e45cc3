//! Fatal errors and non-fatal diagnostics.
//!
//! Fatal conditions ([`MappingError`], [`LayoutError`]) abort the call and
//! produce no matrix.  Everything else is a [`Diagnostic`]: the affected
//! channel's row is left all-zero, a `WARN` event is logged, and the
//! diagnostic is returned alongside the matrix.
use std::fmt;

use thiserror::Error;

use crate::classify::ChannelClass;

/// Errors building a [`CanonicalLayout`](crate::layout::CanonicalLayout).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("canonical layout is missing landmark label {0:?}")]
    MissingLabel(String),
    #[error("canonical layout has {got} labels, need at least {need}")]
    TooShort { got: usize, need: usize },
}

/// Which override list an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRole {
    Eog,
    Reference,
    Extra,
}

impl fmt::Display for OverrideRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverrideRole::Eog => "EOG",
            OverrideRole::Reference => "reference",
            OverrideRole::Extra => "extra",
        })
    }
}

/// Caller-contract violations and malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("{role} channel {name:?} not found in provided channels")]
    UnknownChannel { role: OverrideRole, name: String },

    #[error("{role} override has {got} entries; accepted counts are {accepted}")]
    OverrideLength { role: OverrideRole, got: usize, accepted: &'static str },

    #[error("channel table must have shape [n_channels, 2], got {shape:?}")]
    MalformedTable { shape: Vec<usize> },

    #[error("channel {name:?} has non-integer kind code {code:?}")]
    InvalidKindCode { name: String, code: String },
}

/// A non-fatal problem met while building a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Heuristic resolution produced an empty name.
    Unresolvable { name: String, class: ChannelClass },
    /// Resolved name collided with an earlier channel and was suffixed.
    Duplicate { name: String, renamed: String },
    /// Too many channels of a bounded class.
    Overflow { name: String, class: ChannelClass },
    /// All EXTRA slots were already taken.
    NoRoomForExtra { name: String },
    /// An ordinary channel took the last EXTRA slot reserved for stim.
    StimOverwritten { name: String },
    /// Channel name does not match any canonical label.
    NotInLayout { name: String },
}

impl Diagnostic {
    /// Log at `WARN` and hand the diagnostic back.
    pub(crate) fn emit(self) -> Self {
        tracing::warn!(target: "chanmap", "{self}");
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolvable { name, class } => write!(
                f,
                "could not resolve the true label of {class} channel {name}, rename it first"
            ),
            Self::Duplicate { name, renamed } => write!(
                f,
                "heuristics produced duplicate entries for {name}; renamed to {renamed}, it will be lost in mapping"
            ),
            Self::Overflow { name, class } => {
                write!(f, "losing assumed {class} channel {name} because there are too many")
            }
            Self::NoRoomForExtra { name } => write!(f, "no more room in extra channels for {name}"),
            Self::StimOverwritten { name } => write!(f, "stim channel overwritten by {name}"),
            Self::NotInLayout { name } => {
                write!(f, "channel {name} not found in standard layout, skipping")
            }
        }
    }
}
