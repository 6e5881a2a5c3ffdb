//! Error types for holodeque operations.
//!
//! Every fallible operation validates its preconditions before touching the
//! matrix, so an `Err` always leaves the structure exactly as it was.

use std::fmt;

/// Result type for holodeque operations.
pub type Result<T> = std::result::Result<T, HolodequeError>;

/// Errors that can occur while operating on a holodeque.
#[derive(Debug, thiserror::Error)]
pub enum HolodequeError {
    /// Peek, pop or positional access on an empty structure.
    #[error("{op} from an empty holodeque")]
    EmptyCollection { op: &'static str },

    /// Positional index outside `[-size, size)`.
    #[error("holodeque index {index} out of range for size {size}")]
    OutOfRange { index: isize, size: usize },

    /// Value outside a fixed alphabet.
    #[error("the holodeque does not accept the element: {0}")]
    InvalidElement(String),

    /// Bad construction or call argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A merge, repeat or insert would grow the structure past `maxlen`.
    #[error("capacity exceeded: {required} elements requested but maxlen is {maxlen}")]
    CapacityExceeded { required: usize, maxlen: usize },

    /// Merge between structures over different alphabets.
    #[error("incompatible holodeques: {0}")]
    IncompatibleAlphabet(String),

    /// Operand of the wrong structure kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// `remove`/`index` target absent.
    #[error("{0} not in holodeque")]
    NotFound(String),

    /// A fixed-width scalar cannot represent the next state.
    #[error("scalar overflow during {0}")]
    Overflow(&'static str),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl HolodequeError {
    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_element(element: &impl fmt::Debug) -> Self {
        Self::InvalidElement(format!("{element:?}"))
    }

    pub(crate) fn not_found(element: &impl fmt::Debug) -> Self {
        Self::NotFound(format!("{element:?}"))
    }

    pub(crate) fn empty(op: &'static str) -> Self {
        Self::EmptyCollection { op }
    }
}
