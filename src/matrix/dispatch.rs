//! Backend dispatch: picks the matrix layout for a holodeque at construction.
//!
//! Nested rows win for small shapes; past `config::ARRAY_BACKEND_THRESHOLD`
//! the whole-lane arithmetic of the array layout takes over.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::config::ARRAY_BACKEND_THRESHOLD;
use crate::error::{HolodequeError, Result};
use crate::matrix::{ArrayMatrix, MatrixBackend, NestedMatrix, Op, Scalar};

/// Backend selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Nested,
    Array,
    /// Decide from the matrix shape.
    #[default]
    Auto,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Nested => write!(f, "nested"),
            BackendKind::Array => write!(f, "array"),
            BackendKind::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = HolodequeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nested" => Ok(BackendKind::Nested),
            "array" | "ndarray" => Ok(BackendKind::Array),
            "auto" => Ok(BackendKind::Auto),
            other => Err(HolodequeError::invalid_argument(format!(
                "unknown backend '{other}' (expected nested, array or auto)"
            ))),
        }
    }
}

/// Resolve `Auto` to a concrete layout for a `dim × dim` matrix.
pub fn select_backend(kind: BackendKind, dim: usize) -> BackendKind {
    match kind {
        BackendKind::Auto if dim >= ARRAY_BACKEND_THRESHOLD => BackendKind::Array,
        BackendKind::Auto => BackendKind::Nested,
        concrete => concrete,
    }
}

/// Matrix whose layout is chosen at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DispatchMatrix<S = BigInt> {
    Nested(NestedMatrix<S>),
    Array(ArrayMatrix<S>),
}

impl<S: Scalar> DispatchMatrix<S> {
    /// Identity of `dim` in the layout `kind` resolves to.
    pub fn with_kind(kind: BackendKind, dim: usize) -> Self {
        match select_backend(kind, dim) {
            BackendKind::Array => DispatchMatrix::Array(ArrayMatrix::identity(dim)),
            _ => DispatchMatrix::Nested(NestedMatrix::identity(dim)),
        }
    }

    /// The concrete layout in use.
    pub fn kind(&self) -> BackendKind {
        match self {
            DispatchMatrix::Nested(_) => BackendKind::Nested,
            DispatchMatrix::Array(_) => BackendKind::Array,
        }
    }

    fn as_nested(&self) -> Cow<'_, NestedMatrix<S>> {
        match self {
            DispatchMatrix::Nested(n) => Cow::Borrowed(n),
            DispatchMatrix::Array(a) => {
                Cow::Owned(NestedMatrix::from_fn(a.dim(), |r, c| a.get(r, c).clone()))
            }
        }
    }

    fn as_array(&self) -> Cow<'_, ArrayMatrix<S>> {
        match self {
            DispatchMatrix::Array(a) => Cow::Borrowed(a),
            DispatchMatrix::Nested(n) => {
                Cow::Owned(ArrayMatrix::from_fn(n.dim(), |r, c| n.get(r, c).clone()))
            }
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            DispatchMatrix::Nested($m) => $body,
            DispatchMatrix::Array($m) => $body,
        }
    };
}

impl<S: Scalar> MatrixBackend for DispatchMatrix<S> {
    type Scalar = S;

    fn identity(dim: usize) -> Self {
        Self::with_kind(BackendKind::Auto, dim)
    }

    fn dim(&self) -> usize {
        dispatch!(self, m => m.dim())
    }

    fn get(&self, row: usize, col: usize) -> &S {
        dispatch!(self, m => m.get(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: S) {
        dispatch!(self, m => m.set(row, col, value))
    }

    fn row_add(&mut self, axis: usize, op: Op) -> Result<()> {
        dispatch!(self, m => m.row_add(axis, op))
    }

    fn col_add(&mut self, axis: usize, op: Op) -> Result<()> {
        dispatch!(self, m => m.col_add(axis, op))
    }

    /// The product takes the receiver's layout.
    fn matmul(&self, rhs: &Self) -> Result<Self> {
        match self {
            DispatchMatrix::Nested(l) => Ok(DispatchMatrix::Nested(l.matmul(&rhs.as_nested())?)),
            DispatchMatrix::Array(l) => Ok(DispatchMatrix::Array(l.matmul(&rhs.as_array())?)),
        }
    }

    fn grow(&mut self) {
        dispatch!(self, m => m.grow())
    }

    fn truncate(&mut self) {
        dispatch!(self, m => m.truncate())
    }

    fn swap_axes(&mut self, a: usize, b: usize) {
        dispatch!(self, m => m.swap_axes(a, b))
    }

    /// Keeps the current layout instead of re-running selection.
    fn reset(&mut self, dim: usize) {
        *self = match self {
            DispatchMatrix::Nested(_) => DispatchMatrix::Nested(NestedMatrix::identity(dim)),
            DispatchMatrix::Array(_) => DispatchMatrix::Array(ArrayMatrix::identity(dim)),
        };
    }
}
