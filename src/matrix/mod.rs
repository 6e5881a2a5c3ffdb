//! Square integer matrices that carry a holodeque's state.
//!
//! The matrix is a state-encoding device, not a linear-algebra type: the
//! only operations are the ones the encoding needs.
//!
//! - **Elementary transforms**: `row_add` (row `a` ± every other row) and
//!   `col_add` (every other column ± column `a`)
//! - **Product**: `matmul`, used by merges and repeats
//! - **Reshape**: `grow` / `truncate` / `swap_axes`, used by the growable variant
//!
//! Two storage layouts are provided:
//! - [`NestedMatrix`]: `Vec<Vec<S>>`, fastest for small shapes (default)
//! - [`ArrayMatrix`]: `ndarray::Array2<S>`, vectorised row/column arithmetic
//!
//! [`DispatchMatrix`] picks between them at construction time.

use std::fmt;
use std::hash::Hash;
use std::ops::{AddAssign, SubAssign};

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};

use crate::error::Result;

pub mod array;
pub mod dispatch;
pub mod nested;

pub use array::ArrayMatrix;
pub use dispatch::{select_backend, BackendKind, DispatchMatrix};
pub use nested::NestedMatrix;

/// Integer-like matrix entry.
///
/// Implemented for `i64`, `i128` and `num_bigint::BigInt`. Fixed-width types
/// report [`HolodequeError::Overflow`](crate::HolodequeError::Overflow) instead
/// of wrapping; `BigInt` never overflows.
pub trait Scalar:
    Clone
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + Zero
    + One
    + CheckedAdd
    + CheckedSub
    + CheckedMul
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
{
}

impl<S> Scalar for S where
    S: Clone
        + Ord
        + Hash
        + fmt::Debug
        + fmt::Display
        + Zero
        + One
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + AddAssign
        + SubAssign
        + Send
        + Sync
        + 'static
{
}

/// Direction of an elementary transform: `Add` encodes a push, `Sub` its pop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
}

impl Op {
    /// Checked `lhs ± rhs`.
    #[inline]
    pub fn apply<S: Scalar>(self, lhs: &S, rhs: &S) -> Option<S> {
        match self {
            Op::Add => lhs.checked_add(rhs),
            Op::Sub => lhs.checked_sub(rhs),
        }
    }

    /// Unchecked in-place `lhs ±= rhs`, for values already validated.
    #[inline]
    pub fn apply_in_place<S: Scalar>(self, lhs: &mut S, rhs: S) {
        match self {
            Op::Add => *lhs += rhs,
            Op::Sub => *lhs -= rhs,
        }
    }
}

/// Checked dot product of two equally long sequences.
pub fn checked_dot<'a, S: Scalar>(
    lhs: impl IntoIterator<Item = &'a S>,
    rhs: impl IntoIterator<Item = &'a S>,
) -> Option<S> {
    lhs.into_iter()
        .zip(rhs)
        .try_fold(S::zero(), |acc, (a, b)| acc.checked_add(&a.checked_mul(b)?))
}

/// Storage for the square matrix behind a holodeque.
///
/// Elementary transforms are atomic: they either apply completely or return
/// an error without writing anything.
pub trait MatrixBackend: Clone + fmt::Debug + PartialEq + Eq + Hash {
    type Scalar: Scalar;

    /// `dim × dim` identity matrix (the empty sequence).
    fn identity(dim: usize) -> Self;

    /// Matrix dimension (the shape `k`).
    fn dim(&self) -> usize;

    fn get(&self, row: usize, col: usize) -> &Self::Scalar;

    fn set(&mut self, row: usize, col: usize, value: Self::Scalar);

    /// Row `axis` ± every other row. Left-multiplication by the elementary
    /// matrix of `axis` (or its inverse).
    fn row_add(&mut self, axis: usize, op: Op) -> Result<()>;

    /// Every other column ± column `axis`. Right-multiplication by the
    /// elementary matrix of `axis` (or its inverse).
    fn col_add(&mut self, axis: usize, op: Op) -> Result<()>;

    /// `self × rhs` into a fresh buffer.
    fn matmul(&self, rhs: &Self) -> Result<Self>;

    /// Append one axis that behaves like a never-pushed element: the new
    /// column copies the last column except for a zero on the old last row,
    /// the new row is the unit row.
    fn grow(&mut self);

    /// Drop the last row and column.
    fn truncate(&mut self);

    /// Swap rows `a`/`b` and columns `a`/`b`.
    fn swap_axes(&mut self, a: usize, b: usize);

    /// Reset to the identity of `dim`, keeping the storage layout.
    fn reset(&mut self, dim: usize) {
        *self = Self::identity(dim);
    }

    /// Build a matrix from a cell function.
    fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> Self::Scalar) -> Self {
        let mut m = Self::identity(dim);
        for row in 0..dim {
            for col in 0..dim {
                m.set(row, col, f(row, col));
            }
        }
        m
    }

    /// Whether row `axis` equals the unit row `e_axis`.
    fn is_unit_row(&self, axis: usize) -> bool {
        (0..self.dim()).all(|col| {
            let v = self.get(axis, col);
            if col == axis {
                v.is_one()
            } else {
                v.is_zero()
            }
        })
    }

    fn is_identity(&self) -> bool {
        (0..self.dim()).all(|axis| self.is_unit_row(axis))
    }

    /// Copy out as nested rows (layout-independent view for comparisons).
    fn to_rows(&self) -> Vec<Vec<Self::Scalar>> {
        (0..self.dim())
            .map(|row| (0..self.dim()).map(|col| self.get(row, col).clone()).collect())
            .collect()
    }
}
