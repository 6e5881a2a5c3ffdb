//! Elementary transforms and end-axis location.
//!
//! With `L_a` the identity plus a row of ones at row `a`:
//!
//! - `pushleft(a)`:  `M ← L_a · M`   (row `a` += every other row)
//! - `pushright(a)`: `M ← M · L_a`   (every other column += column `a`)
//!
//! Pops apply `L_a⁻¹` on the same side. A sequence `x₁ … xₙ` is therefore
//! encoded as `L_{x₁} ⋯ L_{xₙ}`, and concatenation is a matrix product.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::Result;
use crate::matrix::{MatrixBackend, Op};

/// End of a holodeque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

fn apply<B: MatrixBackend>(matrix: &mut B, side: Side, axis: usize, op: Op) -> Result<()> {
    trace!(?side, axis, ?op, "elementary transform");
    match side {
        Side::Left => matrix.row_add(axis, op),
        Side::Right => matrix.col_add(axis, op),
    }
}

/// Encode a push of the element at `axis`.
pub(crate) fn push<B: MatrixBackend>(matrix: &mut B, side: Side, axis: usize) -> Result<()> {
    apply(matrix, side, axis, Op::Add)
}

/// Undo the push of the element at `axis` on `side`.
pub(crate) fn pop<B: MatrixBackend>(matrix: &mut B, side: Side, axis: usize) -> Result<()> {
    apply(matrix, side, axis, Op::Sub)
}

/// First index holding the extreme value under `better`.
fn first_extreme<S: Ord>(
    values: impl Iterator<Item = S>,
    better: impl Fn(&S, &S) -> bool,
) -> usize {
    let mut best: Option<(usize, S)> = None;
    for (i, v) in values.enumerate() {
        match &best {
            Some((_, b)) if !better(&v, b) => {}
            _ => best = Some((i, v)),
        }
    }
    best.map_or(0, |(i, _)| i)
}

/// Axis of the leftmost element: the row holding the maximum of the last
/// column, first row on ties. Meaningless on an empty holodeque.
pub(crate) fn leftmost_axis<B: MatrixBackend>(matrix: &B) -> usize {
    let last = matrix.dim() - 1;
    let axis = first_extreme((0..matrix.dim()).map(|r| matrix.get(r, last)), |a, b| {
        a.cmp(b) == Ordering::Greater
    });
    trace!(axis, "leftmost axis");
    axis
}

/// Axis of the rightmost element: the leftmost axis for a single element,
/// otherwise the column holding the minimum of the leftmost axis's row,
/// first column on ties.
pub(crate) fn rightmost_axis<B: MatrixBackend>(matrix: &B, size: usize) -> usize {
    let left = leftmost_axis(matrix);
    if size == 1 {
        return left;
    }
    let axis = first_extreme((0..matrix.dim()).map(|c| matrix.get(left, c)), |a, b| {
        a.cmp(b) == Ordering::Less
    });
    trace!(axis, "rightmost axis");
    axis
}

/// Axis of the element at `side`.
pub(crate) fn locate<B: MatrixBackend>(matrix: &B, side: Side, size: usize) -> usize {
    match side {
        Side::Left => leftmost_axis(matrix),
        Side::Right => rightmost_axis(matrix, size),
    }
}
