//! `ndarray`-backed matrix storage.
//!
//! Row and column updates run as whole-lane array arithmetic, which pays off
//! once the alphabet is large enough that per-cell indexing dominates.

use ndarray::{s, Array2, Axis};
use num_bigint::BigInt;

use crate::error::{HolodequeError, Result};
use crate::matrix::{checked_dot, MatrixBackend, Op, Scalar};

/// Dense `Array2` matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArrayMatrix<S = BigInt> {
    data: Array2<S>,
}

impl<S: Scalar> MatrixBackend for ArrayMatrix<S> {
    type Scalar = S;

    fn identity(dim: usize) -> Self {
        Self {
            data: Array2::eye(dim),
        }
    }

    fn dim(&self) -> usize {
        self.data.nrows()
    }

    fn get(&self, row: usize, col: usize) -> &S {
        &self.data[[row, col]]
    }

    fn set(&mut self, row: usize, col: usize, value: S) {
        self.data[[row, col]] = value;
    }

    fn row_add(&mut self, axis: usize, op: Op) -> Result<()> {
        let mut updated = self.data.row(axis).to_owned();
        for (i, row) in self.data.axis_iter(Axis(0)).enumerate() {
            if i == axis {
                continue;
            }
            for (dst, src) in updated.iter_mut().zip(row.iter()) {
                *dst = op
                    .apply(dst, src)
                    .ok_or(HolodequeError::Overflow("row transform"))?;
            }
        }
        self.data.row_mut(axis).assign(&updated);
        Ok(())
    }

    fn col_add(&mut self, axis: usize, op: Op) -> Result<()> {
        for row in self.data.rows() {
            let pivot = &row[axis];
            let overflow = row
                .iter()
                .enumerate()
                .any(|(j, v)| j != axis && op.apply(v, pivot).is_none());
            if overflow {
                return Err(HolodequeError::Overflow("column transform"));
            }
        }
        let pivot = self.data.column(axis).to_owned();
        for (j, mut col) in self.data.columns_mut().into_iter().enumerate() {
            if j == axis {
                continue;
            }
            match op {
                Op::Add => col += &pivot,
                Op::Sub => col -= &pivot,
            }
        }
        Ok(())
    }

    fn matmul(&self, rhs: &Self) -> Result<Self> {
        let n = self.dim();
        let mut out = Array2::<S>::zeros((n, n));
        for ((i, j), cell) in out.indexed_iter_mut() {
            *cell = checked_dot(self.data.row(i), rhs.data.column(j))
                .ok_or(HolodequeError::Overflow("matrix product"))?;
        }
        Ok(Self { data: out })
    }

    fn grow(&mut self) {
        let n = self.dim();
        let mut grown = Array2::<S>::zeros((n + 1, n + 1));
        grown.slice_mut(s![..n, ..n]).assign(&self.data);
        grown
            .slice_mut(s![..n, n])
            .assign(&self.data.column(n - 1));
        grown[[n - 1, n]] = S::zero();
        grown[[n, n]] = S::one();
        self.data = grown;
    }

    fn truncate(&mut self) {
        let n = self.dim();
        self.data = self.data.slice(s![..n - 1, ..n - 1]).to_owned();
    }

    fn swap_axes(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.dim();
        for k in 0..n {
            self.data.swap([a, k], [b, k]);
        }
        for k in 0..n {
            self.data.swap([k, a], [k, b]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::NestedMatrix;

    /// Apply the same transform script to both layouts.
    fn script<B: MatrixBackend<Scalar = i64>>(m: &mut B) {
        m.row_add(2, Op::Add).unwrap();
        m.col_add(0, Op::Add).unwrap();
        m.row_add(1, Op::Add).unwrap();
        m.col_add(2, Op::Add).unwrap();
    }

    #[test]
    fn test_matches_nested_layout() {
        let mut a = ArrayMatrix::<i64>::identity(3);
        let mut n = NestedMatrix::<i64>::identity(3);
        script(&mut a);
        script(&mut n);
        assert_eq!(a.to_rows(), n.to_rows());
        assert_eq!(
            a.matmul(&a).unwrap().to_rows(),
            n.matmul(&n).unwrap().to_rows()
        );
    }

    #[test]
    fn test_inverse_transforms() {
        let mut m = ArrayMatrix::<i64>::identity(4);
        m.col_add(3, Op::Add).unwrap();
        m.row_add(1, Op::Add).unwrap();
        m.row_add(1, Op::Sub).unwrap();
        m.col_add(3, Op::Sub).unwrap();
        assert!(m.is_identity());
    }

    #[test]
    fn test_grow_matches_nested() {
        let mut a = ArrayMatrix::<i64>::identity(2);
        let mut n = NestedMatrix::<i64>::identity(2);
        a.col_add(0, Op::Add).unwrap();
        n.col_add(0, Op::Add).unwrap();
        a.grow();
        n.grow();
        assert_eq!(a.to_rows(), n.to_rows());
        a.swap_axes(0, 2);
        n.swap_axes(0, 2);
        assert_eq!(a.to_rows(), n.to_rows());
        a.truncate();
        n.truncate();
        assert_eq!(a.to_rows(), n.to_rows());
    }

    #[test]
    fn test_row_overflow_writes_nothing() {
        let mut m = ArrayMatrix::<i64>::identity(2);
        m.set(1, 0, i64::MAX);
        let before = m.clone();
        assert!(m.row_add(0, Op::Add).is_err());
        assert_eq!(m, before);
    }
}
