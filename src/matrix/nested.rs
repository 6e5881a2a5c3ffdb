//! Nested-row matrix storage (`Vec<Vec<S>>`).
//!
//! For the small shapes a holodeque normally runs at, plain nested rows beat
//! array storage: no view construction, no stride arithmetic.

use num_bigint::BigInt;

use crate::error::{HolodequeError, Result};
use crate::matrix::{checked_dot, MatrixBackend, Op, Scalar};

/// Row-major nested-vector matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NestedMatrix<S = BigInt> {
    rows: Vec<Vec<S>>,
}

impl<S: Scalar> MatrixBackend for NestedMatrix<S> {
    type Scalar = S;

    fn identity(dim: usize) -> Self {
        let rows = (0..dim)
            .map(|i| {
                (0..dim)
                    .map(|j| if i == j { S::one() } else { S::zero() })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    fn dim(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, row: usize, col: usize) -> &S {
        &self.rows[row][col]
    }

    fn set(&mut self, row: usize, col: usize, value: S) {
        self.rows[row][col] = value;
    }

    fn row_add(&mut self, axis: usize, op: Op) -> Result<()> {
        let mut updated = self.rows[axis].clone();
        for (i, row) in self.rows.iter().enumerate() {
            if i == axis {
                continue;
            }
            for (dst, src) in updated.iter_mut().zip(row) {
                *dst = op
                    .apply(dst, src)
                    .ok_or(HolodequeError::Overflow("row transform"))?;
            }
        }
        self.rows[axis] = updated;
        Ok(())
    }

    fn col_add(&mut self, axis: usize, op: Op) -> Result<()> {
        // Validate every cell first so a failure writes nothing.
        for row in &self.rows {
            let pivot = &row[axis];
            for (j, v) in row.iter().enumerate() {
                if j != axis && op.apply(v, pivot).is_none() {
                    return Err(HolodequeError::Overflow("column transform"));
                }
            }
        }
        for row in &mut self.rows {
            let pivot = row[axis].clone();
            for (j, v) in row.iter_mut().enumerate() {
                if j != axis {
                    op.apply_in_place(v, pivot.clone());
                }
            }
        }
        Ok(())
    }

    fn matmul(&self, rhs: &Self) -> Result<Self> {
        let n = self.dim();
        let mut rows = Vec::with_capacity(n);
        for lhs_row in &self.rows {
            let mut out = Vec::with_capacity(n);
            for col in 0..n {
                let cell = checked_dot(lhs_row, rhs.rows.iter().map(|r| &r[col]))
                    .ok_or(HolodequeError::Overflow("matrix product"))?;
                out.push(cell);
            }
            rows.push(out);
        }
        Ok(Self { rows })
    }

    fn grow(&mut self) {
        let n = self.dim();
        for row in &mut self.rows {
            let last = row[n - 1].clone();
            row.push(last);
        }
        self.rows[n - 1][n] = S::zero();
        let mut unit = vec![S::zero(); n + 1];
        unit[n] = S::one();
        self.rows.push(unit);
    }

    fn truncate(&mut self) {
        self.rows.pop();
        for row in &mut self.rows {
            row.pop();
        }
    }

    fn swap_axes(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.rows.swap(a, b);
        for row in &mut self.rows {
            row.swap(a, b);
        }
    }

    fn to_rows(&self) -> Vec<Vec<S>> {
        self.rows.clone()
    }
}
