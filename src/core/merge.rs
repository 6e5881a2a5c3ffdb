//! Concatenation by matrix product.
//!
//! A holodeque holding `x₁ … xₙ` is the product `L_{x₁} ⋯ L_{xₙ}`, so
//! appending another holodeque's sequence is one multiplication:
//! `self × other` on the right, `other × self` on the left.

use std::borrow::Cow;

use num_traits::{One, Zero};
use tracing::debug;

use crate::axis::{AxisResolver, Element};
use crate::core::holodeque::HolodequeCore;
use crate::core::transform::Side;
use crate::error::{HolodequeError, Result};
use crate::matrix::MatrixBackend;

/// Lay `other` out in a `dim`-axis table.
///
/// `map[other_axis]` is the target axis. Target axes nothing maps to belong
/// to elements `other` never held: their rows are unit rows and their
/// columns copy `other`'s sentinel column.
fn embed<B: MatrixBackend>(
    other: &B,
    map: &[Option<usize>],
    sentinel: Option<usize>,
    dim: usize,
) -> B {
    let mut source = vec![None; dim];
    for (axis, target) in map.iter().enumerate() {
        if let Some(target) = *target {
            source[target] = Some(axis);
        }
    }
    let unit = |r: usize, c: usize| {
        if r == c {
            B::Scalar::one()
        } else {
            B::Scalar::zero()
        }
    };
    B::from_fn(dim, |r, c| match (source[r], source[c], sentinel) {
        (None, _, _) => unit(r, c),
        (Some(pr), Some(pc), _) => other.get(pr, pc).clone(),
        (Some(pr), None, Some(s)) => other.get(pr, s).clone(),
        (Some(_), None, None) => unit(r, c),
    })
}

impl<T, R, B> HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn check_capacity(&self, required: usize) -> Result<()> {
        match self.maxlen {
            Some(maxlen) if required > maxlen => {
                Err(HolodequeError::CapacityExceeded { required, maxlen })
            }
            _ => Ok(()),
        }
    }

    /// Concatenate `other`'s sequence onto `side` of this one.
    ///
    /// Fixed alphabets must be equal as sets; a different axis order is
    /// remapped. A growable receiver admits the elements only `other` holds.
    /// Nothing changes when a check fails.
    pub fn merge(&mut self, side: Side, other: &Self) -> Result<()> {
        self.check_capacity(self.size.saturating_add(other.size))?;
        let plan = self.resolver.align(&other.resolver)?;

        let lhs: Cow<'_, B> = if plan.grown == 0 {
            Cow::Borrowed(&self.matrix)
        } else {
            let mut grown = self.matrix.clone();
            for _ in 0..plan.grown {
                grown.grow();
            }
            Cow::Owned(grown)
        };
        let dim = lhs.dim();
        let rhs: Cow<'_, B> = if plan.is_identity() && other.matrix.dim() == dim {
            Cow::Borrowed(&other.matrix)
        } else {
            Cow::Owned(embed(
                &other.matrix,
                &plan.map,
                other.resolver.sentinel(),
                dim,
            ))
        };
        debug!(?side, map = ?plan.map, grown = plan.grown, "merge");

        let product = match side {
            Side::Right => lhs.matmul(&rhs)?,
            Side::Left => rhs.matmul(&lhs)?,
        };
        self.matrix = product;
        self.resolver = plan.resolver;
        self.size += other.size;
        Ok(())
    }

    pub fn merge_left(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Left, other)
    }

    pub fn merge_right(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Right, other)
    }

    /// Extend with `other`'s sequence at `side`, kept in its own order.
    ///
    /// This is a merge: one product instead of `other.len()` pushes, and a
    /// bounded receiver refuses with `CapacityExceeded` rather than evicting.
    pub fn extend_from(&mut self, side: Side, other: &Self) -> Result<()> {
        self.merge(side, other)
    }

    pub fn extend_left_from(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Left, other)
    }

    pub fn extend_right_from(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Right, other)
    }

    /// Concatenate the sequence with itself. The square is computed into a
    /// scratch buffer before it replaces the state.
    pub fn merge_self(&mut self) -> Result<()> {
        self.check_capacity(self.size.saturating_mul(2))?;
        let square = self.matrix.matmul(&self.matrix)?;
        debug!(size = self.size, "self merge");
        self.matrix = square;
        self.size *= 2;
        Ok(())
    }

    /// New holodeque holding this sequence followed by `other`'s.
    pub fn concat(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.merge_right(other)?;
        Ok(out)
    }

    /// New holodeque holding this sequence `count` times over.
    pub fn repeat(&self, count: usize) -> Result<Self> {
        let mut out = self.clone();
        out.repeat_in_place(count)?;
        Ok(out)
    }

    /// Replace the sequence with `count` copies of itself, by exponentiation
    /// by squaring of the matrix. `count == 0` empties the holodeque.
    pub fn repeat_in_place(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            self.clear();
            return Ok(());
        }
        let required = self.size.saturating_mul(count);
        self.check_capacity(required)?;
        if count == 1 || self.size == 0 {
            return Ok(());
        }
        let mut result: Option<B> = None;
        let mut base = self.matrix.clone();
        let mut n = count;
        loop {
            if n & 1 == 1 {
                result = Some(match result {
                    Some(acc) => acc.matmul(&base)?,
                    None => base.clone(),
                });
            }
            n >>= 1;
            if n == 0 {
                break;
            }
            base = base.matmul(&base)?;
        }
        debug!(count, size = required, "repeat");
        if let Some(power) = result {
            self.matrix = power;
        }
        self.size = required;
        Ok(())
    }
}
