//! Binary specialisation: a `{false, true}` holodeque on a 2×2 matrix.
//!
//! Every operation is a closed-form update or comparison of the four entries;
//! there is no axis scan and no loop over the shape.

use num_bigint::BigInt;
use tracing::debug;

use crate::axis::BinaryAxes;
use crate::core::transform::Side;
use crate::error::{HolodequeError, Result};
use crate::matrix::{Op, Scalar};

type Cells<S> = [[S; 2]; 2];

fn identity<S: Scalar>() -> Cells<S> {
    [[S::one(), S::zero()], [S::zero(), S::one()]]
}

fn product<S: Scalar>(a: &Cells<S>, b: &Cells<S>) -> Result<Cells<S>> {
    let cell = |r: usize, c: usize| -> Result<S> {
        a[r][0]
            .checked_mul(&b[0][c])
            .and_then(|x| x.checked_add(&a[r][1].checked_mul(&b[1][c])?))
            .ok_or(HolodequeError::Overflow("matrix product"))
    };
    Ok([[cell(0, 0)?, cell(0, 1)?], [cell(1, 0)?, cell(1, 1)?]])
}

/// Holodeque over the bits `false`/`true`.
#[derive(Clone)]
pub struct BinaryDeque<S = BigInt> {
    m: Cells<S>,
    size: usize,
    maxlen: Option<usize>,
}

impl<S: Scalar> Default for BinaryDeque<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> BinaryDeque<S> {
    pub fn new() -> Self {
        Self::with_maxlen(None)
    }

    pub fn with_maxlen(maxlen: Option<usize>) -> Self {
        Self {
            m: identity(),
            size: 0,
            maxlen,
        }
    }

    /// Binary holodeque filled with `bits`, left to right.
    pub fn from_items(bits: impl IntoIterator<Item = bool>, maxlen: Option<usize>) -> Result<Self> {
        let mut deque = Self::with_maxlen(maxlen);
        deque.extend_right(bits)?;
        Ok(deque)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    pub fn shape(&self) -> usize {
        2
    }

    pub fn alphabet(&self) -> Vec<bool> {
        vec![false, true]
    }

    /// Read-only view of the 2×2 state.
    pub fn matrix(&self) -> &[[S; 2]; 2] {
        &self.m
    }

    pub fn is_full(&self) -> bool {
        self.maxlen.is_some_and(|m| self.size >= m)
    }

    /// Row `i` ± row `1-i` (left end) or column `1-i` ± column `i` (right end).
    fn transform(&mut self, side: Side, bit: bool, op: Op) -> Result<()> {
        let i = BinaryAxes::axis(bit);
        let j = 1 - i;
        let overflow = || HolodequeError::Overflow("binary transform");
        match side {
            Side::Left => {
                let a = op.apply(&self.m[i][0], &self.m[j][0]).ok_or_else(overflow)?;
                let b = op.apply(&self.m[i][1], &self.m[j][1]).ok_or_else(overflow)?;
                self.m[i] = [a, b];
            }
            Side::Right => {
                let a = op.apply(&self.m[0][j], &self.m[0][i]).ok_or_else(overflow)?;
                let b = op.apply(&self.m[1][j], &self.m[1][i]).ok_or_else(overflow)?;
                self.m[0][j] = a;
                self.m[1][j] = b;
            }
        }
        Ok(())
    }

    /// Push `bit` at `side`, evicting from the opposite end when full.
    pub fn push(&mut self, side: Side, bit: bool) -> Result<()> {
        if self.maxlen == Some(0) {
            return Ok(());
        }
        let evicted = if self.is_full() {
            let item = self.pop(side.opposite())?;
            debug!(?side, evicted = item, "bounded push evicted from the opposite end");
            Some(item)
        } else {
            None
        };
        if let Err(err) = self.transform(side, bit, Op::Add) {
            if let Some(item) = evicted {
                self.transform(side.opposite(), item, Op::Add)?;
                self.size += 1;
            }
            return Err(err);
        }
        self.size += 1;
        Ok(())
    }

    pub fn push_left(&mut self, bit: bool) -> Result<()> {
        self.push(Side::Left, bit)
    }

    pub fn push_right(&mut self, bit: bool) -> Result<()> {
        self.push(Side::Right, bit)
    }

    pub fn peek(&self, side: Side) -> Result<bool> {
        if self.size == 0 {
            return Err(HolodequeError::empty("peek"));
        }
        let [[a, b], [c, d]] = &self.m;
        Ok(match side {
            Side::Left => d > b,
            Side::Right => (a > b && b >= d) || (c >= d && d > b),
        })
    }

    pub fn peek_left(&self) -> Result<bool> {
        self.peek(Side::Left)
    }

    pub fn peek_right(&self) -> Result<bool> {
        self.peek(Side::Right)
    }

    pub fn pop(&mut self, side: Side) -> Result<bool> {
        if self.size == 0 {
            return Err(HolodequeError::empty("pop"));
        }
        let bit = self.peek(side)?;
        self.transform(side, bit, Op::Sub)?;
        self.size -= 1;
        Ok(bit)
    }

    pub fn pop_left(&mut self) -> Result<bool> {
        self.pop(Side::Left)
    }

    pub fn pop_right(&mut self) -> Result<bool> {
        self.pop(Side::Right)
    }

    /// Push every bit at `side`, one at a time. To append another
    /// `BinaryDeque` in order use [`extend_from`](Self::extend_from).
    pub fn extend(&mut self, side: Side, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        for bit in bits {
            self.push(side, bit)?;
        }
        Ok(())
    }

    pub fn extend_left(&mut self, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        self.extend(Side::Left, bits)
    }

    pub fn extend_right(&mut self, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        self.extend(Side::Right, bits)
    }

    /// `bit` is present iff its off-diagonal entry is non-zero.
    pub fn contains(&self, bit: bool) -> bool {
        let i = BinaryAxes::axis(bit);
        !self.m[i][1 - i].is_zero()
    }

    pub fn clear(&mut self) {
        self.m = identity();
        self.size = 0;
    }

    /// Reverse in O(1) by swapping the main diagonal.
    pub fn reverse(&mut self) {
        let [top, bottom] = &mut self.m;
        std::mem::swap(&mut top[0], &mut bottom[1]);
    }

    /// Flip every bit in O(1) by swapping both diagonals.
    pub fn negate(&mut self) {
        let [top, bottom] = &mut self.m;
        std::mem::swap(&mut top[0], &mut bottom[1]);
        std::mem::swap(&mut top[1], &mut bottom[0]);
    }

    fn check_capacity(&self, required: usize) -> Result<()> {
        match self.maxlen {
            Some(maxlen) if required > maxlen => {
                Err(HolodequeError::CapacityExceeded { required, maxlen })
            }
            _ => Ok(()),
        }
    }

    /// Concatenate `other` onto `side`.
    pub fn merge(&mut self, side: Side, other: &Self) -> Result<()> {
        self.check_capacity(self.size.saturating_add(other.size))?;
        self.m = match side {
            Side::Right => product(&self.m, &other.m)?,
            Side::Left => product(&other.m, &self.m)?,
        };
        self.size += other.size;
        Ok(())
    }

    pub fn merge_left(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Left, other)
    }

    pub fn merge_right(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Right, other)
    }

    /// Extend with `other`'s bits in their own order; see
    /// [`HolodequeCore::extend_from`](crate::core::HolodequeCore::extend_from).
    pub fn extend_from(&mut self, side: Side, other: &Self) -> Result<()> {
        self.merge(side, other)
    }

    pub fn extend_left_from(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Left, other)
    }

    pub fn extend_right_from(&mut self, other: &Self) -> Result<()> {
        self.merge(Side::Right, other)
    }

    pub fn merge_self(&mut self) -> Result<()> {
        self.check_capacity(self.size.saturating_mul(2))?;
        self.m = product(&self.m, &self.m)?;
        self.size *= 2;
        Ok(())
    }

    pub fn concat(&self, other: &Self) -> Result<Self> {
        let mut out = self.clone();
        out.merge_right(other)?;
        Ok(out)
    }

    pub fn repeat(&self, count: usize) -> Result<Self> {
        let mut out = self.clone();
        out.repeat_in_place(count)?;
        Ok(out)
    }

    pub fn repeat_in_place(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            self.clear();
            return Ok(());
        }
        let required = self.size.saturating_mul(count);
        self.check_capacity(required)?;
        let mut result = identity();
        let mut base = self.m.clone();
        let mut n = count;
        while n > 0 {
            if n & 1 == 1 {
                result = product(&result, &base)?;
            }
            n >>= 1;
            if n > 0 {
                base = product(&base, &base)?;
            }
        }
        self.m = result;
        self.size = required;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Holodeque;
    use crate::matrix::MatrixBackend;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    fn drain(mut d: BinaryDeque) -> String {
        let mut out = String::new();
        while let Ok(b) = d.pop_left() {
            out.push(if b { '1' } else { '0' });
        }
        out
    }

    #[test]
    fn test_scenario_01010() {
        let mut d = BinaryDeque::<BigInt>::from_items(bits("01010"), None).unwrap();
        assert!(!d.peek_left().unwrap());
        assert!(!d.pop_left().unwrap());
        assert_eq!(drain(d), "1010");
    }

    #[test]
    fn test_matches_generic_core() {
        for seq in ["0", "1", "0011", "1101000", "111", "0101101110"] {
            let fast = BinaryDeque::<i64>::from_items(bits(seq), None).unwrap();
            let slow = Holodeque::<bool, crate::matrix::NestedMatrix<i64>>::from_items(
                [false, true],
                bits(seq),
                None,
            )
            .unwrap();
            let rows = slow.matrix().to_rows();
            assert_eq!(fast.matrix()[0].to_vec(), rows[0]);
            assert_eq!(fast.matrix()[1].to_vec(), rows[1]);
            assert_eq!(fast.peek_right().unwrap(), *slow.peek_right().unwrap());
            assert_eq!(fast.peek_left().unwrap(), *slow.peek_left().unwrap());
        }
    }

    #[test]
    fn test_pop_right() {
        let mut d = BinaryDeque::<BigInt>::from_items(bits("10011"), None).unwrap();
        assert!(d.pop_right().unwrap());
        assert!(d.pop_right().unwrap());
        assert!(!d.pop_right().unwrap());
        assert_eq!(drain(d), "10");
    }

    #[test]
    fn test_empty() {
        let mut d = BinaryDeque::<BigInt>::new();
        assert!(matches!(d.peek_right(), Err(HolodequeError::EmptyCollection { .. })));
        assert!(matches!(d.pop_left(), Err(HolodequeError::EmptyCollection { .. })));
    }

    #[test]
    fn test_reverse_and_negate() {
        let mut d = BinaryDeque::<BigInt>::from_items(bits("0010111"), None).unwrap();
        d.reverse();
        let expected = BinaryDeque::<BigInt>::from_items(bits("1110100"), None).unwrap();
        assert_eq!(d.matrix(), expected.matrix());
        d.negate();
        assert_eq!(drain(d), "0001011");
    }

    #[test]
    fn test_contains() {
        let d = BinaryDeque::<BigInt>::from_items(bits("000"), None).unwrap();
        assert!(d.contains(false));
        assert!(!d.contains(true));
        assert!(!BinaryDeque::<BigInt>::new().contains(false));
    }

    #[test]
    fn test_bounded() {
        let mut d = BinaryDeque::<BigInt>::from_items(bits("0110"), Some(3)).unwrap();
        assert_eq!(d.len(), 3);
        d.push_left(false).unwrap();
        assert_eq!(drain(d), "011");
    }

    #[test]
    fn test_merge_and_repeat() {
        let a = BinaryDeque::<BigInt>::from_items(bits("01"), None).unwrap();
        let b = BinaryDeque::<BigInt>::from_items(bits("110"), None).unwrap();
        assert_eq!(drain(a.concat(&b).unwrap()), "01110");
        let mut left = a.clone();
        left.merge_left(&b).unwrap();
        assert_eq!(drain(left), "11001");
        let mut sq = b.clone();
        sq.merge_self().unwrap();
        assert_eq!(drain(sq), "110110");
        assert_eq!(drain(a.repeat(3).unwrap()), "010101");
        assert!(a.repeat(0).unwrap().is_empty());
    }

    #[test]
    fn test_extend_from_keeps_order() {
        let b = BinaryDeque::<BigInt>::from_items(bits("110"), None).unwrap();
        let mut a = BinaryDeque::<BigInt>::from_items(bits("01"), None).unwrap();
        a.extend_left_from(&b).unwrap();
        assert_eq!(drain(a), "11001");

        let mut bounded = BinaryDeque::<BigInt>::from_items(bits("01"), Some(4)).unwrap();
        assert!(matches!(
            bounded.extend_right_from(&b),
            Err(HolodequeError::CapacityExceeded { required: 5, maxlen: 4 })
        ));
        assert_eq!(drain(bounded), "01");
    }

    #[test]
    fn test_capacity() {
        let mut a = BinaryDeque::<BigInt>::from_items(bits("01"), Some(3)).unwrap();
        let b = a.clone();
        assert!(matches!(
            a.merge_right(&b),
            Err(HolodequeError::CapacityExceeded { .. })
        ));
        assert!(a.repeat(2).is_err());
        assert_eq!(a.len(), 2);
    }
}
