//! `Deque`, iteration, comparison and `Debug` for the concrete holodeques.

use std::cmp::Ordering;
use std::fmt;

use crate::axis::{AxisResolver, Element};
use crate::core::{BinaryDeque, HolodequeCore, Side};
use crate::error::Result;
use crate::matrix::{MatrixBackend, Scalar};
use crate::sequence::{Deque, Iter};

impl<T, R, B> Deque<T> for HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn len(&self) -> usize {
        self.size
    }

    fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    fn accepts(&self, element: &T) -> bool {
        self.resolver.accepts(element)
    }

    fn contains(&self, element: &T) -> bool {
        HolodequeCore::contains(self, element)
    }

    fn push(&mut self, side: Side, element: T) -> Result<()> {
        HolodequeCore::push(self, side, element)
    }

    fn pop(&mut self, side: Side) -> Result<T> {
        HolodequeCore::pop(self, side)
    }

    fn peek(&self, side: Side) -> Result<T> {
        HolodequeCore::peek(self, side).cloned()
    }

    fn clear(&mut self) {
        HolodequeCore::clear(self)
    }
}

impl<S: Scalar> Deque<bool> for BinaryDeque<S> {
    fn len(&self) -> usize {
        BinaryDeque::len(self)
    }

    fn maxlen(&self) -> Option<usize> {
        BinaryDeque::maxlen(self)
    }

    fn accepts(&self, _element: &bool) -> bool {
        true
    }

    fn contains(&self, element: &bool) -> bool {
        BinaryDeque::contains(self, *element)
    }

    fn push(&mut self, side: Side, element: bool) -> Result<()> {
        BinaryDeque::push(self, side, element)
    }

    fn pop(&mut self, side: Side) -> Result<bool> {
        BinaryDeque::pop(self, side)
    }

    fn peek(&self, side: Side) -> Result<bool> {
        BinaryDeque::peek(self, side)
    }

    fn clear(&mut self) {
        BinaryDeque::clear(self)
    }

    fn reverse(&mut self) -> Result<()> {
        BinaryDeque::reverse(self);
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────────
// Iteration
// ──────────────────────────────────────────────────────────────

impl<'a, T, R, B> IntoIterator for &'a HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    type Item = T;
    type IntoIter = Iter<HolodequeCore<T, R, B>, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.clone())
    }
}

impl<T, R, B> IntoIterator for HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    type Item = T;
    type IntoIter = Iter<HolodequeCore<T, R, B>, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, S: Scalar> IntoIterator for &'a BinaryDeque<S> {
    type Item = bool;
    type IntoIter = Iter<BinaryDeque<S>, bool>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.clone())
    }
}

impl<S: Scalar> IntoIterator for BinaryDeque<S> {
    type Item = bool;
    type IntoIter = Iter<BinaryDeque<S>, bool>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

// ──────────────────────────────────────────────────────────────
// Comparison and formatting over the materialised sequence
// ──────────────────────────────────────────────────────────────

fn write_sequence<T: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
    maxlen: Option<usize>,
) -> fmt::Result {
    write!(f, "holodeque(")?;
    f.debug_list().entries(items).finish()?;
    if let Some(maxlen) = maxlen {
        write!(f, ", maxlen={maxlen}")?;
    }
    write!(f, ")")
}

impl<T, R, B> PartialEq for HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T, R, B> Eq for HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
}

impl<T, R, B> PartialOrd for HolodequeCore<T, R, B>
where
    T: Element + Ord,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, R, B> Ord for HolodequeCore<T, R, B>
where
    T: Element + Ord,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl<T, R, B> fmt::Debug for HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter(), self.maxlen)
    }
}

/// Equal matrices are equal sequences, so the 2×2 state is compared directly.
impl<S: Scalar> PartialEq for BinaryDeque<S> {
    fn eq(&self, other: &Self) -> bool {
        self.matrix() == other.matrix()
    }
}

impl<S: Scalar> Eq for BinaryDeque<S> {}

impl<S: Scalar> PartialOrd for BinaryDeque<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Scalar> Ord for BinaryDeque<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl<S: Scalar> fmt::Debug for BinaryDeque<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter(), BinaryDeque::maxlen(self))
    }
}
