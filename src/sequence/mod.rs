//! Sequence-style access built on the four end operations.
//!
//! Nothing here touches a matrix. Rotation, positional access and search
//! move elements from one end to the other with pop/push pairs and put
//! them back afterwards, so every operation costs O(size · k²) at worst.

use std::cmp::Ordering;
use std::fmt;

use crate::core::Side;
use crate::error::{HolodequeError, Result};

pub mod impls;
pub mod iter;

pub use iter::Iter;

/// A double-ended queue driven entirely through its two ends.
///
/// Implementors supply push/pop/peek; everything else is derived.
pub trait Deque<T: PartialEq + fmt::Debug>: Clone {
    fn len(&self) -> usize;

    fn maxlen(&self) -> Option<usize>;

    /// Whether `element` may be pushed.
    fn accepts(&self, element: &T) -> bool;

    fn contains(&self, element: &T) -> bool;

    fn push(&mut self, side: Side, element: T) -> Result<()>;

    fn pop(&mut self, side: Side) -> Result<T>;

    fn peek(&self, side: Side) -> Result<T>;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the element at `from` to the opposite end.
    fn shift(&mut self, from: Side) -> Result<()> {
        let element = self.pop(from)?;
        self.push(from.opposite(), element)
    }

    /// Rotate `n` steps to the right (left when negative), taking whichever
    /// direction needs fewer moves.
    fn rotate(&mut self, n: isize) -> Result<()> {
        let len = self.len();
        if len <= 1 {
            return Ok(());
        }
        let len = len as isize;
        let half = len / 2;
        let mut n = n;
        if n > half || n < -half {
            n = n.rem_euclid(len);
            if n > half {
                n -= len;
            }
        }
        let from = if n > 0 { Side::Right } else { Side::Left };
        for _ in 0..n.unsigned_abs() {
            self.shift(from)?;
        }
        Ok(())
    }

    /// Resolve a possibly negative index against the current length.
    fn position(&self, index: isize) -> Result<usize> {
        let len = self.len();
        if len == 0 {
            return Err(HolodequeError::empty("index"));
        }
        let resolved = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(HolodequeError::OutOfRange { index, size: len });
        }
        Ok(resolved as usize)
    }

    /// Bring `steps` elements from `side` round to the other end, run `f`
    /// at `side`, then move them back.
    fn with_end<U>(
        &mut self,
        side: Side,
        steps: usize,
        f: impl FnOnce(&mut Self, Side) -> Result<U>,
    ) -> Result<U> {
        for _ in 0..steps {
            self.shift(side)?;
        }
        let out = f(self, side);
        for _ in 0..steps {
            self.shift(side.opposite())?;
        }
        out
    }

    /// End nearer to `position` and the number of elements in front of it.
    fn nearer_end(&self, position: usize) -> (Side, usize) {
        let len = self.len();
        if position <= len / 2 {
            (Side::Left, position)
        } else {
            (Side::Right, len - 1 - position)
        }
    }

    /// Element at `index`; walks a private copy towards the nearer end.
    fn get(&self, index: isize) -> Result<T> {
        let position = self.position(index)?;
        let (side, steps) = self.nearer_end(position);
        let mut copy = self.clone();
        for _ in 0..steps {
            copy.pop(side)?;
        }
        copy.peek(side)
    }

    /// Replace the element at `index`.
    fn set(&mut self, index: isize, element: T) -> Result<()> {
        let position = self.position(index)?;
        if !self.accepts(&element) {
            return Err(HolodequeError::invalid_element(&element));
        }
        let (side, steps) = self.nearer_end(position);
        self.with_end(side, steps, |d, side| {
            d.pop(side)?;
            d.push(side, element)
        })
    }

    /// Remove and return the element at `index`.
    fn delete(&mut self, index: isize) -> Result<T> {
        let position = self.position(index)?;
        let (side, steps) = self.nearer_end(position);
        self.with_end(side, steps, |d, side| d.pop(side))
    }

    /// Insert before `index`, clamping like list insertion. A full bounded
    /// holodeque refuses.
    fn insert(&mut self, index: isize, element: T) -> Result<()> {
        let len = self.len();
        if let Some(maxlen) = self.maxlen() {
            if len >= maxlen {
                return Err(HolodequeError::CapacityExceeded {
                    required: len + 1,
                    maxlen,
                });
            }
        }
        if !self.accepts(&element) {
            return Err(HolodequeError::invalid_element(&element));
        }
        let position = if index < 0 {
            (index + len as isize).max(0) as usize
        } else {
            (index as usize).min(len)
        };
        let (side, steps) = if position <= len / 2 {
            (Side::Left, position)
        } else {
            (Side::Right, len - position)
        };
        self.with_end(side, steps, |d, side| d.push(side, element))
    }

    /// Remove the first occurrence of `element`. Order is unchanged when it
    /// is absent.
    fn remove(&mut self, element: &T) -> Result<()> {
        if !self.accepts(element) {
            return Err(HolodequeError::invalid_element(element));
        }
        if !self.contains(element) {
            return Err(HolodequeError::not_found(element));
        }
        let mut moved = 0;
        let mut found = false;
        while moved < self.len() {
            if self.peek(Side::Left)? == *element {
                self.pop(Side::Left)?;
                found = true;
                break;
            }
            self.shift(Side::Left)?;
            moved += 1;
        }
        for _ in 0..moved {
            self.shift(Side::Right)?;
        }
        if found {
            Ok(())
        } else {
            Err(HolodequeError::not_found(element))
        }
    }

    /// Occurrences of `element`.
    fn count(&self, element: &T) -> usize {
        if !self.contains(element) {
            return 0;
        }
        self.iter().filter(|x| x == element).count()
    }

    /// Position of the first `element` within `start..stop`. Bounds follow
    /// slice conventions: negatives count from the end, both are clamped.
    /// A value the alphabet rejects is `InvalidElement`, not `NotFound`.
    fn index(&self, element: &T, start: Option<isize>, stop: Option<isize>) -> Result<usize> {
        if !self.accepts(element) {
            return Err(HolodequeError::invalid_element(element));
        }
        let len = self.len() as isize;
        let clamp = |bound: isize| {
            let b = if bound < 0 { bound + len } else { bound };
            b.clamp(0, len) as usize
        };
        let start = start.map_or(0, clamp);
        let stop = stop.map_or(len as usize, clamp);
        if start < stop && self.contains(element) {
            if let Some(offset) = self
                .iter()
                .skip(start)
                .take(stop - start)
                .position(|x| x == *element)
            {
                return Ok(start + offset);
            }
        }
        Err(HolodequeError::not_found(element))
    }

    /// Elements left to right.
    fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Consuming iterator over a private copy.
    fn iter(&self) -> Iter<Self, T> {
        Iter::new(self.clone())
    }

    /// Reverse in place. The reversed sequence is built on a copy first.
    fn reverse(&mut self) -> Result<()> {
        let mut reversed = self.clone();
        reversed.clear();
        for element in self.iter() {
            reversed.push(Side::Left, element)?;
        }
        *self = reversed;
        Ok(())
    }

    /// Lexicographic comparison of the materialised sequences.
    fn compare_to(&self, other: &Self) -> Ordering
    where
        T: Ord,
    {
        self.iter().cmp(other.iter())
    }
}
