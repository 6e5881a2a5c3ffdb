//! Single-pass iteration over a private copy.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::core::Side;
use crate::sequence::Deque;

/// Drains its own copy of a holodeque: `next` pops from the left,
/// `next_back` from the right. The source is never touched.
pub struct Iter<D, T> {
    deque: D,
    _element: PhantomData<fn() -> T>,
}

impl<D, T> Iter<D, T>
where
    T: PartialEq + fmt::Debug,
    D: Deque<T>,
{
    pub fn new(deque: D) -> Self {
        Self {
            deque,
            _element: PhantomData,
        }
    }
}

impl<D, T> Iterator for Iter<D, T>
where
    T: PartialEq + fmt::Debug,
    D: Deque<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop(Side::Left).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.deque.len();
        (n, Some(n))
    }
}

impl<D, T> DoubleEndedIterator for Iter<D, T>
where
    T: PartialEq + fmt::Debug,
    D: Deque<T>,
{
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop(Side::Right).ok()
    }
}

impl<D, T> ExactSizeIterator for Iter<D, T>
where
    T: PartialEq + fmt::Debug,
    D: Deque<T>,
{
}

impl<D, T> FusedIterator for Iter<D, T>
where
    T: PartialEq + fmt::Debug,
    D: Deque<T>,
{
}

#[cfg(test)]
mod tests {
    use crate::core::{BinaryDeque, Holodeque};
    use crate::sequence::Deque;
    use num_bigint::BigInt;

    #[test]
    fn test_forward_and_back() {
        let d = Holodeque::<u8>::from_items([1, 2, 3], [3, 1, 2, 2], None).unwrap();
        let mut it = d.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(3));
        assert_eq!(it.next_back(), Some(2));
        assert_eq!(it.len(), 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn test_rev_and_fused() {
        let d = BinaryDeque::<BigInt>::from_items([true, false, false], None).unwrap();
        assert_eq!(d.iter().rev().collect::<Vec<_>>(), vec![false, false, true]);
        let mut it = d.iter();
        it.by_ref().for_each(drop);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_second_pass_needs_new_iterator() {
        let d = Holodeque::<char>::from_items("ab".chars(), "abba".chars(), None).unwrap();
        let first: String = d.iter().collect();
        let second: String = (&d).into_iter().collect();
        assert_eq!(first, second);
    }
}
