//! `HolodequeCore`: axis resolver + matrix backend + size bookkeeping.
//!
//! The fixed-alphabet [`Holodeque`] and the dynamic-alphabet
//! [`GrowableDeque`] are the same core with different resolvers.

use std::marker::PhantomData;

use num_bigint::BigInt;
use tracing::debug;

use crate::axis::{AxisResolver, Element, FixedAxes, GrowableAxes};
use crate::config::DequeConfig;
use crate::core::transform::{self, Side};
use crate::error::{HolodequeError, Result};
use crate::matrix::{DispatchMatrix, MatrixBackend, NestedMatrix, Scalar};

/// A double-ended queue whose state is one square integer matrix.
///
/// Generic over the element type `T`, the axis strategy `R` and the matrix
/// storage `B`. Most code uses one of the aliases.
#[derive(Clone)]
pub struct HolodequeCore<T, R, B> {
    pub(crate) matrix: B,
    pub(crate) resolver: R,
    pub(crate) size: usize,
    pub(crate) maxlen: Option<usize>,
    _element: PhantomData<T>,
}

/// Fixed-alphabet holodeque; the alphabet is given at construction.
pub type Holodeque<T, B = NestedMatrix<BigInt>> = HolodequeCore<T, FixedAxes<T>, B>;

/// Holodeque that learns its alphabet from the elements pushed into it.
pub type GrowableDeque<T, B = NestedMatrix<BigInt>> = HolodequeCore<T, GrowableAxes<T>, B>;

impl<T, R, B> HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    /// Empty holodeque over a prepared resolver.
    pub fn from_resolver(resolver: R, maxlen: Option<usize>) -> Self {
        Self::from_parts(B::identity(resolver.dim()), resolver, maxlen)
    }

    pub(crate) fn from_parts(matrix: B, resolver: R, maxlen: Option<usize>) -> Self {
        Self {
            matrix,
            resolver,
            size: 0,
            maxlen,
            _element: PhantomData,
        }
    }

    /// Empty, unbounded holodeque over `alphabet`.
    pub fn new(alphabet: impl IntoIterator<Item = T>) -> Result<Self> {
        Self::with_maxlen(alphabet, None)
    }

    /// Empty holodeque over `alphabet` holding at most `maxlen` elements.
    pub fn with_maxlen(alphabet: impl IntoIterator<Item = T>, maxlen: Option<usize>) -> Result<Self> {
        let resolver = R::from_alphabet(alphabet.into_iter().collect())?;
        Ok(Self::from_resolver(resolver, maxlen))
    }

    /// Holodeque over `alphabet` filled with `items`, left to right.
    ///
    /// With a `maxlen`, only the last `maxlen` items survive.
    pub fn from_items(
        alphabet: impl IntoIterator<Item = T>,
        items: impl IntoIterator<Item = T>,
        maxlen: Option<usize>,
    ) -> Result<Self> {
        let mut deque = Self::with_maxlen(alphabet, maxlen)?;
        deque.extend_right(items)?;
        Ok(deque)
    }

    // ──────────────────────────────────────────────────────────────
    // Introspection
    // ──────────────────────────────────────────────────────────────

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    /// Matrix dimension `k`.
    pub fn shape(&self) -> usize {
        self.matrix.dim()
    }

    /// Alphabet in axis order. For the growable variant, the elements
    /// currently present.
    pub fn alphabet(&self) -> Vec<T> {
        self.resolver.alphabet()
    }

    /// Read-only view of the state matrix.
    pub fn matrix(&self) -> &B {
        &self.matrix
    }

    pub fn is_full(&self) -> bool {
        self.maxlen.is_some_and(|m| self.size >= m)
    }

    /// Whether `element` may be pushed.
    pub fn accepts(&self, element: &T) -> bool {
        self.resolver.accepts(element)
    }

    // ──────────────────────────────────────────────────────────────
    // Push / pop / peek
    // ──────────────────────────────────────────────────────────────

    /// Push `element` at `side`.
    ///
    /// When full, one element is first evicted from the opposite side. With
    /// `maxlen == 0` the push is a no-op.
    pub fn push(&mut self, side: Side, element: T) -> Result<()> {
        if !self.resolver.accepts(&element) {
            return Err(HolodequeError::invalid_element(&element));
        }
        if self.maxlen == Some(0) {
            return Ok(());
        }
        let evicted = if self.is_full() {
            let item = self.pop(side.opposite())?;
            debug!(?side, evicted = ?item, "bounded push evicted from the opposite end");
            Some(item)
        } else {
            None
        };
        if let Err(err) = self.push_unbounded(side, element) {
            if let Some(item) = evicted {
                self.push_unbounded(side.opposite(), item)?;
            }
            return Err(err);
        }
        Ok(())
    }

    /// Resolve (or admit) the axis and apply the transform, ignoring capacity.
    fn push_unbounded(&mut self, side: Side, element: T) -> Result<()> {
        let (axis, admitted) = match self.resolver.axis_of(&element) {
            Some(axis) => (axis, false),
            None => {
                let axis = self.resolver.admit(element)?;
                self.matrix.grow();
                debug!(axis, shape = self.matrix.dim(), "alphabet grew");
                (axis, true)
            }
        };
        if let Err(err) = transform::push(&mut self.matrix, side, axis) {
            if admitted {
                self.matrix.truncate();
                self.resolver.retire(axis);
            }
            return Err(err);
        }
        self.size += 1;
        Ok(())
    }

    pub fn push_left(&mut self, element: T) -> Result<()> {
        self.push(Side::Left, element)
    }

    pub fn push_right(&mut self, element: T) -> Result<()> {
        self.push(Side::Right, element)
    }

    /// Remove and return the element at `side`.
    pub fn pop(&mut self, side: Side) -> Result<T> {
        if self.size == 0 {
            return Err(HolodequeError::empty("pop"));
        }
        let axis = transform::locate(&self.matrix, side, self.size);
        transform::pop(&mut self.matrix, side, axis)?;
        self.size -= 1;
        let element = self.resolver.element_of(axis).clone();
        if self.resolver.is_growable() && self.matrix.is_unit_row(axis) {
            self.compact(axis);
        }
        Ok(element)
    }

    /// Drop the axis of an element that is no longer present: the sentinel
    /// goes, and the vacated axis swaps into its place.
    fn compact(&mut self, axis: usize) {
        self.matrix.truncate();
        let last = self.matrix.dim() - 1;
        self.matrix.swap_axes(axis, last);
        self.resolver.retire(axis);
        debug!(axis, shape = self.matrix.dim(), "alphabet shrank");
    }

    pub fn pop_left(&mut self) -> Result<T> {
        self.pop(Side::Left)
    }

    pub fn pop_right(&mut self) -> Result<T> {
        self.pop(Side::Right)
    }

    /// The element at `side`, without removing it.
    pub fn peek(&self, side: Side) -> Result<&T> {
        if self.size == 0 {
            return Err(HolodequeError::empty("peek"));
        }
        let axis = transform::locate(&self.matrix, side, self.size);
        Ok(self.resolver.element_of(axis))
    }

    pub fn peek_left(&self) -> Result<&T> {
        self.peek(Side::Left)
    }

    pub fn peek_right(&self) -> Result<&T> {
        self.peek(Side::Right)
    }

    /// Push every item at `side`, one at a time. Extending on the left
    /// therefore reverses the items, and a bounded holodeque evicts as it
    /// goes. To append another holodeque in order use
    /// [`extend_from`](Self::extend_from).
    pub fn extend(&mut self, side: Side, items: impl IntoIterator<Item = T>) -> Result<()> {
        for item in items {
            self.push(side, item)?;
        }
        Ok(())
    }

    pub fn extend_left(&mut self, items: impl IntoIterator<Item = T>) -> Result<()> {
        self.extend(Side::Left, items)
    }

    pub fn extend_right(&mut self, items: impl IntoIterator<Item = T>) -> Result<()> {
        self.extend(Side::Right, items)
    }

    /// O(k): an element is present iff its axis row is not the unit row.
    pub fn contains(&self, element: &T) -> bool {
        match self.resolver.axis_of(element) {
            Some(axis) => self.size > 0 && !self.matrix.is_unit_row(axis),
            None => false,
        }
    }

    /// Remove every element. The growable variant also forgets its alphabet.
    pub fn clear(&mut self) {
        self.resolver.reset();
        self.matrix.reset(self.resolver.dim());
        self.size = 0;
    }
}

impl<T: Element, B: MatrixBackend> HolodequeCore<T, GrowableAxes<T>, B> {
    /// Empty growable holodeque.
    pub fn empty(maxlen: Option<usize>) -> Self {
        Self::from_resolver(GrowableAxes::default(), maxlen)
    }

    /// Growable holodeque filled with `items`, left to right.
    pub fn from_seq(items: impl IntoIterator<Item = T>, maxlen: Option<usize>) -> Result<Self> {
        let mut deque = Self::empty(maxlen);
        deque.extend_right(items)?;
        Ok(deque)
    }
}

impl<T: Element, B: MatrixBackend> Default for HolodequeCore<T, GrowableAxes<T>, B> {
    fn default() -> Self {
        Self::empty(None)
    }
}

impl<T, R, S> HolodequeCore<T, R, DispatchMatrix<S>>
where
    T: Element,
    R: AxisResolver<T>,
    S: Scalar,
{
    /// Empty holodeque over `alphabet` with capacity and storage from `config`.
    ///
    /// `BackendKind::Auto` is resolved once, against the starting shape. A
    /// growable holodeque starts at shape 1, so under `Auto` it stays on the
    /// nested layout however far its alphabet grows; ask for
    /// `BackendKind::Array` to get array storage from the start.
    pub fn with_config(alphabet: impl IntoIterator<Item = T>, config: &DequeConfig) -> Result<Self> {
        let resolver = R::from_alphabet(alphabet.into_iter().collect())?;
        let matrix = DispatchMatrix::with_kind(config.backend, resolver.dim());
        Ok(Self::from_parts(matrix, resolver, config.maxlen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::BinaryAxes;
    use crate::matrix::{ArrayMatrix, BackendKind};

    fn drain_left_u32<R: AxisResolver<u32>, B: MatrixBackend>(
        d: &mut HolodequeCore<u32, R, B>,
    ) -> Vec<u32> {
        let mut out = Vec::new();
        while let Ok(x) = d.pop_left() {
            out.push(x);
        }
        out
    }

    fn drain_left<R: AxisResolver<char>, B: MatrixBackend>(
        d: &mut HolodequeCore<char, R, B>,
    ) -> Vec<char> {
        let mut out = Vec::new();
        while let Ok(x) = d.pop_left() {
            out.push(x);
        }
        out
    }

    #[test]
    fn test_empty_state() {
        let mut d = Holodeque::<u8>::new([0, 1, 2]).unwrap();
        assert_eq!(d.len(), 0);
        assert!(d.matrix().is_identity());
        assert!(matches!(d.peek_left(), Err(HolodequeError::EmptyCollection { .. })));
        assert!(matches!(d.peek_right(), Err(HolodequeError::EmptyCollection { .. })));
        assert!(matches!(d.pop_left(), Err(HolodequeError::EmptyCollection { .. })));
        assert!(matches!(d.pop_right(), Err(HolodequeError::EmptyCollection { .. })));
    }

    #[test]
    fn test_push_pop_both_ends() {
        let mut d = Holodeque::<char>::new("abc".chars()).unwrap();
        d.push_right('b').unwrap();
        d.push_left('a').unwrap();
        d.push_right('c').unwrap();
        d.push_left('c').unwrap();
        assert_eq!(d.len(), 4);
        assert_eq!(*d.peek_left().unwrap(), 'c');
        assert_eq!(*d.peek_right().unwrap(), 'c');
        assert_eq!(d.pop_right().unwrap(), 'c');
        assert_eq!(drain_left(&mut d), vec!['c', 'a', 'b']);
        assert!(d.matrix().is_identity());
    }

    #[test]
    fn test_inverse_law_restores_state() {
        let mut d = Holodeque::<char>::from_items("xyz".chars(), "zyxxz".chars(), None).unwrap();
        let before = d.matrix().clone();
        d.push_right('y').unwrap();
        assert_eq!(d.pop_right().unwrap(), 'y');
        assert_eq!(d.matrix(), &before);
        d.push_left('x').unwrap();
        assert_eq!(d.pop_left().unwrap(), 'x');
        assert_eq!(d.matrix(), &before);
    }

    #[test]
    fn test_invalid_element_leaves_state() {
        let mut d = Holodeque::<char>::from_items("ab".chars(), "ab".chars(), Some(2)).unwrap();
        let before = d.clone().matrix;
        assert!(matches!(
            d.push_right('q'),
            Err(HolodequeError::InvalidElement(_))
        ));
        assert_eq!(d.matrix, before);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_bounded_eviction() {
        let mut d = Holodeque::<char>::with_maxlen("abc".chars(), Some(3)).unwrap();
        d.extend_right("abc".chars()).unwrap();
        d.push_right('a').unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(*d.peek_left().unwrap(), 'b');
        d.push_left('c').unwrap();
        assert_eq!(drain_left(&mut d), vec!['c', 'b', 'c']);
    }

    #[test]
    fn test_zero_maxlen_is_noop() {
        let mut d = Holodeque::<char>::with_maxlen("ab".chars(), Some(0)).unwrap();
        d.push_left('a').unwrap();
        assert!(d.is_empty());
        assert!(d.push_left('z').is_err());
    }

    #[test]
    fn test_contains() {
        let d = Holodeque::<char>::from_items("abcd".chars(), "bdb".chars(), None).unwrap();
        assert!(d.contains(&'b'));
        assert!(d.contains(&'d'));
        assert!(!d.contains(&'a'));
        assert!(!d.contains(&'z'));
    }

    #[test]
    fn test_extend_left_reverses() {
        let mut d = Holodeque::<char>::new("abc".chars()).unwrap();
        d.extend_left("abc".chars()).unwrap();
        assert_eq!(drain_left(&mut d), vec!['c', 'b', 'a']);
    }

    #[test]
    fn test_clear() {
        let mut d = Holodeque::<char>::from_items("ab".chars(), "abba".chars(), None).unwrap();
        d.clear();
        assert!(d.is_empty());
        assert!(d.matrix().is_identity());
        assert_eq!(d.shape(), 2);
    }

    #[test]
    fn test_growable_grows_and_shrinks() {
        let mut d = GrowableDeque::<char>::default();
        assert_eq!(d.shape(), 1);
        d.extend_right("hello".chars()).unwrap();
        assert_eq!(d.shape(), 5);
        assert_eq!(d.alphabet(), vec!['h', 'e', 'l', 'o']);
        assert_eq!(d.pop_left().unwrap(), 'h');
        assert_eq!(d.shape(), 4);
        assert!(!d.contains(&'h'));
        assert_eq!(d.pop_right().unwrap(), 'o');
        assert_eq!(d.pop_right().unwrap(), 'l');
        assert_eq!(d.shape(), 3);
        assert_eq!(drain_left(&mut d), vec!['e', 'l']);
        assert_eq!(d.shape(), 1);
        assert!(d.matrix().is_identity());
    }

    #[test]
    fn test_growable_interleaved() {
        let mut d = GrowableDeque::<char>::from_seq("abcab".chars(), None).unwrap();
        d.push_left('z').unwrap();
        assert_eq!(d.pop_left().unwrap(), 'z');
        d.push_left('c').unwrap();
        d.push_right('d').unwrap();
        assert_eq!(drain_left(&mut d), "cabcabd".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_growable_clear_forgets_alphabet() {
        let mut d = GrowableDeque::<u32>::from_seq([4, 5, 6], Some(10)).unwrap();
        d.clear();
        assert_eq!(d.shape(), 1);
        assert!(d.alphabet().is_empty());
        assert_eq!(d.maxlen(), Some(10));
    }

    #[test]
    fn test_fixed_width_overflow_leaves_state() {
        let mut d = Holodeque::<u8, NestedMatrix<i64>>::new([0, 1]).unwrap();
        for i in 0..91 {
            d.push_right(i % 2).unwrap();
        }
        let before = d.matrix().clone();
        assert!(matches!(d.push_right(1), Err(HolodequeError::Overflow(_))));
        assert_eq!(d.matrix(), &before);
        assert_eq!(d.len(), 91);
    }

    #[test]
    fn test_overflow_rolls_back_growth() {
        let mut d = GrowableDeque::<char, NestedMatrix<i64>>::empty(None);
        for i in 0..90 {
            d.push_right(if i % 2 == 0 { 'a' } else { 'b' }).unwrap();
        }
        let before = d.matrix().clone();
        assert!(matches!(d.push_left('c'), Err(HolodequeError::Overflow(_))));
        assert_eq!(d.matrix(), &before);
        assert_eq!(d.shape(), 3);
        assert_eq!(d.alphabet(), vec!['a', 'b']);
        assert_eq!(d.len(), 90);
        assert_eq!(*d.peek_left().unwrap(), 'a');
    }

    #[test]
    fn test_binary_axes_generic_core() {
        let mut d = HolodequeCore::<bool, BinaryAxes, NestedMatrix>::new([]).unwrap();
        d.extend_right([true, false, false]).unwrap();
        assert_eq!(d.shape(), 2);
        assert!(*d.peek_left().unwrap());
        assert!(!*d.peek_right().unwrap());
    }

    #[test]
    fn test_backends_agree() {
        let mut nested = Holodeque::<char>::from_items("abc".chars(), "cabba".chars(), None).unwrap();
        let mut array =
            Holodeque::<char, ArrayMatrix>::from_items("abc".chars(), "cabba".chars(), None).unwrap();
        assert_eq!(nested.matrix().to_rows(), array.matrix().to_rows());
        assert_eq!(drain_left(&mut nested), drain_left(&mut array));
    }

    #[test]
    fn test_with_config() {
        let config = DequeConfig {
            maxlen: Some(4),
            backend: BackendKind::Array,
        };
        let d = Holodeque::<char, DispatchMatrix>::with_config("ab".chars(), &config).unwrap();
        assert_eq!(d.matrix().kind(), BackendKind::Array);
        assert_eq!(d.maxlen(), Some(4));
    }

    #[test]
    fn test_growable_layout_fixed_at_construction() {
        let mut auto =
            GrowableDeque::<u32, DispatchMatrix>::with_config(Vec::new(), &DequeConfig::default())
                .unwrap();
        auto.extend_right(0..30).unwrap();
        assert_eq!(auto.shape(), 31);
        assert_eq!(auto.matrix().kind(), BackendKind::Nested);

        let config = DequeConfig {
            maxlen: None,
            backend: BackendKind::Array,
        };
        let mut array = GrowableDeque::<u32, DispatchMatrix>::with_config(Vec::new(), &config).unwrap();
        array.extend_right(0..30).unwrap();
        assert_eq!(array.matrix().kind(), BackendKind::Array);
        assert_eq!(array.pop_left().unwrap(), 0);
        assert_eq!(array.shape(), 30);
        assert_eq!(drain_left_u32(&mut array), (1..30).collect::<Vec<_>>());
        assert!(array.is_empty());
    }
}
