//! Axis resolution: the bijection between alphabet elements and matrix axes.
//!
//! Three strategies:
//! - [`FixedAxes`]: alphabet supplied up front, hashed O(1) lookup
//! - [`GrowableAxes`]: alphabet discovered while pushing, plus a trailing
//!   sentinel axis; the matrix grows and shrinks with it
//! - [`BinaryAxes`]: `false ↦ 0`, `true ↦ 1`, nothing stored

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod binary;
pub mod fixed;
pub mod growable;

pub use binary::BinaryAxes;
pub use fixed::FixedAxes;
pub use growable::GrowableAxes;

/// Values a holodeque can hold.
pub trait Element: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Element for T {}

/// Which structure a resolver (or a snapshot) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DequeKind {
    Fixed,
    Growable,
    Binary,
}

impl fmt::Display for DequeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeKind::Fixed => write!(f, "fixed-alphabet holodeque"),
            DequeKind::Growable => write!(f, "growable holodeque"),
            DequeKind::Binary => write!(f, "binary holodeque"),
        }
    }
}

/// How another structure's axes land in a merged axis table.
#[derive(Clone, Debug)]
pub struct Alignment<R> {
    /// Resolver of the merged structure.
    pub resolver: R,
    /// `map[other_axis]` is the merged axis, `None` for the other side's sentinel.
    pub map: Vec<Option<usize>>,
    /// Axes the receiver had to admit.
    pub grown: usize,
}

impl<R> Alignment<R> {
    /// True when the other matrix can be used as-is.
    pub fn is_identity(&self) -> bool {
        self.grown == 0
            && self
                .map
                .iter()
                .enumerate()
                .all(|(axis, mapped)| mapped.map_or(true, |m| m == axis))
    }
}

/// Element ↔ axis strategy behind a holodeque.
pub trait AxisResolver<T: Element>: Clone + fmt::Debug {
    const KIND: DequeKind;

    /// Build from an alphabet. Growable resolvers admit it in order.
    fn from_alphabet(alphabet: Vec<T>) -> Result<Self>;

    /// Matrix dimension this resolver addresses.
    fn dim(&self) -> usize;

    fn axis_of(&self, element: &T) -> Option<usize>;

    /// Element stored at `axis`.
    ///
    /// # Panics
    /// If `axis` holds no element (out of range or the sentinel).
    fn element_of(&self, axis: usize) -> &T;

    /// Elements in axis order.
    fn alphabet(&self) -> Vec<T>;

    /// Whether `element` may be pushed.
    fn accepts(&self, element: &T) -> bool {
        self.axis_of(element).is_some()
    }

    /// Register an unseen element and return its axis. The caller grows the
    /// matrix by one axis to match.
    fn admit(&mut self, element: T) -> Result<usize>;

    /// Forget the element at `axis`; the element at the last element axis
    /// moves into its slot. The caller has already reshaped the matrix.
    fn retire(&mut self, axis: usize);

    /// Axis that never holds an element, if the strategy keeps one.
    fn sentinel(&self) -> Option<usize> {
        None
    }

    /// Drop everything observed; fixed alphabets are kept.
    fn reset(&mut self) {}

    fn is_growable(&self) -> bool {
        Self::KIND == DequeKind::Growable
    }

    /// Plan a merge of `other` into `self`.
    fn align(&self, other: &Self) -> Result<Alignment<Self>>;
}
