//! Growable alphabet with a trailing sentinel axis.
//!
//! Axes `0..n` hold the `n` observed elements and axis `n` is the sentinel,
//! an axis no element ever occupies. A new element takes the sentinel's slot
//! and a fresh sentinel is appended. Retiring an element swap-removes it, so
//! every other element keeps its axis except the one moved into the gap.

use std::collections::HashMap;

use crate::axis::{Alignment, AxisResolver, DequeKind, Element};
use crate::error::Result;

/// Observed elements plus one sentinel axis.
#[derive(Clone, Debug)]
pub struct GrowableAxes<T> {
    elements: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T> Default for GrowableAxes<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Element> AxisResolver<T> for GrowableAxes<T> {
    const KIND: DequeKind = DequeKind::Growable;

    fn from_alphabet(alphabet: Vec<T>) -> Result<Self> {
        let mut axes = Self::default();
        for element in alphabet {
            if axes.axis_of(&element).is_none() {
                axes.admit(element)?;
            }
        }
        Ok(axes)
    }

    fn dim(&self) -> usize {
        self.elements.len() + 1
    }

    fn axis_of(&self, element: &T) -> Option<usize> {
        self.index.get(element).copied()
    }

    fn element_of(&self, axis: usize) -> &T {
        &self.elements[axis]
    }

    fn alphabet(&self) -> Vec<T> {
        self.elements.clone()
    }

    fn accepts(&self, _element: &T) -> bool {
        true
    }

    fn admit(&mut self, element: T) -> Result<usize> {
        let axis = self.elements.len();
        self.index.insert(element.clone(), axis);
        self.elements.push(element);
        Ok(axis)
    }

    fn retire(&mut self, axis: usize) {
        let gone = self.elements.swap_remove(axis);
        self.index.remove(&gone);
        if let Some(moved) = self.elements.get(axis) {
            self.index.insert(moved.clone(), axis);
        }
    }

    fn sentinel(&self) -> Option<usize> {
        Some(self.elements.len())
    }

    fn reset(&mut self) {
        self.elements.clear();
        self.index.clear();
    }

    /// Elements only `other` has are admitted after the receiver's own, in
    /// `other`'s axis order.
    fn align(&self, other: &Self) -> Result<Alignment<Self>> {
        let mut resolver = self.clone();
        let mut grown = 0;
        let mut map = Vec::with_capacity(other.dim());
        for element in &other.elements {
            let axis = match resolver.axis_of(element) {
                Some(axis) => axis,
                None => {
                    grown += 1;
                    resolver.admit(element.clone())?
                }
            };
            map.push(Some(axis));
        }
        map.push(None);
        Ok(Alignment {
            resolver,
            map,
            grown,
        })
    }
}
