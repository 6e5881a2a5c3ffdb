//! Fixed alphabet: supplied once, never changes.

use std::collections::HashMap;

use crate::axis::{Alignment, AxisResolver, DequeKind, Element};
use crate::config::MIN_ALPHABET;
use crate::error::{HolodequeError, Result};

/// Order-preserving alphabet with a hashed index.
#[derive(Clone, Debug)]
pub struct FixedAxes<T> {
    elements: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Element> AxisResolver<T> for FixedAxes<T> {
    const KIND: DequeKind = DequeKind::Fixed;

    /// Duplicates collapse onto their first occurrence.
    fn from_alphabet(alphabet: Vec<T>) -> Result<Self> {
        let mut elements = Vec::with_capacity(alphabet.len());
        let mut index = HashMap::with_capacity(alphabet.len());
        for element in alphabet {
            if !index.contains_key(&element) {
                index.insert(element.clone(), elements.len());
                elements.push(element);
            }
        }
        if elements.len() < MIN_ALPHABET {
            return Err(HolodequeError::invalid_argument(format!(
                "a fixed alphabet needs at least {MIN_ALPHABET} distinct members, got {}",
                elements.len()
            )));
        }
        Ok(Self { elements, index })
    }

    fn dim(&self) -> usize {
        self.elements.len()
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

    fn admit(&mut self, element: T) -> Result<usize> {
        Err(HolodequeError::invalid_element(&element))
    }

    fn retire(&mut self, _axis: usize) {}

    /// Alphabets must be equal as sets; a different order is remapped.
    fn align(&self, other: &Self) -> Result<Alignment<Self>> {
        if self.elements.len() != other.elements.len() {
            return Err(HolodequeError::IncompatibleAlphabet(format!(
                "alphabet sizes differ ({} vs {})",
                self.elements.len(),
                other.elements.len()
            )));
        }
        let map = other
            .elements
            .iter()
            .map(|e| {
                self.axis_of(e).map(Some).ok_or_else(|| {
                    HolodequeError::IncompatibleAlphabet(format!("{e:?} is not in this alphabet"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Alignment {
            resolver: self.clone(),
            map,
            grown: 0,
        })
    }
}
