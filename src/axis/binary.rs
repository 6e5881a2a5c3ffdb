//! The two-symbol alphabet `{false, true}`.

use crate::axis::{Alignment, AxisResolver, DequeKind};
use crate::config::BINARY_SHAPE;
use crate::error::{HolodequeError, Result};

static BITS: [bool; BINARY_SHAPE] = [false, true];

/// `false ↦ 0`, `true ↦ 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryAxes;

impl BinaryAxes {
    #[inline]
    pub fn axis(bit: bool) -> usize {
        usize::from(bit)
    }
}

impl AxisResolver<bool> for BinaryAxes {
    const KIND: DequeKind = DequeKind::Binary;

    /// Any alphabet is accepted as long as it is exactly `{false, true}`.
    fn from_alphabet(alphabet: Vec<bool>) -> Result<Self> {
        let has = |b: bool| alphabet.contains(&b);
        if alphabet.is_empty() || (has(false) && has(true)) {
            Ok(BinaryAxes)
        } else {
            Err(HolodequeError::invalid_argument(
                "a binary alphabet is exactly {false, true}",
            ))
        }
    }

    fn dim(&self) -> usize {
        BINARY_SHAPE
    }

    fn axis_of(&self, element: &bool) -> Option<usize> {
        Some(Self::axis(*element))
    }

    fn element_of(&self, axis: usize) -> &bool {
        &BITS[axis]
    }

    fn alphabet(&self) -> Vec<bool> {
        BITS.to_vec()
    }

    fn admit(&mut self, element: bool) -> Result<usize> {
        Ok(Self::axis(element))
    }

    fn retire(&mut self, _axis: usize) {}

    fn align(&self, _other: &Self) -> Result<Alignment<Self>> {
        Ok(Alignment {
            resolver: BinaryAxes,
            map: vec![Some(0), Some(1)],
            grown: 0,
        })
    }
}
