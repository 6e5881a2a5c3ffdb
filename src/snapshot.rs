//! Snapshot persistence.
//!
//! A snapshot stores the sequence, not the matrix. Restoring replays the
//! items through ordinary pushes, so a decoded snapshot can only ever
//! produce a matrix reachable from the identity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::axis::{AxisResolver, DequeKind, Element};
use crate::config::resolve_maxlen;
use crate::core::{BinaryDeque, HolodequeCore};
use crate::error::{HolodequeError, Result};
use crate::matrix::{MatrixBackend, Scalar};
use crate::sequence::Deque;

/// Serialisable description of a holodeque.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub kind: DequeKind,
    /// Alphabet in axis order (present elements for the growable variant).
    pub alphabet: Vec<T>,
    /// Elements left to right.
    pub items: Vec<T>,
    /// Capacity; signed so that foreign producers can be validated.
    pub maxlen: Option<i64>,
}

impl<T: Serialize> Snapshot<T> {
    /// Serialise to bincode bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }
}

impl<T: DeserializeOwned> Snapshot<T> {
    /// Deserialise from bincode bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl<T> Snapshot<T> {
    fn expect_kind(&self, expected: DequeKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(HolodequeError::type_mismatch(expected, self.kind))
        }
    }
}

fn stored_maxlen(maxlen: Option<usize>) -> Option<i64> {
    maxlen.map(|m| i64::try_from(m).unwrap_or(i64::MAX))
}

impl<T, R, B> HolodequeCore<T, R, B>
where
    T: Element,
    R: AxisResolver<T>,
    B: MatrixBackend,
{
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            kind: R::KIND,
            alphabet: self.alphabet(),
            items: self.to_vec(),
            maxlen: stored_maxlen(self.maxlen),
        }
    }

    /// Rebuild from a snapshot of the same kind.
    pub fn restore(snapshot: Snapshot<T>) -> Result<Self> {
        snapshot.expect_kind(R::KIND)?;
        let maxlen = resolve_maxlen(snapshot.maxlen)?;
        let alphabet = if R::KIND == DequeKind::Growable {
            Vec::new()
        } else {
            snapshot.alphabet
        };
        let mut deque = Self::from_resolver(R::from_alphabet(alphabet)?, maxlen);
        deque.extend_right(snapshot.items)?;
        Ok(deque)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>>
    where
        T: Serialize,
    {
        self.snapshot().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        Self::restore(Snapshot::from_bytes(bytes)?)
    }
}

impl<S: Scalar> BinaryDeque<S> {
    pub fn snapshot(&self) -> Snapshot<bool> {
        Snapshot {
            kind: DequeKind::Binary,
            alphabet: self.alphabet(),
            items: self.to_vec(),
            maxlen: stored_maxlen(BinaryDeque::maxlen(self)),
        }
    }

    pub fn restore(snapshot: Snapshot<bool>) -> Result<Self> {
        snapshot.expect_kind(DequeKind::Binary)?;
        let maxlen = resolve_maxlen(snapshot.maxlen)?;
        Self::from_items(snapshot.items, maxlen)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.snapshot().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::restore(Snapshot::from_bytes(bytes)?)
    }
}
