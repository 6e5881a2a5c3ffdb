//! # HOLODEQUE
//!
//! A double-ended queue whose entire state is one square integer matrix.
//!
//! Each alphabet element `a` owns an axis of a `k × k` matrix. Pushing `a` on
//! the left multiplies the state by an elementary matrix `L_a` from the left;
//! pushing on the right multiplies from the right. Matrix products do not
//! commute, so every ordered sequence lands on a different matrix, and the
//! ends of the sequence can be read back from the matrix alone.
//!
//! ## Components
//!
//! 1. **Matrix backends**: nested rows or `ndarray`, behind [`MatrixBackend`]
//! 2. **Axis resolvers**: fixed, growable and binary alphabets
//! 3. **Core**: O(k²) push/pop/peek, concatenation by matrix product
//! 4. **Sequence layer**: rotation, indexing, search and iteration via [`Deque`]
//! 5. **Snapshots**: bincode persistence that replays the sequence
//!
//! ## Example
//!
//! ```
//! use holodeque::prelude::*;
//!
//! let mut dq = Holodeque::<char>::new("abc".chars()).unwrap();
//! dq.push_right('a').unwrap();
//! dq.push_right('b').unwrap();
//! dq.push_left('c').unwrap();
//! assert_eq!(dq.to_vec(), vec!['c', 'a', 'b']);
//! assert_eq!(dq.pop_right().unwrap(), 'b');
//! ```

pub mod axis;
pub mod core;
pub mod error;
pub mod matrix;
pub mod sequence;
pub mod snapshot;

pub use crate::axis::{AxisResolver, BinaryAxes, DequeKind, Element, FixedAxes, GrowableAxes};
pub use crate::core::{BinaryDeque, GrowableDeque, Holodeque, HolodequeCore, Side};
pub use crate::error::{HolodequeError, Result};
pub use crate::matrix::{ArrayMatrix, BackendKind, DispatchMatrix, MatrixBackend, NestedMatrix, Scalar};
pub use crate::sequence::{Deque, Iter};
pub use crate::snapshot::Snapshot;

/// Crate-wide constants and configuration.
pub mod config {
    use serde::{Deserialize, Serialize};

    use crate::error::{HolodequeError, Result};
    use crate::matrix::BackendKind;

    /// Smallest fixed alphabet.
    pub const MIN_ALPHABET: usize = 2;

    /// Matrix dimension of the binary specialisation.
    pub const BINARY_SHAPE: usize = 2;

    /// Shape at and above which `BackendKind::Auto` picks the array layout.
    pub const ARRAY_BACKEND_THRESHOLD: usize = 24;

    /// Validate a capacity from a signed source.
    pub fn resolve_maxlen(maxlen: Option<i64>) -> Result<Option<usize>> {
        match maxlen {
            None => Ok(None),
            Some(m) => usize::try_from(m).map(Some).map_err(|_| {
                HolodequeError::invalid_argument(format!("maxlen must be non-negative, got {m}"))
            }),
        }
    }

    /// Validate a repeat count from a signed source.
    pub fn resolve_repeat(count: i64) -> Result<usize> {
        usize::try_from(count).map_err(|_| {
            HolodequeError::invalid_argument(format!(
                "cannot repeat a holodeque a negative number of times ({count})"
            ))
        })
    }

    /// Construction options.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DequeConfig {
        /// Capacity; `None` is unbounded.
        pub maxlen: Option<usize>,
        /// Matrix storage.
        pub backend: BackendKind,
    }

    impl DequeConfig {
        /// Build from a signed capacity, rejecting negatives.
        pub fn new(maxlen: Option<i64>, backend: BackendKind) -> Result<Self> {
            Ok(Self {
                maxlen: resolve_maxlen(maxlen)?,
                backend,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_resolve_maxlen() {
            assert_eq!(resolve_maxlen(None).unwrap(), None);
            assert_eq!(resolve_maxlen(Some(0)).unwrap(), Some(0));
            assert_eq!(resolve_maxlen(Some(7)).unwrap(), Some(7));
            assert!(matches!(
                resolve_maxlen(Some(-1)),
                Err(HolodequeError::InvalidArgument(_))
            ));
        }

        #[test]
        fn test_resolve_repeat() {
            assert_eq!(resolve_repeat(3).unwrap(), 3);
            assert!(resolve_repeat(-2).is_err());
        }

        #[test]
        fn test_config_default() {
            let config = DequeConfig::default();
            assert_eq!(config.maxlen, None);
            assert_eq!(config.backend, BackendKind::Auto);
            assert!(DequeConfig::new(Some(-5), BackendKind::Nested).is_err());
        }
    }
}

/// Everything most callers need.
pub mod prelude {
    pub use crate::config::DequeConfig;
    pub use crate::core::{BinaryDeque, GrowableDeque, Holodeque, Side};
    pub use crate::error::{HolodequeError, Result};
    pub use crate::matrix::{ArrayMatrix, BackendKind, DispatchMatrix, MatrixBackend, NestedMatrix};
    pub use crate::sequence::Deque;
}
