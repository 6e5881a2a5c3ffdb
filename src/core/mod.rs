//! Core module: transform engine, the generic holodeque, merges and the
//! binary specialisation.

pub mod binary;
pub mod holodeque;
pub mod merge;
pub mod transform;

pub use binary::BinaryDeque;
pub use holodeque::{GrowableDeque, Holodeque, HolodequeCore};
pub use transform::Side;
