#![deny(missing_docs)]

//! Graphene/BitShares SDK - Complete SDK.
//!
//! Re-exports all SDK components for convenient single-crate usage.

pub use bts_primitives as primitives;
pub use bts_memo as memo;
