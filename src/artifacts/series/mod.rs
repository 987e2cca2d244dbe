//! Patch-series assembly
//!
//! - `builder`: the checkpoint walk over a commit range
//! - `state`: accumulation state carried between commits

pub mod builder;
pub mod state;
