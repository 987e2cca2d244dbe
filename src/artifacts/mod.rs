//! Domain types and algorithms
//!
//! The patch-series transformation itself, independent of any particular
//! invocation:
//!
//! - `classify`: commit role classification
//! - `commit`: commit identity and range types
//! - `core`: shared terminal utilities (paging)
//! - `patch`: patch file naming and normalization
//! - `series`: the checkpoint walk and its state

pub mod classify;
pub mod commit;
pub mod core;
pub mod patch;
pub mod series;
