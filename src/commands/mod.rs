//! Command implementations
//!
//! Each command is a method on the repository facade, with its options type
//! beside it:
//!
//! - `patch_view`: assemble and browse the patch-series view

pub mod patch_view;
