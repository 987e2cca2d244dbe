//! Patch document handling
//!
//! - `name`: subject-derived patch file names
//! - `normalize`: volatile-field zeroing for stable comparison

pub mod name;
pub mod normalize;
