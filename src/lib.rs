//! Browse a topic branch as a tag-annotated patch series
//!
//! `revue` replays the commits a branch carries on top of its upstream into
//! a disposable scratch repository: one normalized patch file per linear
//! commit, grouped into checkpoint commits at every tag and reset boundary.
//! The result is a compact, reviewable history that stays comparable across
//! rebases, browsed with any tool that understands a repository.

pub mod areas;
pub mod artifacts;
pub mod commands;
