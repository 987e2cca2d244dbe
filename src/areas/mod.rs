//! Infrastructure collaborators
//!
//! Everything that touches the world outside the process lives here:
//!
//! - `backend`: git subprocess execution
//! - `repository`: read-only facade on the source repository
//! - `scratch`: the disposable clone the series is assembled in

pub mod backend;
pub mod repository;
pub mod scratch;
