//! Core operations.
//!
//! The logic behind texkit commands, separated from argument parsing and
//! output rendering.

pub mod bake;
pub mod check;

pub use bake::{BakeOptions, bake};
pub use check::check;
