//! Core types for texkit.
//!
//! This crate provides the pieces every texkit unit is built from:
//! the identifier sanitizer, value formatting, the [`Serializable`] unit
//! contract and the output [`Target`] a unit is routed to.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod ident;
mod target;
mod unit;
mod value;

// Errors
pub use error::{Error, HandlerError, Result};
// Identifier sanitizing
pub use ident::{DigitMode, make_tex_identifier};
// Output routing
pub use target::{ResolvedTarget, Serializer, Target};
// Unit contract
pub use unit::{Category, Serializable, UnitId};
// Values
pub use value::{Align, FormatSpec, FormatType, Grouping, Sign, TexValue};
