//! `texkit.toml` parsing and validation.
//!
//! A manifest declares the units of a paper's generated TeX file:
//!
//! ```toml
//! [output]
//! path = "values.tex"
//!
//! [[unit]]
//! kind = "newcommand"
//! label = "accuracy"
//! value = 93.12
//! format = ".1f"
//! unit = '\%'
//!
//! [[unit]]
//! kind = "texstring"
//! key = "note"
//! text = '\emph{Preliminary results}'
//! target = { handler = "stdout" }
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod handlers;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use handlers::Handlers;
pub use manifest::{
    DEFAULT_OUTPUT_PATH, Manifest, OutputConfig, TexkitToml, UnitKind, UnitSpec, parse_manifest,
};
