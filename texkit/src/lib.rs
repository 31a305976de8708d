//! Generate TeX constants and snippets from computed values.
//!
//! Results computed in an analysis script can be exported as `\newcommand`
//! definitions (or any other TeX fragment) and `\input` into a paper, so the
//! numbers in the text are always the numbers the code produced.
//!
//! # Example
//!
//! ```no_run
//! use texkit::{DigitMode, NewCommand, NewCommandMixin, TexStringMixin, TexToolkit};
//!
//! let mut tex = TexToolkit::new();
//! tex.newcommand("constantOne", 1)
//!     .add_newcommand(NewCommand::new("constant2", 2).digits(DigitMode::Spell))
//!     .texstring("emph-msg", r"\emph{Emphasized text}");
//!
//! tex.flush("tex_output.tex")?;
//! # Ok::<(), texkit::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`toolkit`] - The unit registry and flush logic
//! - [`mixins`] - Ergonomic registration methods on top of any [`Toolkit`]
//! - [`units`] - The built-in unit types ([`NewCommand`], [`TexString`])
//! - [`handlers`] - Built-in custom serialization handlers

pub mod handlers;
pub mod mixins;
pub mod toolkit;
pub mod units;

pub use handlers::{Collector, Stdout};
pub use mixins::{NewCommandMixin, TexStringMixin, Toolkit};
pub use texkit_core::{
    Category, DigitMode, Error, FormatSpec, HandlerError, ResolvedTarget, Result, Serializable,
    Serializer, Target, TexValue, UnitId, make_tex_identifier,
};
pub use toolkit::{FlushStats, LINE_ENDING, PreviewEntry, TexToolkit};
pub use units::{NewCommand, TexString};
