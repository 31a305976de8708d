//! Registration mixins.
//!
//! A mixin is an extension trait that only needs the [`Toolkit`] capability:
//! it builds a unit and hands it to [`Toolkit::add`]. Every mixin is
//! implemented for every toolkit through a blanket impl, so bringing the
//! trait into scope is all it takes to use it.
//!
//! Third-party crates extend a toolkit the same way:
//!
//! ```
//! use texkit::{Serializable, TexToolkit, Toolkit};
//!
//! struct Texttt {
//!     key: String,
//!     code: String,
//! }
//!
//! impl Serializable for Texttt {
//!     fn key(&self) -> &str {
//!         &self.key
//!     }
//!
//!     fn serialize(&self) -> String {
//!         format!("\\texttt{{{}}}", self.code)
//!     }
//! }
//!
//! trait TextttMixin: Toolkit {
//!     fn texttt(&mut self, key: &str, code: &str) -> &mut Self
//!     where
//!         Self: Sized,
//!     {
//!         self.add(Texttt { key: key.into(), code: code.into() })
//!     }
//! }
//!
//! impl<T: Toolkit + ?Sized> TextttMixin for T {}
//!
//! let mut tex = TexToolkit::new();
//! tex.texttt("code1", "val x = 10");
//! assert_eq!(tex.len(), 1);
//! ```

use texkit_core::{Serializable, Target, TexValue};

use crate::units::{NewCommand, TexString};

/// The capability every mixin builds on: registering a unit.
pub trait Toolkit {
    /// Register a boxed unit, replacing any unit with the same id.
    fn add_boxed(&mut self, unit: Box<dyn Serializable>) -> &mut Self;

    /// Register a unit, replacing any unit with the same id.
    fn add<U: Serializable>(&mut self, unit: U) -> &mut Self
    where
        Self: Sized,
    {
        self.add_boxed(Box::new(unit))
    }
}

/// `\newcommand` constant definitions.
pub trait NewCommandMixin: Toolkit {
    /// Define a constant with default options.
    fn newcommand(&mut self, label: impl Into<String>, value: impl Into<TexValue>) -> &mut Self
    where
        Self: Sized,
    {
        self.add(NewCommand::new(label, value))
    }

    /// Register a fully configured constant definition.
    fn add_newcommand(&mut self, command: NewCommand) -> &mut Self
    where
        Self: Sized,
    {
        self.add(command)
    }
}

impl<T: Toolkit + ?Sized> NewCommandMixin for T {}

/// Verbatim TeX snippets.
pub trait TexStringMixin: Toolkit {
    /// Add a snippet written to the default output.
    fn texstring(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.add(TexString::new(key, text))
    }

    /// Add a snippet written to the given target.
    fn texstring_to(
        &mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        target: impl Into<Target>,
    ) -> &mut Self
    where
        Self: Sized,
    {
        self.add(TexString::new(key, text).to(target))
    }

    /// Register a prebuilt snippet.
    fn add_texstring(&mut self, snippet: TexString) -> &mut Self
    where
        Self: Sized,
    {
        self.add(snippet)
    }
}

impl<T: Toolkit + ?Sized> TexStringMixin for T {}

#[cfg(test)]
mod tests {
    use super::*;

    /// A host that only records ids, proving mixins need nothing but `add`.
    #[derive(Default)]
    struct Recorder {
        ids: Vec<String>,
    }

    impl Toolkit for Recorder {
        fn add_boxed(&mut self, unit: Box<dyn Serializable>) -> &mut Self {
            self.ids.push(unit.id().to_string());
            self
        }
    }

    #[test]
    fn test_mixins_work_on_any_host() {
        let mut host = Recorder::default();
        host.newcommand("a", 1)
            .texstring("b", "x")
            .texstring_to("c", "y", "other.tex")
            .add_newcommand(NewCommand::new("d", 2))
            .add_texstring(TexString::new("e", "z"));

        assert_eq!(
            host.ids,
            vec![
                "NewCommand:a",
                "TexString:b",
                "TexString:c",
                "NewCommand:d",
                "TexString:e"
            ]
        );
    }
}
