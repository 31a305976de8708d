use std::{ops::Range, path::PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Manifest result; the error is boxed since diagnostics carry the whole source
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The manifest text an error points into.
///
/// Validation hands this around instead of the raw content so every error it
/// raises carries the source and file name miette needs to draw labels.
#[derive(Debug, Clone)]
pub struct SourceContext {
    name: String,
    content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File name shown in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn source_code(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.content.clone())
    }

    /// Wrap a TOML syntax or shape error.
    pub fn parse(&self, source: toml::de::Error) -> Box<Error> {
        Box::new(Error::Parse {
            span: source.span().map(SourceSpan::from),
            src: self.source_code(),
            source,
        })
    }

    /// A semantic error about the manifest as a whole.
    pub fn invalid(&self, message: impl Into<String>) -> Box<Error> {
        self.validation(message.into(), None)
    }

    /// A semantic error pointing at one value.
    pub fn invalid_at(&self, message: impl Into<String>, span: Range<usize>) -> Box<Error> {
        self.validation(message.into(), Some(span.into()))
    }

    fn validation(&self, message: String, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.source_code(),
            span,
            message,
        })
    }

    /// A `target` value that cannot be turned into an output target.
    pub fn bad_target(&self, source: texkit::Error, span: Range<usize>) -> Box<Error> {
        Box::new(Error::InvalidTarget {
            src: self.source_code(),
            span: span.into(),
            source,
        })
    }

    /// Two entries declaring the same unit.
    pub fn duplicate(
        &self,
        id: impl Into<String>,
        first: Range<usize>,
        second: Range<usize>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateUnit {
            src: self.source_code(),
            first_span: first.into(),
            second_span: second.into(),
            id: id.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(help("create a texkit.toml or pass its location with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse texkit.toml")]
    #[diagnostic(code(texkit::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(texkit::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid output target")]
    #[diagnostic(
        code(texkit::invalid_target),
        help("use a path string, e.g. target = \"other.tex\", or {{ handler = \"stdout\" }}")
    )]
    InvalidTarget {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: SourceSpan,
        #[source]
        source: texkit::Error,
    },

    #[error("duplicate unit '{id}'")]
    #[diagnostic(
        code(texkit::duplicate_unit),
        help("each label or key may only be used once per unit kind")
    )]
    DuplicateUnit {
        #[source_code]
        src: NamedSource<String>,
        #[label("first defined here")]
        first_span: SourceSpan,
        #[label("defined again here")]
        second_span: SourceSpan,
        id: String,
    },
}
