//! Output targets for units.
//!
//! Every unit carries a [`Target`]: either nothing (use the default output
//! file), an explicit file path, or a custom [`Serializer`] that receives the
//! unit itself. At flush time the target is resolved against the default path
//! into a [`ResolvedTarget`].

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{Error, HandlerError, Result, Serializable};

/// A custom serialization handler.
///
/// Handlers are an alternative to writing units into a file: a unit whose
/// target is a handler is passed to [`Serializer::serialize`] during flush.
/// Closures taking `&dyn Serializable` implement this trait.
pub trait Serializer: Send + Sync {
    /// Serialize the given unit.
    ///
    /// # Errors
    ///
    /// Returned errors abort the flush and are handed to its caller unchanged.
    fn serialize(&self, unit: &dyn Serializable) -> std::result::Result<(), HandlerError>;
}

impl<F> Serializer for F
where
    F: Fn(&dyn Serializable) -> std::result::Result<(), HandlerError> + Send + Sync,
{
    fn serialize(&self, unit: &dyn Serializable) -> std::result::Result<(), HandlerError> {
        self(unit)
    }
}

/// Where a unit should be serialized to.
#[derive(Clone, Default)]
pub enum Target {
    /// Use the default path passed to flush.
    #[default]
    Default,
    /// Write into the given file.
    File(PathBuf),
    /// Hand the unit to a custom serializer.
    Handler(Arc<dyn Serializer>),
}

impl Target {
    /// Create a file target.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Target::File(path.into())
    }

    /// Create a handler target.
    pub fn handler(handler: impl Serializer + 'static) -> Self {
        Target::Handler(Arc::new(handler))
    }

    /// Check if this is the default target.
    pub fn is_default(&self) -> bool {
        matches!(self, Target::Default)
    }

    /// Resolve this target against the default output path.
    pub fn resolve<'a>(&'a self, default_path: &'a Path) -> ResolvedTarget<'a> {
        match self {
            Target::Default => ResolvedTarget::File(default_path),
            Target::File(path) => ResolvedTarget::File(path),
            Target::Handler(handler) => ResolvedTarget::Handler(handler.as_ref()),
        }
    }

    /// Build a target from an untyped TOML value.
    ///
    /// Strings become file targets, `{ handler = "<name>" }` tables are looked
    /// up with `lookup`. Everything else is rejected.
    pub fn from_toml(
        value: &toml::Value,
        lookup: impl Fn(&str) -> Option<Arc<dyn Serializer>>,
    ) -> Result<Self> {
        match value {
            toml::Value::String(path) => Ok(Target::file(path)),
            toml::Value::Table(table) if table.len() == 1 => match table.get("handler") {
                Some(toml::Value::String(name)) => lookup(name)
                    .map(Target::Handler)
                    .ok_or_else(|| Error::UnknownHandler { name: name.clone() }),
                Some(other) => Err(Error::InvalidTargetKind {
                    kind: format!("handler name of type {}", other.type_str()),
                }),
                None => Err(invalid_kind(value)),
            },
            other => Err(invalid_kind(other)),
        }
    }
}

fn invalid_kind(value: &toml::Value) -> Error {
    let kind = match value {
        toml::Value::Table(table) => {
            let keys: Vec<&str> = table.keys().map(String::as_str).collect();
            format!("table with keys [{}]", keys.join(", "))
        }
        other => other.type_str().to_string(),
    };
    Error::InvalidTargetKind { kind }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Default => f.write_str("Default"),
            Target::File(path) => f.debug_tuple("File").field(path).finish(),
            Target::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Target::File(path)
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Target::File(path.to_path_buf())
    }
}

impl From<&PathBuf> for Target {
    fn from(path: &PathBuf) -> Self {
        Target::File(path.clone())
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Target::File(path.into())
    }
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Target::File(path.into())
    }
}

impl From<Arc<dyn Serializer>> for Target {
    fn from(handler: Arc<dyn Serializer>) -> Self {
        Target::Handler(handler)
    }
}

impl<T: Into<Target>> From<Option<T>> for Target {
    fn from(target: Option<T>) -> Self {
        target.map_or(Target::Default, Into::into)
    }
}

/// A target after resolution against the default path.
#[derive(Clone, Copy)]
pub enum ResolvedTarget<'a> {
    /// Write into this file.
    File(&'a Path),
    /// Pass the unit to this handler.
    Handler(&'a dyn Serializer),
}

impl ResolvedTarget<'_> {
    /// Get the file path, if this is a file target.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolvedTarget::File(path) => Some(path),
            ResolvedTarget::Handler(_) => None,
        }
    }
}

impl fmt::Debug for ResolvedTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTarget::File(path) => f.debug_tuple("File").field(path).finish(),
            ResolvedTarget::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Arc<dyn Serializer> {
        Arc::new(|_: &dyn Serializable| -> std::result::Result<(), HandlerError> { Ok(()) })
    }

    #[test]
    fn test_resolve_default() {
        let default = Path::new("/tmp/default_file");
        let target = Target::Default;
        assert_eq!(target.resolve(default).path(), Some(default));
    }

    #[test]
    fn test_resolve_str_is_coerced_to_path() {
        let default = Path::new("/tmp/default_file");
        let target = Target::from("str_target");
        assert_eq!(
            target.resolve(default).path(),
            Some(Path::new("str_target"))
        );
    }

    #[test]
    fn test_resolve_path() {
        let default = Path::new("/tmp/default_file");
        let target = Target::from(PathBuf::from("/tmp/test_file"));
        assert_eq!(
            target.resolve(default).path(),
            Some(Path::new("/tmp/test_file"))
        );
    }

    #[test]
    fn test_resolve_handler_is_returned_as_is() {
        let handler = noop();
        let target = Target::Handler(handler.clone());
        match target.resolve(Path::new("default.tex")) {
            ResolvedTarget::Handler(resolved) => {
                assert!(std::ptr::addr_eq(resolved, Arc::as_ptr(&handler)));
            }
            other => panic!("Expected handler target, got {:?}", other),
        }
    }

    #[test]
    fn test_option_conversion() {
        assert!(Target::from(None::<&str>).is_default());
        assert!(matches!(Target::from(Some("a.tex")), Target::File(_)));
    }

    #[test]
    fn test_from_toml_path() {
        let value = toml::Value::String("other.tex".to_string());
        let target = Target::from_toml(&value, |_| None).unwrap();
        assert!(matches!(target, Target::File(p) if p == Path::new("other.tex")));
    }

    #[test]
    fn test_from_toml_handler() {
        let value: toml::Value = toml::from_str::<toml::Table>(r#"t = { handler = "noop" }"#)
            .unwrap()
            .remove("t")
            .unwrap();
        let target = Target::from_toml(&value, |name| (name == "noop").then(noop)).unwrap();
        assert!(matches!(target, Target::Handler(_)));
    }

    #[test]
    fn test_from_toml_unknown_handler() {
        let value: toml::Value = toml::from_str::<toml::Table>(r#"t = { handler = "nope" }"#)
            .unwrap()
            .remove("t")
            .unwrap();
        let err = Target::from_toml(&value, |_| None).unwrap_err();
        assert!(matches!(err, Error::UnknownHandler { name } if name == "nope"));
    }

    #[test]
    fn test_from_toml_invalid_kind() {
        let err = Target::from_toml(&toml::Value::Integer(42), |_| None).unwrap_err();
        assert!(matches!(err, Error::InvalidTargetKind { ref kind } if kind == "integer"));

        let err = Target::from_toml(&toml::Value::Boolean(true), |_| None).unwrap_err();
        assert!(matches!(err, Error::InvalidTargetKind { .. }));
    }
}
