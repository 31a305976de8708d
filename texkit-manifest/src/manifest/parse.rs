//! Manifest parsing from files and strings.

use std::{collections::HashMap, path::Path, str::FromStr, sync::Arc};

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "texkit.toml")
    }
}

impl Manifest {
    /// Parse a texkit.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a texkit.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = Arc::new(SourceContext::new(filename, content));
    let mut manifest: Manifest =
        toml::from_str(content).map_err(|e| source_ctx.parse(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    manifest.source = Some(source_ctx);
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if manifest.output.path.as_os_str().is_empty() {
        return Err(ctx.invalid("[output] path must not be empty"));
    }

    let mut seen = HashMap::new();
    for spec in &manifest.units {
        spec.validate(ctx)?;

        let (key, span) = spec.identity();
        if let Some(first) = seen.insert((spec.kind(), key.to_string()), span.clone()) {
            return Err(ctx.duplicate(
                format!("{}:{}", spec.kind(), key),
                first,
                span,
            ));
        }
    }
    Ok(())
}
