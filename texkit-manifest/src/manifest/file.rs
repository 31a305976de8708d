use std::path::{Path, PathBuf};

use texkit::TexToolkit;

use super::Manifest;
use crate::{Handlers, Result};

/// Represents a texkit.toml file with both raw content and parsed manifest.
pub struct TexkitToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl TexkitToml {
    /// Open and parse a texkit.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Build the toolkit declared by this file.
    ///
    /// Relative paths are used as-is, i.e. relative to the working directory.
    pub fn toolkit(&self, handlers: &Handlers) -> Result<TexToolkit> {
        self.manifest.build(handlers)
    }
}
