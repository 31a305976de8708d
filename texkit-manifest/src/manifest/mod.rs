//! Manifest types and parsing for texkit.toml files.

mod file;
mod parse;
mod unit;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

pub use file::TexkitToml;
pub use parse::parse_manifest;
use serde::Deserialize;
use texkit::{TexToolkit, Toolkit};
use tracing::debug;
pub use unit::{UnitKind, UnitSpec};

use crate::{Handlers, Result, error::SourceContext};

/// Output file used when `[output] path` is not set.
pub const DEFAULT_OUTPUT_PATH: &str = "values.tex";

/// Root manifest for texkit.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Units, in registration order
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitSpec>,

    /// Source the manifest was parsed from, used for error spans
    #[serde(skip)]
    source: Option<Arc<SourceContext>>,
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default flush target
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Manifest {
    /// The default output path.
    pub fn output_path(&self) -> &Path {
        &self.output.path
    }

    /// Build a toolkit with every unit registered in manifest order.
    ///
    /// Handler targets are looked up in `handlers`.
    pub fn build(&self, handlers: &Handlers) -> Result<TexToolkit> {
        let source = self.source_context();
        let mut toolkit = TexToolkit::new();
        for spec in &self.units {
            toolkit.add_boxed(spec.build(&source, handlers)?);
        }
        debug!(units = toolkit.len(), "built toolkit from manifest");
        Ok(toolkit)
    }

    fn source_context(&self) -> Arc<SourceContext> {
        self.source
            .clone()
            .unwrap_or_else(|| Arc::new(SourceContext::new("texkit.toml", "")))
    }
}
