//! Check command report.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// A validated manifest, as listed by `texkit check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub config_path: PathBuf,
    /// Default output path.
    pub output_path: PathBuf,
    /// Units in registration order.
    pub units: Vec<UnitEntry>,
}

#[derive(Debug, Serialize)]
pub struct UnitEntry {
    /// `Category:key`
    pub id: String,
    /// A file path, or `handler`.
    pub target: String,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.line(&format!("✓ {} is valid", self.config_path.display()));
        out.blank();
        out.field("Output", &self.output_path.display().to_string());

        let count = self.units.len();
        out.heading(&format!("{} unit{}", count, if count == 1 { "" } else { "s" }));
        for unit in &self.units {
            out.entry('-', &format!("{} -> {}", unit.id, unit.target));
        }
    }
}
