//! Check operation - manifest validation.

use std::path::Path;

use texkit::{ResolvedTarget, TexToolkit};

use crate::reports::{CheckReport, UnitEntry};

/// Describe a validated toolkit.
///
/// Validation itself happens while the manifest is parsed and built, so
/// anything reaching this point is valid.
pub fn check(toolkit: &TexToolkit, config_path: &Path, output_path: &Path) -> CheckReport {
    let units = toolkit
        .iter()
        .map(|unit| UnitEntry {
            id: unit.id().to_string(),
            target: match unit.target().resolve(output_path) {
                ResolvedTarget::File(path) => path.display().to_string(),
                ResolvedTarget::Handler(_) => "handler".to_string(),
            },
        })
        .collect();

    CheckReport {
        config_path: config_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        units,
    }
}
