//! Bake command report.

use std::path::PathBuf;

use texkit::{FlushStats, PreviewEntry};

use super::output::{Output, Report};

/// What a bake run did.
#[derive(Debug)]
pub enum BakeReport {
    /// Files were written to disk.
    Written {
        /// Default output path.
        output: PathBuf,
        stats: FlushStats,
    },
    /// Dry-run preview.
    Preview {
        /// Files that would be written.
        files: Vec<PreviewEntry>,
        /// Units routed to handlers, which a dry run skips.
        skipped: usize,
    },
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            BakeReport::Written { output, stats } => {
                out.field("Output", &output.display().to_string());
                out.field(
                    "Units",
                    &format!("{} ({} sent to handlers)", stats.units, stats.handled),
                );
                out.blank();
                out.heading(&format!("Written ({})", stats.written()));
                for path in &stats.written_paths {
                    out.entry('+', &path.display().to_string());
                }
            }
            BakeReport::Preview { files, skipped } => {
                for file in files {
                    out.block(&file.path.display().to_string(), &file.content);
                }
                out.line(&format!(
                    "{} file{} would be written",
                    files.len(),
                    if files.len() == 1 { "" } else { "s" }
                ));
                if *skipped > 0 {
                    out.line(&format!("{} handler units not dispatched", skipped));
                }
            }
        }
    }
}
