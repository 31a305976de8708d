//! Bake operation - writing the manifest's units out.

use std::path::Path;

use eyre::{Context, Result};
use texkit::{Target, TexToolkit};
use tracing::info;

use crate::reports::BakeReport;

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Default output path.
    pub output: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
///
/// A dry run renders the files without touching the disk or any handler.
pub fn bake(toolkit: &TexToolkit, opts: BakeOptions) -> Result<BakeReport> {
    if opts.dry_run {
        let skipped = toolkit
            .iter()
            .filter(|unit| matches!(unit.target(), Target::Handler(_)))
            .count();
        return Ok(BakeReport::Preview {
            files: toolkit.preview(opts.output),
            skipped,
        });
    }

    let stats = toolkit
        .flush(opts.output)
        .wrap_err_with(|| format!("Failed to bake into {}", opts.output.display()))?;
    info!(
        units = stats.units,
        files = stats.written(),
        "baked {}",
        opts.output.display()
    );

    Ok(BakeReport::Written {
        output: opts.output.to_path_buf(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use texkit::{Collector, LINE_ENDING, NewCommandMixin, TexStringMixin};

    use super::*;

    fn toolkit(collector: &Collector) -> TexToolkit {
        let mut tex = TexToolkit::new();
        tex.newcommand("runs", 10);
        tex.texstring_to("note", "hello", Target::handler(collector.clone()));
        tex
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("values.tex");
        let collector = Collector::new();

        let report = bake(
            &toolkit(&collector),
            BakeOptions {
                output: &out,
                dry_run: true,
            },
        )
        .unwrap();

        match report {
            BakeReport::Preview { files, skipped } => {
                assert_eq!(files.len(), 1);
                assert_eq!(skipped, 1);
            }
            other => panic!("expected preview, got {:?}", other),
        }
        assert!(!out.exists());
        assert!(collector.entries().is_empty());
    }

    #[test]
    fn test_bake_writes_and_dispatches() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("values.tex");
        let collector = Collector::new();

        let report = bake(
            &toolkit(&collector),
            BakeOptions {
                output: &out,
                dry_run: false,
            },
        )
        .unwrap();

        assert!(matches!(report, BakeReport::Written { ref stats, .. } if stats.handled == 1));
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            format!("\\newcommand{{\\runs}}{{$10$}}{}", LINE_ENDING)
        );
        assert_eq!(collector.entries(), vec!["hello"]);
    }

    #[test]
    fn test_bake_into_directory_fails() {
        let temp = TempDir::new().unwrap();
        let collector = Collector::new();

        let err = bake(
            &toolkit(&collector),
            BakeOptions {
                output: temp.path(),
                dry_run: false,
            },
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Failed to bake into"));
        assert!(collector.entries().is_empty());
    }
}
