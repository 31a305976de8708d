use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use texkit_manifest::{Handlers, TexkitToml};

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to texkit.toml (defaults to ./texkit.toml)
    #[arg(short, long, default_value = "texkit.toml")]
    pub config: PathBuf,

    /// Default output file (overrides [output] path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview the generated files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let texkit_toml = TexkitToml::open(&self.config).unwrap_or_exit();
        let toolkit = texkit_toml.toolkit(&Handlers::builtin()).unwrap_or_exit();

        let output = self
            .output
            .as_deref()
            .unwrap_or_else(|| texkit_toml.manifest().output_path());

        let report = ops::bake(
            &toolkit,
            BakeOptions {
                output,
                dry_run: self.dry_run,
            },
        )?;
        let mut out = TerminalOutput::stdout();
        report.render(&mut out);
        out.finish()?;

        Ok(())
    }
}
