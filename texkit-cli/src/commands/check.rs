use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use texkit_manifest::{Handlers, TexkitToml};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to texkit.toml (defaults to ./texkit.toml)
    #[arg(short, long, default_value = "texkit.toml")]
    pub config: PathBuf,

    /// Print the unit list as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let texkit_toml = TexkitToml::open(&self.config).unwrap_or_exit();
        // building resolves handler names, which parsing alone cannot
        let toolkit = texkit_toml.toolkit(&Handlers::builtin()).unwrap_or_exit();

        let report = ops::check(
            &toolkit,
            &self.config,
            texkit_toml.manifest().output_path(),
        );

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to encode report")?;
            println!("{}", json);
        } else {
            let mut out = TerminalOutput::stdout();
            report.render(&mut out);
            out.finish()?;
        }

        Ok(())
    }
}
