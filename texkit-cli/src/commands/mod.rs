mod bake;
mod check;
mod completions;
mod ident;

use bake::BakeCommand;
use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Result, eyre};
use ident::IdentCommand;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for texkit_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "texkit")]
#[command(version)]
#[command(about = "Generate TeX constants and snippets from texkit.toml")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Ident(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    /// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
    pub fn init_logging(&self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|e| eyre!("failed to install logger: {}", e))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the TeX files declared in texkit.toml
    Bake(BakeCommand),

    /// Validate texkit.toml without writing anything
    Check(CheckCommand),

    /// Print the TeX command name a label turns into
    Ident(IdentCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
