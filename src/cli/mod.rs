pub mod check;
pub mod completions;
pub mod generate;
pub mod list;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery::{load_config, Config};
use crate::error::Result;

/// scriptgen - ChaiScript registration generator for marked C++ headers
///
/// Without a subcommand, runs `generate`.
#[derive(Parser, Debug)]
#[command(name = "scriptgen")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: generate::GenerateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the registration header
    Generate(generate::GenerateArgs),

    /// Verify the registration header is up to date without writing it
    Check(check::CheckArgs),

    /// List scriptable classes and enums
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where to read headers from and where the header goes.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Root of the header tree (default: ./src)
    #[arg(long, short)]
    pub source: Option<PathBuf>,

    /// Generated header path (default: ./src/generated/generated_registrations.h)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./scriptgen.yaml when present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config and apply command-line overrides.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = load_config(self.manifest.as_deref())?;
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        Ok(config)
    }
}
