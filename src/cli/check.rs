//! Check command implementation.
//!
//! Runs the full pipeline and compares the result with the header on disk.

use std::fs;

use clap::Args;

use crate::diagnostics::print_diagnostics;
use crate::error::{GenError, Result};
use crate::output::{display_path, Printer};
use crate::pipeline::generate;

use super::generate::{deny_warnings, summary};
use super::SourceArgs;

/// Verify the registration header is up to date without writing it
#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail if any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Also show notes
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let config = args.source.resolve()?;
    let generated = generate(&config, printer)?;

    print_diagnostics(&generated.diagnostics, printer, args.verbose);
    deny_warnings(&generated, args.deny_warnings)?;

    let output = display_path(&config.output);
    let current = match fs::read_to_string(&config.output) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            printer.error("Missing", &output);
            return Err(GenError::Check {
                message: format!("{} has not been generated", output),
                help: Some("Run `scriptgen generate`".to_string()),
            });
        }
        Err(e) => {
            return Err(GenError::Io {
                path: config.output.clone(),
                message: format!("Failed to read generated header: {}", e),
            })
        }
    };

    if current != generated.text {
        printer.error("Stale", &output);
        return Err(GenError::Check {
            message: format!("{} is out of date", output),
            help: Some("Run `scriptgen generate`".to_string()),
        });
    }

    printer.status("Checked", &format!("{} ({})", output, summary(&generated)));
    Ok(())
}
