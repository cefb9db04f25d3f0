//! Generate command implementation.
//!
//! Scans the header tree and writes the registration header.

use clap::Args;

use crate::diagnostics::print_diagnostics;
use crate::error::{GenError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{generate, write_output, Generated};

use super::SourceArgs;

/// Generate the registration header
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail without writing if any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Also show notes
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let config = args.source.resolve()?;
    let generated = generate(&config, printer)?;

    print_diagnostics(&generated.diagnostics, printer, args.verbose);
    deny_warnings(&generated, args.deny_warnings)?;

    write_output(&config.output, &generated.text)?;
    printer.status(
        "Generated",
        &format!("{} ({})", display_path(&config.output), summary(&generated)),
    );

    Ok(())
}

/// Fail when warnings are present and `deny` is set.
pub(crate) fn deny_warnings(generated: &Generated, deny: bool) -> Result<()> {
    if deny && generated.diagnostics.has_warnings() {
        let warnings = generated.diagnostics.warning_count();
        return Err(GenError::Check {
            message: format!("{} reported", plural(warnings, "warning", "warnings")),
            help: Some("Fix the reported declarations or drop --deny-warnings".to_string()),
        });
    }
    Ok(())
}

/// "2 classes, 1 enum"
pub(crate) fn summary(generated: &Generated) -> String {
    format!(
        "{}, {}",
        plural(generated.registry.classes().count(), "class", "classes"),
        plural(generated.registry.enums().count(), "enum", "enums")
    )
}
