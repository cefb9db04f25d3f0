//! Non-fatal diagnostics collected during a run.
//!
//! Recognition is best-effort: a declaration that cannot be matched is
//! skipped, and a record of the skip ends up here. Everything is reported
//! once, after generation, by both `scriptgen generate` and `scriptgen check`.

mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics, Severity};

use crate::output::{plural, Printer};

/// Print diagnostics to stderr. Notes are only shown when `verbose` is set.
pub fn print_diagnostics(diagnostics: &Diagnostics, printer: &Printer, verbose: bool) {
    for d in diagnostics.iter() {
        if d.severity == Severity::Note && !verbose {
            continue;
        }

        let label = printer.severity(d.severity);
        match d.position() {
            Some(position) => eprintln!("{}[{}]: {}: {}", label, d.code, position, d.message),
            None => eprintln!("{}[{}]: {}", label, d.code, d.message),
        }
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let warnings = diagnostics.warning_count();
    if warnings > 0 {
        printer.warning(
            "Finished",
            &format!("with {}", plural(warnings, "warning", "warnings")),
        );
    }
}
