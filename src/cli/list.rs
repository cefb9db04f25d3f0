//! List command implementation.
//!
//! Runs recognition and prints what would be registered.

use clap::Args;

use crate::error::{GenError, Result};
use crate::output::{plural, Printer};
use crate::pipeline::generate;
use crate::registry::Registry;

use super::SourceArgs;

/// List scriptable classes and enums
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the registry as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let config = args.source.resolve()?;
    let generated = generate(&config, printer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&generated.registry).map_err(|e| GenError::Io {
            path: "<stdout>".into(),
            message: format!("Failed to serialize registry: {}", e),
        })?;
        println!("{}", json);
    } else {
        print_inventory(&generated.registry, printer);
    }

    Ok(())
}

fn print_inventory(registry: &Registry, printer: &Printer) {
    for class in registry.classes() {
        let constructors = class.constructors().count();
        let methods: Vec<&str> = class.methods.keys().map(|s| s.as_str()).filter(|name| *name != class.name).collect();

        printer.info(
            "Class",
            &format!(
                "{} {}",
                printer.bold(&class.qualified_name()),
                printer.dim(&format!("({})", class.include))
            ),
        );
        printer.info(
            "",
            &format!(
                "{}; {}",
                plural(constructors, "constructor", "constructors"),
                if methods.is_empty() {
                    "no methods".to_string()
                } else {
                    methods.join(", ")
                }
            ),
        );
        if !class.ancestors.is_empty() {
            printer.info("", &format!("{} {}", printer.dim("->"), class.ancestors.join(", ")));
        }
    }

    for scriptable_enum in registry.enums() {
        printer.info(
            "Enum",
            &format!(
                "{} {}",
                printer.bold(&scriptable_enum.qualified_name()),
                printer.dim(&format!("({})", scriptable_enum.include))
            ),
        );
        printer.info("", &scriptable_enum.values.join(", "));
    }
}
