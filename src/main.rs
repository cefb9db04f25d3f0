use clap::Parser;
use miette::Result;
use scriptgen::cli::{Cli, Commands};
use scriptgen::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Some(Commands::Generate(args)) => scriptgen::cli::generate::run(args, &printer)?,
        Some(Commands::Check(args)) => scriptgen::cli::check::run(args, &printer)?,
        Some(Commands::List(args)) => scriptgen::cli::list::run(args, &printer)?,
        Some(Commands::Completions(args)) => scriptgen::cli::completions::run(args)?,
        None => scriptgen::cli::generate::run(cli.generate, &printer)?,
    }

    Ok(())
}
