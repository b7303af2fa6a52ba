//! Prebuilt CLI - resolve prebuilt third-party libraries

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prebuilt::resolver::ResolveError;
use prebuilt::util::diagnostic;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("prebuilt=debug")
    } else {
        EnvFilter::new("prebuilt=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Metadata(args) => commands::metadata::execute(args),
        Commands::List(args) => commands::list::execute(args),
        Commands::Mappings => commands::mappings::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
