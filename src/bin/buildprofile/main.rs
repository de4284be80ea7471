//! buildprofile CLI - resolves Android/Flutter module build settings

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildprofile::resolver::ProfileError;
use buildprofile::util::{diagnostic, GlobalContext};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ProfileError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("buildprofile=debug")
    } else {
        EnvFilter::new("buildprofile=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_manifest_path(cli.manifest_path);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Table(args) => commands::table::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
