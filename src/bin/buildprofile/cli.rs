//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// buildprofile - Build-configuration resolver for Android/Flutter app modules
#[derive(Parser)]
#[command(name = "buildprofile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to build-profile.toml (defaults to searching upward from cwd)
    #[arg(long, global = true, env = "BUILDPROFILE_MANIFEST")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the build profile and print or write it
    Resolve(ResolveArgs),

    /// Validate the build profile without emitting it
    Check(CheckArgs),

    /// Show the platform compatibility table
    Table(TableArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Output format (json, toml)
    #[arg(long)]
    pub format: Option<String>,

    /// Write the profile to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Provider snapshot (TOML or local.properties)
    #[arg(long)]
    pub provider: Option<PathBuf>,

    /// Fail when a variant would borrow another variant's signing identity
    #[arg(long)]
    pub deny_fallback: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Provider snapshot (TOML or local.properties)
    #[arg(long)]
    pub provider: Option<PathBuf>,

    /// Fail when a variant would borrow another variant's signing identity
    #[arg(long)]
    pub deny_fallback: bool,
}

#[derive(Args)]
pub struct TableArgs {
    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
