mod check;
mod completions;
mod graph;
mod inspect;
mod list;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use erdkit_adapters::AdapterError;
use erdkit_manifest::ErdToml;
use eyre::Result;
use graph::GraphCommand;
use inspect::InspectCommand;
use list::ListCommand;

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for erdkit_manifest::Result<T> {
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

impl<T> UnwrapOrExit<T> for std::result::Result<T, AdapterError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Location of the manifest, shared by every command that reads one.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to erd.toml (defaults to ./erd.toml)
    #[arg(short, long, default_value = ErdToml::FILENAME)]
    pub manifest: PathBuf,
}

impl ManifestArgs {
    pub fn open(&self) -> ErdToml {
        ErdToml::open(&self.manifest).unwrap_or_exit()
    }
}

#[derive(Parser)]
#[command(name = "erdkit")]
#[command(version)]
#[command(about = "Inspect model definitions and extract entity-relationship data")]
pub(crate) struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Graph(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate erd.toml and report unresolved forward references
    Check(CheckCommand),

    /// List classes declared in erd.toml
    List(ListCommand),

    /// Show a model's fields and merged docstring
    Inspect(InspectCommand),

    /// Extract the entity-relationship graph reachable from models
    Graph(GraphCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
