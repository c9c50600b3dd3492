//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Find every zoo enclosure that can legally house a group of animals
#[derive(Parser, Debug)]
#[command(name = "recintos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog file (TOML) to use instead of the configured one
    #[arg(long, global = true, env = "RECINTOS_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Explicit config file, layered above the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List enclosures that can take a group of one species
    Analyze {
        /// Species name (case-insensitive), e.g. MACACO
        animal: String,
        /// Number of individuals
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        /// Print the result document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the reference data
    Catalog {
        #[command(subcommand)]
        command: Option<CatalogCommands>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Enclosures and their occupants as a tree
    Enclosures,
    /// Species with size and habitats
    Species,
    /// Print the catalog in its TOML file format
    Export,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
