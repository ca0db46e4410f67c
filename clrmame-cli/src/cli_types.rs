//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "clrmame")]
#[command(about = "Inspect ClrMamePro and Logiqx XML DAT files", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging (reports ignored keys and dropped tokens)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for commands that print DAT contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Container used for each nested group when printing the raw tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ContainerKind {
    /// Keep every pair in order
    #[default]
    List,
    /// Collapse repeated keys, last value wins
    Map,
}

/// Common arguments for commands that read a DAT file.
#[derive(Args, Clone)]
pub(crate) struct DatArgs {
    /// Path to the DAT file
    pub file: PathBuf,

    /// Output format (defaults to the settings file, then text)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the raw key/value tree of a ClrMamePro text DAT
    Tree {
        #[command(flatten)]
        dat: DatArgs,

        /// Container for nested groups (defaults to the settings file, then list)
        #[arg(short, long)]
        container: Option<ContainerKind>,
    },

    /// List games and their ROMs
    Games {
        #[command(flatten)]
        dat: DatArgs,

        /// Only show games whose name contains this text (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Maximum number of games to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the DAT header
    Header {
        #[command(flatten)]
        dat: DatArgs,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Set a value (output.format or parse.container)
    Set { key: String, value: String },
}
