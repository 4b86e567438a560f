//! Command-line interface definitions for codedoc.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes,
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for codedoc.
#[derive(Parser)]
#[command(
    name = "codedoc",
    version = crate::VERSION,
    about = "Inventory source files across repositories and bind a selection into one document",
    long_about = "Scans configured repositories for source files, keeps an operator-edited \
                  selection table up to date, and concatenates the selected files into a \
                  single document with folder markers"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Store file to use instead of the configured one
    #[arg(long, global = true, env = "CODEDOC_STORE_PATH", value_name = "PATH")]
    pub store: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new store
    Init {
        /// Repository folder to register (repeatable)
        #[arg(long = "folder", value_name = "PATH")]
        folders: Vec<PathBuf>,

        /// Overwrite an existing store
        #[arg(short, long)]
        force: bool,
    },

    /// Refresh the file inventory of every wanted repository
    Scan,

    /// Bind the selected files into one document
    Generate {
        /// Write the document here instead of the configured output path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Write the document to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show configured repositories and selection counts
    Status,

    /// Get and set configuration options
    Config {
        /// Configuration key
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Reset the configuration key to its default
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
