#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # Codedoc - Source Inventory and Document Binder
//!
//! Codedoc inventories source files across several local repositories, lets an
//! operator flag a subset of them in a persisted selection table, and binds the
//! flagged files into a single text document with folder markers.
//!
//! ## Runs
//!
//! - **Inventory refresh** (`codedoc scan`): walk every configured repository,
//!   honoring ignore rules, and merge the result into the selection table while
//!   keeping operator flags on files that still exist.
//! - **Document generation** (`codedoc generate`): read the flagged files in
//!   path order and emit them with folder labels relative to their repository.
//!
//! The two runs are independent; the persisted store is their only link.
//!
//! ## Architecture
//!
//! - [`scanner`]: ignore-rule matching and pruned directory traversal
//! - [`reconcile`]: pure merge of a fresh scan into the selection table
//! - [`document`]: folder label resolution and document assembly
//! - [`store`]: the TOML workbook holding repositories and selections
//! - [`config`]: configuration parsing and validation
//! - [`commands`]: command implementations (init, scan, generate, ...)
//! - [`output`]: terminal output styling
//! - [`utils`]: path helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use codedoc::CodedocContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = CodedocContext::new()?;
//!
//! // Refresh the inventory, then bind the flagged files
//! codedoc::commands::scan::execute(&ctx)?;
//! codedoc::commands::generate::execute(&ctx, false)?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Folder label resolution and document assembly.
pub mod document;

/// Fatal error taxonomy.
pub mod error;

/// Output formatting for the terminal.
pub mod output;

/// Merging fresh scans into the persisted selection table.
pub mod reconcile;

/// Ignore-rule matching and repository tree scanning.
pub mod scanner;

/// Persisted workbook holding repository configuration and selections.
pub mod store;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the codedoc binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/codedoc/config";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "CODEDOC_CONFIG_PATH";

/// Environment variable overriding the store path.
pub const STORE_PATH_ENV: &str = "CODEDOC_STORE_PATH";

/// Central context for all codedoc operations.
///
/// Holds the resolved store and output locations together with the loaded
/// configuration. Commands take it by reference.
///
/// # Examples
///
/// ```no_run
/// use codedoc::CodedocContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Context with default paths
/// let ctx = CodedocContext::new()?;
///
/// // Context with explicit paths (for testing)
/// let ctx = CodedocContext::new_explicit(
///     "/tmp/test/codedoc.toml".into(),
///     "/tmp/test/config".into(),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CodedocContext {
    /// Path to the persisted workbook.
    pub store_path: PathBuf,

    /// Path the generated document is written to.
    pub output_path: PathBuf,

    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl CodedocContext {
    /// Creates a new `CodedocContext` by loading the configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the configuration
    /// file cannot be read or created.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&config_path) {
            output::warning(&format!("Warning: Configuration validation failed: {e}"));
        }

        let store_path = if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            PathBuf::from(path)
        } else {
            utils::paths::expand_tilde(&config.core.store_path)?
        };
        let output_path = utils::paths::expand_tilde(&config.core.output_path)?;

        Ok(Self {
            store_path,
            output_path,
            config_path,
            config,
        })
    }

    /// Creates a new `CodedocContext` with an explicit store and config path.
    ///
    /// The config file is created with defaults when it does not exist. The
    /// output path is taken from the configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(store_path: PathBuf, config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        let output_path = utils::paths::expand_tilde(&config.core.output_path)?;

        Ok(Self {
            store_path,
            output_path,
            config_path,
            config,
        })
    }

    /// Replaces the store path for this run.
    #[must_use]
    pub fn with_store_path(mut self, store_path: PathBuf) -> Self {
        self.store_path = store_path;
        self
    }

    /// Replaces the output path for this run.
    #[must_use]
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }
}
