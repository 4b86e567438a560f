//! The persisted workbook shared by inventory refresh and document generation.
//!
//! The store is a TOML file with two arrays of tables whose keys are the
//! column names:
//!
//! ```toml
//! [[CodeFolders]]
//! Folder = "/home/me/app"
//! WantScan = true
//!
//! [[CODE]]
//! Path = "/home/me/app/src/index.js"
//! File = "index.js"
//! Depth = 1
//! WantDoc = false
//! ```
//!
//! Opening a store takes an exclusive lock that is held until the [`Store`]
//! is dropped. Saves replace the file atomically.

/// Sidecar lock held while a store is open.
pub mod lock;

/// Row types and the path-keyed selection table.
pub mod table;

pub use lock::StoreLock;
pub use table::{RepositoryConfig, SelectionEntry, SelectionTable};

use crate::error::ConfigurationError;
use crate::utils::paths::ensure_parent_dirs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name of the repository configuration table.
pub const REPOSITORY_TABLE: &str = "CodeFolders";

/// Name of the selection table.
pub const SELECTION_TABLE: &str = "CODE";

/// On-disk layout of the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Workbook {
    /// Configured repositories
    #[serde(rename = "CodeFolders", default, skip_serializing_if = "Option::is_none")]
    code_folders: Option<Vec<RepositoryConfig>>,
    /// Inventoried files
    #[serde(rename = "CODE", default, skip_serializing_if = "Option::is_none")]
    code: Option<Vec<SelectionEntry>>,
}

/// An open, locked store
#[derive(Debug)]
pub struct Store {
    /// Location of the store file
    path: PathBuf,
    /// Decoded tables
    workbook: Workbook,
    /// Held for the lifetime of the store
    _lock: StoreLock,
}

impl Store {
    /// Open and lock an existing store
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the store is missing, locked by
    /// another run, or cannot be decoded.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigurationError::StoreNotFound(path.to_path_buf()).into());
        }

        let lock = StoreLock::acquire(path)?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read store: {}", path.display()))?;
        let workbook: Workbook =
            toml::from_str(&content).map_err(|e| ConfigurationError::MalformedStore {
                store: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(
            store = %path.display(),
            lock = %lock.path().display(),
            repositories = workbook.code_folders.as_ref().map_or(0, Vec::len),
            selections = workbook.code.as_ref().map_or(0, Vec::len),
            "Store opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            _lock: lock,
        })
    }

    /// Write a fresh store with the given repositories and an empty selection table
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists and `force` is false, or if the
    /// file cannot be written.
    pub fn create(path: &Path, repositories: Vec<RepositoryConfig>, force: bool) -> Result<Self> {
        if path.exists() && !force {
            anyhow::bail!(
                "Store already exists: {} (use --force to overwrite)",
                path.display()
            );
        }

        ensure_parent_dirs(path)?;
        let lock = StoreLock::acquire(path)?;
        let store = Self {
            path: path.to_path_buf(),
            workbook: Workbook {
                code_folders: Some(repositories),
                code: Some(Vec::new()),
            },
            _lock: lock,
        };
        store.save()?;
        info!("Created store at {}", path.display());
        Ok(store)
    }

    /// Location of the store file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured repositories
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingTable`] if the store has no
    /// `CodeFolders` table.
    pub fn repositories(&self) -> Result<&[RepositoryConfig]> {
        self.workbook
            .code_folders
            .as_deref()
            .ok_or_else(|| self.missing(REPOSITORY_TABLE).into())
    }

    /// True if the store has a `CODE` table
    #[must_use]
    pub fn has_selections(&self) -> bool {
        self.workbook.code.is_some()
    }

    /// The selection table, or an empty one if the store has none yet
    #[must_use]
    pub fn selections_or_default(&self) -> SelectionTable {
        self.workbook
            .code
            .clone()
            .map(SelectionTable::from_rows)
            .unwrap_or_default()
    }

    /// The selection table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingTable`] if the store has no
    /// `CODE` table.
    pub fn selections(&self) -> Result<SelectionTable> {
        self.workbook
            .code
            .clone()
            .map(SelectionTable::from_rows)
            .ok_or_else(|| self.missing(SELECTION_TABLE).into())
    }

    /// Replace every selection row; repositories are left untouched
    pub fn replace_selections(&mut self, table: SelectionTable) {
        self.workbook.code = Some(table.into_rows());
    }

    /// Persist the store atomically
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be replaced.
    pub fn save(&self) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(&self.workbook).context("Failed to serialize store")?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp.write_all(toml_str.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write store: {}", self.path.display()))?;

        debug!(store = %self.path.display(), "Store saved");
        Ok(())
    }

    /// Build a missing-table error for this store
    fn missing(&self, table: &'static str) -> ConfigurationError {
        ConfigurationError::MissingTable {
            store: self.path.clone(),
            table,
        }
    }
}
