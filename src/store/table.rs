use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// One configured repository (`CodeFolders` row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository root as entered by the operator
    #[serde(rename = "Folder")]
    pub folder: PathBuf,
    /// Whether inventory refresh should walk this repository
    #[serde(rename = "WantScan")]
    pub want_scan: bool,
}

/// One inventoried file (`CODE` row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// Absolute file path; unique across the table
    #[serde(rename = "Path")]
    pub path: String,
    /// Base name of the file
    #[serde(rename = "File")]
    pub file_name: String,
    /// Directory levels between the repository root and the file
    #[serde(rename = "Depth")]
    pub depth: usize,
    /// Operator flag: include this file in the generated document
    #[serde(rename = "WantDoc")]
    pub included: bool,
}

/// Selection entries keyed by path, iterated in ascending path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTable {
    /// Entries keyed by [`SelectionEntry::path`]
    entries: BTreeMap<String, SelectionEntry>,
}

impl SelectionTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from stored rows
    ///
    /// Rows with an empty path are dropped. When a path occurs twice the
    /// later row wins.
    #[must_use]
    pub fn from_rows(rows: Vec<SelectionEntry>) -> Self {
        let mut table = Self::new();
        for row in rows {
            if row.path.is_empty() {
                continue;
            }
            if table.entries.contains_key(&row.path) {
                warn!(path = %row.path, "Duplicate path in selection table, keeping the last row");
            }
            table.insert(row);
        }
        table
    }

    /// Insert or replace the entry for its path
    pub fn insert(&mut self, entry: SelectionEntry) -> Option<SelectionEntry> {
        self.entries.insert(entry.path.clone(), entry)
    }

    /// Look up an entry by path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SelectionEntry> {
        self.entries.get(path)
    }

    /// True if the table holds `path`
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Mutable access to an entry by path
    pub fn get_mut(&mut self, path: &str) -> Option<&mut SelectionEntry> {
        self.entries.get_mut(path)
    }

    /// Entries in ascending path order
    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }

    /// Entries flagged for the document, in ascending path order
    pub fn included(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.iter().filter(|entry| entry.included)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in ascending path order, ready to persist
    #[must_use]
    pub fn into_rows(self) -> Vec<SelectionEntry> {
        self.entries.into_values().collect()
    }
}

impl FromIterator<SelectionEntry> for SelectionTable {
    fn from_iter<T: IntoIterator<Item = SelectionEntry>>(iter: T) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
