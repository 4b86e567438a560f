/// Glob-style ignore rule evaluation.
pub mod patterns;

/// Pruning depth-first walk producing scan records.
pub mod tree;

pub use patterns::IgnoreRuleSet;
pub use tree::{RepoScan, ScanRecord, TreeScanner, depth_of};

use std::fmt;
use std::path::Path;

/// Why a configured repository contributes nothing to a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositorySkip {
    /// The root path does not exist
    Missing,
    /// The root path exists but is not a directory
    NotADirectory,
    /// The root has no version-control metadata directory
    NotVersionControlled,
}

impl fmt::Display for RepositorySkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "folder does not exist"),
            Self::NotADirectory => write!(f, "not a directory"),
            Self::NotVersionControlled => write!(f, "folder not version-controlled"),
        }
    }
}

/// Check that `root` is an existing directory containing `vcs_dir`
///
/// # Errors
///
/// Returns the reason the repository has to be skipped
pub fn check_repository(root: &Path, vcs_dir: &str) -> Result<(), RepositorySkip> {
    if !root.exists() {
        return Err(RepositorySkip::Missing);
    }
    if !root.is_dir() {
        return Err(RepositorySkip::NotADirectory);
    }
    if !root.join(vcs_dir).exists() {
        return Err(RepositorySkip::NotVersionControlled);
    }
    Ok(())
}
