use std::fmt;
use std::path::PathBuf;

/// Problems with the persisted store that abort a run before any work starts.
///
/// Everything else that can go wrong during a run (a repository that cannot be
/// scanned, a file that cannot be read) is logged and absorbed where it happens.
#[derive(Debug)]
pub enum ConfigurationError {
    /// The store file does not exist
    StoreNotFound(PathBuf),
    /// A required table is absent from the store
    MissingTable {
        /// Store that was opened
        store: PathBuf,
        /// Name of the missing table
        table: &'static str,
    },
    /// The store could not be decoded (missing column, wrong cell type, bad syntax)
    MalformedStore {
        /// Store that was opened
        store: PathBuf,
        /// Decoder message
        reason: String,
    },
    /// Another run holds the store
    StoreLocked(PathBuf),
}

impl ConfigurationError {
    /// Get a short description of the error type
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::StoreNotFound(_) => "Store Not Found",
            Self::MissingTable { .. } => "Missing Table",
            Self::MalformedStore { .. } => "Malformed Store",
            Self::StoreLocked(_) => "Store Locked",
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreNotFound(path) => write!(
                f,
                "Store file not found: {} (run 'codedoc init' to create one)",
                path.display()
            ),
            Self::MissingTable { store, table } => {
                write!(f, "No {table} table found in {}", store.display())
            }
            Self::MalformedStore { store, reason } => {
                write!(f, "Cannot read {}: {}", store.display(), reason.trim_end())
            }
            Self::StoreLocked(path) => write!(
                f,
                "Store {} is in use by another codedoc run",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}
