pub mod config;
pub mod generate;
pub mod init;
pub mod scan;
pub mod status;

use crate::store::RepositoryConfig;
use crate::utils::paths::resolve_root;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// Resolved roots of every configured repository, scanned or not
///
/// Rows with an empty folder are ignored.
///
/// # Errors
///
/// Returns an error if the home or current directory cannot be determined
pub fn repository_roots(repositories: &[RepositoryConfig]) -> Result<Vec<PathBuf>> {
    let mut roots = Vec::with_capacity(repositories.len());
    for repo in repositories {
        if repo.folder.as_os_str().is_empty() {
            debug!("Ignoring repository row with an empty folder");
            continue;
        }
        roots.push(resolve_root(&repo.folder)?);
    }
    Ok(roots)
}
