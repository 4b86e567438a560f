use crate::CodedocContext;
use crate::output;
use crate::store::{RepositoryConfig, Store};
use crate::utils::paths::{expand_tilde, make_absolute};
use anyhow::Result;
use std::path::PathBuf;

/// Initialize a new store
///
/// Each folder is recorded with `WantScan = true`; the selection table starts
/// empty.
///
/// # Errors
///
/// Returns an error if:
/// - The store already exists and `force` is not set
/// - A folder cannot be made absolute
/// - The store cannot be written
pub fn execute(ctx: &CodedocContext, folders: &[PathBuf], force: bool) -> Result<()> {
    let mut repositories = Vec::with_capacity(folders.len());
    for folder in folders {
        repositories.push(RepositoryConfig {
            folder: make_absolute(&expand_tilde(folder)?)?,
            want_scan: true,
        });
    }

    let count = repositories.len();
    Store::create(&ctx.store_path, repositories, force)?;

    output::success(&format!(
        "Initialized store at {} with {count} repositories",
        ctx.store_path.display()
    ));
    if count == 0 {
        output::info("Add [[CodeFolders]] rows with Folder and WantScan, then run 'codedoc scan'");
    }

    Ok(())
}
