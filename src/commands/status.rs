use crate::CodedocContext;
use crate::scanner::check_repository;
use crate::store::Store;
use crate::utils::paths::resolve_root;
use anyhow::Result;
use colored::Colorize;

/// Execute status command - show repositories and selection counts
///
/// # Errors
///
/// Returns an error if the store is missing, locked, or lacks the
/// `CodeFolders` table
pub fn execute(ctx: &CodedocContext) -> Result<()> {
    let store = Store::open(&ctx.store_path)?;
    let repositories = store.repositories()?;

    println!("{} {}", "Store:".bold(), store.path().display());
    println!();

    if repositories.is_empty() {
        println!("No repositories configured");
    } else {
        println!("{}", "Repositories:".bold());
        for repo in repositories {
            let root = resolve_root(&repo.folder)?;
            let state = if !repo.want_scan {
                "not scanned".dimmed().to_string()
            } else {
                match check_repository(&root, &ctx.config.scan.vcs_dir) {
                    Ok(()) => "ok".green().to_string(),
                    Err(reason) => reason.to_string().yellow().to_string(),
                }
            };
            println!("  {:<60} {state}", root.display().to_string());
        }
    }

    println!();
    if store.has_selections() {
        let selections = store.selections_or_default();
        println!(
            "{} {} of {} files selected",
            "Selection:".bold(),
            selections.included().count().to_string().green(),
            selections.len()
        );
    } else {
        println!("{} not scanned yet", "Selection:".bold());
    }

    Ok(())
}
