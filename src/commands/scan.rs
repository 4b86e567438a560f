use crate::CodedocContext;
use crate::config::ScanConfig;
use crate::output;
use crate::reconcile::{ReconcileSummary, reconcile};
use crate::scanner::{IgnoreRuleSet, ScanRecord, TreeScanner, check_repository};
use crate::store::{RepositoryConfig, Store};
use crate::utils::paths::resolve_root;
use anyhow::Result;
use tracing::{info, warn};

/// Execute scan command - refresh the inventory of every wanted repository
///
/// Loads the store, walks each repository marked `WantScan`, merges the
/// result into the selection table and writes it back. A repository that
/// cannot be scanned is skipped with a warning.
///
/// # Errors
///
/// Returns an error if:
/// - The store is missing, locked, or lacks the `CodeFolders` table
/// - The store cannot be saved
pub fn execute(ctx: &CodedocContext) -> Result<ReconcileSummary> {
    let mut store = Store::open(&ctx.store_path)?;
    let repositories = store.repositories()?.to_vec();

    if !store.has_selections() {
        info!("No CODE table in store, creating it");
    }
    let existing = store.selections_or_default();

    let records = scan_repositories(&repositories, &ctx.config.scan);

    info!("Updating CODE table with scanned files");
    let table = reconcile(&existing, &records);
    let summary = ReconcileSummary::between(&existing, &table);

    store.replace_selections(table);
    store.save()?;
    info!("Store updated successfully");

    output::success(&format!(
        "Inventory refreshed: {} kept, {} added, {} dropped ({} selected)",
        summary.kept, summary.added, summary.dropped, summary.included
    ));

    Ok(summary)
}

/// Scan every repository marked for scanning and collect its records
///
/// Repositories that are unwanted, missing, not directories, not
/// version-controlled, or whose ignore file cannot be read contribute nothing.
#[must_use]
pub fn scan_repositories(repositories: &[RepositoryConfig], config: &ScanConfig) -> Vec<ScanRecord> {
    let scanner = TreeScanner::from_config(config);
    let mut records = Vec::new();

    for repo in repositories {
        let folder = repo.folder.display();

        if repo.folder.as_os_str().is_empty() {
            continue;
        }

        if !repo.want_scan {
            info!("Skipping folder {folder} because WantScan=false");
            continue;
        }

        let root = match resolve_root(&repo.folder) {
            Ok(root) => root,
            Err(e) => {
                warn!("Cannot resolve folder {folder}: {e}");
                continue;
            }
        };

        if let Err(reason) = check_repository(&root, &config.vcs_dir) {
            warn!("Skipping {}: {reason}", root.display());
            output::warning(&format!("Skipping {}: {reason}", root.display()));
            continue;
        }

        let rules = match IgnoreRuleSet::load(&root, &config.ignore_file) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Skipping {}: {e:#}", root.display());
                output::warning(&format!("Skipping {}: {e}", root.display()));
                continue;
            }
        };

        let scan = scanner.scan(&root, &rules);
        output::action("Scanned", &format!("{} ({} files)", root.display(), scan.records.len()));
        records.extend(scan.records);
    }

    records
}
